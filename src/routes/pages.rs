/**
 * Page Routes
 * Resolved page views for the site frontend
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use regex::Regex;
use serde::Serialize;

use crate::routes::ErrorResponse;
use crate::state::AppState;

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= 200 && SLUG_REGEX.is_match(slug)
}

#[derive(Debug, Serialize)]
pub struct SlugsResponse {
    pub slugs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<crate::content::service::ProjectCard>,
    pub source: crate::content::fallback::Source,
}

/// GET /api/home - Hero background, edit reel and project grid
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.content.home_page().await)
}

/// GET /api/about - About page with contact details
pub async fn about(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.content.about_page().await)
}

/// GET /api/settings - Resolved site settings
pub async fn settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.content.site_settings().await)
}

/// GET /api/projects - Project grid cards
pub async fn projects(State(state): State<AppState>) -> impl IntoResponse {
    let (projects, source) = state.content.project_cards().await;
    Json(ProjectsResponse { projects, source })
}

/// GET /api/work/{slug} - Case-study page
pub async fn project(State(state): State<AppState>, Path(slug): Path<String>) -> impl IntoResponse {
    let page = if is_valid_slug(&slug) {
        state.content.project_page(&slug).await
    } else {
        None
    };

    match page {
        Some(page) => (StatusCode::OK, Json(page)).into_response(),
        None => {
            tracing::debug!(slug = %slug, "project not found");
            (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Project not found"))).into_response()
        }
    }
}

/// GET /api/slugs - Every published project slug
pub async fn slugs(State(state): State<AppState>) -> impl IntoResponse {
    Json(SlugsResponse {
        slugs: state.content.project_slugs().await,
    })
}
