//! Page assembly.
//!
//! Fetches from the content client, falls back to bundled data, and builds
//! the per-request views handed to the routes. Store failures never reach
//! callers; they are logged and replaced by bundled content.

use serde::Serialize;

use super::adjacency::{adjacent_by_index, Adjacent};
use super::client::ContentClient;
use super::fallback::{
    self, card_alt, hero_alt, ContactDetails, HeroBackground, ResolvedAbout, ResolvedSettings,
    Source,
};
use super::image::{self, ImageUrlBuilder, ResolvedImage};
use super::sections::{self, RenderBlock};
use super::static_data;
use super::store::StoreError;
use super::types::{Project, ProjectSummary, Slug};

/// Stagger between project cards on the home grid.
pub const CARD_DELAY_STEP_MS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub slug: String,
    pub title: String,
    pub location: Option<String>,
    pub role: Option<String>,
    pub short_description: Option<String>,
    pub thumbnail: ResolvedImage,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub hero: HeroBackground,
    pub edit_reel_url: String,
    pub projects: Vec<ProjectCard>,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub slug: String,
    pub title: String,
    pub location: Option<String>,
    pub role: Option<String>,
    pub short_description: Option<String>,
    pub hero: ResolvedImage,
    pub share_image_url: String,
    pub blocks: Vec<RenderBlock>,
    pub nav: Adjacent<NavLink>,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    #[serde(flatten)]
    pub about: ResolvedAbout,
    pub contact: ContactDetails,
}

fn log_store_error(what: &'static str, err: &StoreError) {
    tracing::warn!(what, error = %err, kind = err.kind(), "content store query failed, using bundled content");
}

/// Collapse a store result to an option, logging failures.
fn or_absent<T>(what: &'static str, result: Result<Option<T>, StoreError>) -> Option<T> {
    result.unwrap_or_else(|e| {
        log_store_error(what, &e);
        None
    })
}

#[derive(Clone)]
pub struct ContentService {
    client: ContentClient,
    images: ImageUrlBuilder,
}

impl ContentService {
    pub fn new(client: ContentClient, images: ImageUrlBuilder) -> Self {
        Self { client, images }
    }

    pub fn client(&self) -> &ContentClient {
        &self.client
    }

    pub async fn site_settings(&self) -> ResolvedSettings {
        let settings = or_absent("site_settings", self.client.site_settings().await);
        fallback::resolve_settings(settings.as_ref(), &self.images)
    }

    /// Grid cards: store projects in display order, or the bundled list when
    /// the store has none or fails.
    pub async fn project_cards(&self) -> (Vec<ProjectCard>, Source) {
        let summaries = match self.client.all_projects().await {
            Ok(list) if !list.is_empty() => Some(list),
            Ok(_) => {
                tracing::debug!("content store has no projects, using bundled list");
                None
            }
            Err(e) => {
                log_store_error("all_projects", &e);
                None
            }
        };

        match summaries {
            Some(list) => (self.cards(&list), Source::Store),
            None => {
                let list: Vec<ProjectSummary> = static_data::projects()
                    .iter()
                    .map(summary_of)
                    .collect();
                (self.cards(&list), Source::Static)
            }
        }
    }

    fn cards(&self, summaries: &[ProjectSummary]) -> Vec<ProjectCard> {
        summaries
            .iter()
            .enumerate()
            .map(|(i, p)| ProjectCard {
                slug: p.slug.current.clone(),
                title: p.title.clone(),
                location: p.location.clone(),
                role: p.role.clone(),
                short_description: p.short_description.clone(),
                thumbnail: ResolvedImage {
                    url: self
                        .images
                        .url_or_placeholder(p.thumbnail.as_ref(), image::CARD),
                    alt: card_alt(p.thumbnail.as_ref(), &p.title),
                },
                delay_ms: i as u64 * CARD_DELAY_STEP_MS,
            })
            .collect()
    }

    pub async fn home_page(&self) -> HomePage {
        let ((projects, source), settings) = tokio::join!(self.project_cards(), self.site_settings());
        HomePage {
            hero: settings.hero,
            edit_reel_url: settings.edit_reel_url,
            projects,
            source,
        }
    }

    pub async fn about_page(&self) -> AboutPage {
        let (about, settings) = tokio::join!(self.client.about_content(), self.site_settings());
        let about = or_absent("about_content", about);
        AboutPage {
            about: fallback::resolve_about(
                about.as_ref(),
                &settings.contact.music_url,
                &self.images,
            ),
            contact: settings.contact,
        }
    }

    /// Case-study page for `slug`, or `None` when neither the store nor the
    /// bundled list knows it.
    pub async fn project_page(&self, slug: &str) -> Option<ProjectPage> {
        match self.client.project_by_slug(slug).await {
            Ok(Some(project)) => {
                let nav = self
                    .client
                    .adjacent_projects(project.order)
                    .await
                    .map(|p| NavLink {
                        slug: p.slug.current,
                        title: p.title,
                    });
                return Some(self.page(&project, nav, Source::Store));
            }
            Ok(None) => tracing::debug!(slug, "project not in content store"),
            Err(e) => log_store_error("project_by_slug", &e),
        }

        let (index, project) = static_data::find_project(slug)?;
        let nav = adjacent_by_index(static_data::projects(), index).map(|p| NavLink {
            slug: p.slug.clone(),
            title: p.title.clone(),
        });
        Some(self.page(project, nav, Source::Static))
    }

    fn page(&self, project: &Project, nav: Adjacent<NavLink>, source: Source) -> ProjectPage {
        let hero_url = [project.hero_image.as_ref(), project.thumbnail.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|img| self.images.url(img, image::HERO))
            .unwrap_or_else(|| static_data::PLACEHOLDER_IMAGE.to_string());

        let share_image_url = project
            .thumbnail
            .as_ref()
            .and_then(|img| self.images.url(img, image::SOCIAL_PREVIEW))
            .unwrap_or_else(|| hero_url.clone());

        ProjectPage {
            slug: project.slug.clone(),
            title: project.title.clone(),
            location: project.location.clone(),
            role: project.role.clone(),
            short_description: project.short_description.clone(),
            hero: ResolvedImage {
                alt: hero_alt(
                    project.hero_image.as_ref(),
                    project.thumbnail.as_ref(),
                    &project.title,
                ),
                url: hero_url,
            },
            share_image_url,
            blocks: sections::normalize(&project.content, &project.title, &self.images),
            nav,
            source,
        }
    }

    /// Every published slug; bundled slugs when the store fails or has none.
    pub async fn project_slugs(&self) -> Vec<String> {
        match self.client.all_slugs().await {
            Ok(slugs) if !slugs.is_empty() => slugs,
            Ok(_) => static_data::slugs(),
            Err(e) => {
                log_store_error("all_slugs", &e);
                static_data::slugs()
            }
        }
    }
}

fn summary_of(project: &Project) -> ProjectSummary {
    ProjectSummary {
        id: project.id.clone(),
        title: project.title.clone(),
        slug: Slug::new(project.slug.clone()),
        order: project.order,
        location: project.location.clone(),
        role: project.role.clone(),
        short_description: project.short_description.clone(),
        thumbnail: project.thumbnail.clone(),
    }
}
