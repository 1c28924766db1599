//! Editor Portfolio - content and contact service behind the portfolio site

pub mod config;
pub mod contact;
pub mod content;
pub mod logging;
pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::SiteConfig;
use crate::state::AppState;

/// Contact bodies are three short fields; anything larger is refused.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// CORS for the site's own origins. Unparseable entries are skipped.
pub fn configure_cors(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&state.config.allowed_origins);
    tracing::info!(origins = ?state.config.allowed_origins, "CORS configured");

    Router::new()
        .route("/api/home", get(routes::pages::home))
        .route("/api/about", get(routes::pages::about))
        .route("/api/settings", get(routes::pages::settings))
        .route("/api/projects", get(routes::pages::projects))
        .route("/api/work/{slug}", get(routes::pages::project))
        .route("/api/slugs", get(routes::pages::slugs))
        .route("/api/contact", post(routes::contact::submit))
        .route("/sitemap.xml", get(routes::sitemap::sitemap))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/ready", get(routes::health::health_ready))
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Held until the server exits so buffered log lines are flushed.
    let _log_guards = logging::init(&logging::LogConfig::from_env());

    routes::health::init_start_time();

    let config = SiteConfig::from_env();
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(host = %config.host, port = config.port, error = %e, "invalid HOST/PORT configuration");
            return;
        }
    };

    if config.is_production() && config.contact.turnstile_secret.is_none() {
        tracing::warn!("TURNSTILE_SECRET_KEY not set, contact submissions are not human-verified");
    }

    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize application state");
            return;
        }
    };

    let app = create_app(state);
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return;
        }
    };

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!(error = %e, "server error");
    }
}
