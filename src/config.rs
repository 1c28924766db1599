//! Runtime configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

const DEFAULT_SITE_URL: &str = "https://neilsandoz.com";
const DEFAULT_DATASET: &str = "production";
const DEFAULT_API_VERSION: &str = "2024-01-01";
const DEFAULT_CONTACT_TO: &str = "hello@neilsandoz.com";
const DEFAULT_SMTP_PORT: u16 = 587;
pub(crate) const DEFAULT_FROM_ADDRESS: &str = "Neil Sandoz Portfolio <noreply@neilsandoz.com>";

/// Non-empty value of `name`.
fn lookup_str(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn lookup_parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    lookup_str(lookup, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn lookup_bool(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    match lookup_str(lookup, name).as_deref() {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// ============================================================================
// Content store
// ============================================================================

#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// Unset means no hosted store; pages render from bundled content.
    pub project_id: Option<String>,
    pub dataset: String,
    pub api_version: String,
    pub read_token: Option<String>,
    /// Needed for contact submissions to be persisted.
    pub write_token: Option<String>,
    pub use_cdn: bool,
}

impl SanityConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            project_id: lookup_str(lookup, "SANITY_PROJECT_ID"),
            dataset: lookup_str(lookup, "SANITY_DATASET").unwrap_or_else(|| DEFAULT_DATASET.to_string()),
            api_version: lookup_str(lookup, "SANITY_API_VERSION")
                .map(|v| v.trim_start_matches('v').to_string())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            read_token: lookup_str(lookup, "SANITY_READ_TOKEN"),
            write_token: lookup_str(lookup, "SANITY_WRITE_TOKEN"),
            use_cdn: lookup_bool(lookup, "SANITY_USE_CDN", true),
        }
    }
}

// ============================================================================
// Contact form
// ============================================================================

#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Accepted submissions per client per window.
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    /// Unset disables human verification.
    pub turnstile_secret: Option<String>,
    /// Operator address notified of each submission.
    pub notify_to: String,
    /// Unset when `SMTP_HOST` is absent; notifications are then skipped.
    pub email: Option<EmailConfig>,
}

impl ContactConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            rate_limit_max: lookup_parse(lookup, "CONTACT_RATE_LIMIT_MAX", 3),
            rate_limit_window: Duration::from_secs(lookup_parse(
                lookup,
                "CONTACT_RATE_LIMIT_WINDOW_SECS",
                15 * 60,
            )),
            turnstile_secret: lookup_str(lookup, "TURNSTILE_SECRET_KEY"),
            notify_to: lookup_str(lookup, "CONTACT_TO")
                .unwrap_or_else(|| DEFAULT_CONTACT_TO.to_string()),
            email: EmailConfig::from_lookup(lookup),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// | Variable        | Required | Default                                           |
    /// |-----------------|----------|---------------------------------------------------|
    /// | `SMTP_HOST`     | yes      |                                                   |
    /// | `SMTP_PORT`     | no       | `587`                                             |
    /// | `SMTP_FROM`     | no       | `Neil Sandoz Portfolio <noreply@neilsandoz.com>`  |
    /// | `SMTP_USER`     | no       |                                                   |
    /// | `SMTP_PASSWORD` | no       |                                                   |
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            smtp_host: lookup_str(lookup, "SMTP_HOST")?,
            smtp_port: lookup_parse(lookup, "SMTP_PORT", DEFAULT_SMTP_PORT),
            from_address: lookup_str(lookup, "SMTP_FROM")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: lookup_str(lookup, "SMTP_USER"),
            smtp_password: lookup_str(lookup, "SMTP_PASSWORD"),
        })
    }
}

// ============================================================================
// Site
// ============================================================================

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// Public origin used for absolute links in the sitemap.
    pub site_url: String,
    pub allowed_origins: Vec<String>,
    pub content_timeout: Duration,
    pub sanity: SanityConfig,
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable             | Default                  |
    /// |----------------------|--------------------------|
    /// | `ENVIRONMENT`        | `development`            |
    /// | `HOST`               | `127.0.0.1`              |
    /// | `PORT`               | `3001`                   |
    /// | `SITE_URL`           | `https://neilsandoz.com` |
    /// | `ALLOWED_ORIGINS`    | `FRONTEND_ORIGIN`, else localhost:3000 |
    /// | `CONTENT_TIMEOUT_MS` | `5000`                   |
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let allowed_origins: Vec<String> = lookup_str(lookup, "ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .filter(|v: &Vec<String>| !v.is_empty())
            .or_else(|| lookup_str(lookup, "FRONTEND_ORIGIN").map(|o| vec![o]))
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        Self {
            environment: lookup_str(lookup, "ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: lookup_str(lookup, "HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup_parse(lookup, "PORT", 3001),
            site_url: lookup_str(lookup, "SITE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            allowed_origins,
            content_timeout: Duration::from_millis(lookup_parse(lookup, "CONTENT_TIMEOUT_MS", 5000)),
            sanity: SanityConfig::from_lookup(lookup),
            contact: ContactConfig::from_lookup(lookup),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
