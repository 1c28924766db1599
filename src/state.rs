//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::contact::notify;
use crate::contact::rate_limit::RateLimiter;
use crate::contact::{verify, ContactService};
use crate::content::image::ImageUrlBuilder;
use crate::content::memory::MemoryStore;
use crate::content::sanity::SanityStore;
use crate::content::{ContentClient, ContentService, ContentStore};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("content store: {0}")]
    Store(#[from] crate::content::StoreError),
    #[error("human verification: {0}")]
    Verify(#[from] verify::VerifyError),
    #[error("email notifications: {0}")]
    Notify(#[from] notify::NotifyError),
}

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub contact: Arc<ContactService>,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(content: ContentService, contact: ContactService, config: SiteConfig) -> Self {
        Self {
            content: Arc::new(content),
            contact: Arc::new(contact),
            config: Arc::new(config),
        }
    }

    /// Wire every component from configuration.
    pub fn from_config(config: SiteConfig) -> Result<Self, StartupError> {
        let store: Arc<dyn ContentStore> = match config.sanity.project_id.clone() {
            Some(project_id) => {
                tracing::info!(
                    project_id = %project_id,
                    dataset = %config.sanity.dataset,
                    cdn = config.sanity.use_cdn,
                    "using hosted content store"
                );
                Arc::new(SanityStore::new(project_id, config.sanity.clone())?)
            }
            None => {
                tracing::warn!("SANITY_PROJECT_ID not set, serving bundled content only");
                Arc::new(MemoryStore::new())
            }
        };

        let client = ContentClient::new(store, config.content_timeout);
        let images = ImageUrlBuilder::new(config.sanity.project_id.clone(), config.sanity.dataset.clone());
        let content = ContentService::new(client.clone(), images);

        let contact = ContactService::new(
            RateLimiter::new(config.contact.rate_limit_max, config.contact.rate_limit_window),
            verify::from_secret(config.contact.turnstile_secret.clone())?,
            notify::from_config(config.contact.email.clone(), &config.contact.notify_to)?,
            client,
        );

        Ok(Self::new(content, contact, config))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// State over an in-memory store with verification and email disabled.
    pub(crate) fn memory_state(documents: Vec<serde_json::Value>) -> AppState {
        let config = SiteConfig::from_lookup(&|_: &str| None);
        let client = ContentClient::new(
            Arc::new(MemoryStore::with_documents(documents)),
            config.content_timeout,
        );
        let content = ContentService::new(
            client.clone(),
            ImageUrlBuilder::new(Some("abc123".to_string()), "production"),
        );
        let contact = ContactService::new(
            RateLimiter::new(config.contact.rate_limit_max, config.contact.rate_limit_window),
            Box::new(verify::DisabledVerifier),
            Box::new(notify::NoopNotifier),
            client,
        );
        AppState::new(content, contact, config)
    }

    #[test]
    fn test_unconfigured_store_falls_back_to_memory() {
        let vars: HashMap<&str, &str> = HashMap::new();
        let config = SiteConfig::from_lookup(&|k: &str| vars.get(k).map(|v| v.to_string()));
        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.content.client().store_name(), "memory");
    }

    #[test]
    fn test_configured_store_uses_sanity() {
        let config = SiteConfig::from_lookup(&|k: &str| {
            (k == "SANITY_PROJECT_ID").then(|| "abc123".to_string())
        });
        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.content.client().store_name(), "sanity");
    }
}
