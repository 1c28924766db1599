//! Typed façade over a [`ContentStore`].
//!
//! Every call is bounded by the configured timeout. Not-found is `Ok(None)`
//! (or an empty list); errors are transport, status, timeout or decode.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::adjacency::Adjacent;
use super::query::Query;
use super::store::{ContentStore, StoreError};
use super::types::{
    AboutContent, ContactSubmission, Project, ProjectDocument, ProjectSummary, SiteSettings, Slug,
};

#[derive(Debug, Deserialize)]
struct SlugOnly {
    slug: Option<Slug>,
}

#[derive(Clone)]
pub struct ContentClient {
    store: Arc<dyn ContentStore>,
    timeout: Duration,
}

impl ContentClient {
    pub fn new(store: Arc<dyn ContentStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    async fn run(&self, query: &Query) -> Result<Value, StoreError> {
        match tokio::time::timeout(self.timeout, self.store.fetch(query)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    async fn fetch_one<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, StoreError> {
        match self.run(query).await? {
            Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    async fn fetch_all<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        match self.run(query).await? {
            Value::Null => Ok(Vec::new()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError> {
        let doc: Option<ProjectDocument> = self.fetch_one(&Query::project_by_slug(slug)).await?;
        Ok(doc.map(Project::from))
    }

    /// Projects in display order. Entries without a slug cannot be linked
    /// and are dropped.
    pub async fn all_projects(&self) -> Result<Vec<ProjectSummary>, StoreError> {
        let mut projects: Vec<ProjectSummary> = self.fetch_all(&Query::all_projects()).await?;
        projects.retain(|p| {
            let linkable = !p.slug.current.trim().is_empty();
            if !linkable {
                tracing::debug!(id = %p.id, "skipping project without slug");
            }
            linkable
        });
        Ok(projects)
    }

    pub async fn all_slugs(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<SlugOnly> = self.fetch_all(&Query::all_slugs()).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.slug.map(|s| s.current))
            .filter(|s| !s.trim().is_empty())
            .collect())
    }

    /// Previous and next projects around `order`, queried concurrently.
    ///
    /// Each side degrades to `None` on its own when the order is unknown or
    /// its query fails.
    pub async fn adjacent_projects(&self, order: Option<i64>) -> Adjacent<ProjectSummary> {
        let Some(order) = order else {
            return Adjacent::default();
        };

        let prev_query = Query::previous_project(order);
        let next_query = Query::next_project(order);
        let (prev, next) = tokio::join!(
            self.fetch_one::<ProjectSummary>(&prev_query),
            self.fetch_one::<ProjectSummary>(&next_query),
        );

        Adjacent {
            prev: prev.unwrap_or_else(|e| {
                tracing::warn!(error = %e, kind = e.kind(), order, "previous project lookup failed");
                None
            }),
            next: next.unwrap_or_else(|e| {
                tracing::warn!(error = %e, kind = e.kind(), order, "next project lookup failed");
                None
            }),
        }
    }

    pub async fn site_settings(&self) -> Result<Option<SiteSettings>, StoreError> {
        self.fetch_one(&Query::site_settings()).await
    }

    pub async fn about_content(&self) -> Result<Option<AboutContent>, StoreError> {
        self.fetch_one(&Query::about_content()).await
    }

    pub async fn create_submission(
        &self,
        submission: &ContactSubmission,
    ) -> Result<String, StoreError> {
        let document = submission.to_document();
        match tokio::time::timeout(self.timeout, self.store.create(document)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    /// Cheapest round trip the store supports, for health probes.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.run(&Query::site_settings()).await.map(|_| ())
    }
}
