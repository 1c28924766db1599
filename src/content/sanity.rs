//! HTTP client for the hosted Sanity content lake.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::query::Query;
use super::store::{ContentStore, StoreError};
use crate::config::SanityConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

pub struct SanityStore {
    client: reqwest::Client,
    project_id: String,
    config: SanityConfig,
}

impl SanityStore {
    pub fn new(project_id: String, config: SanityConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            project_id,
            config,
        })
    }

    fn query_url(&self) -> String {
        let host = if self.config.use_cdn && self.config.read_token.is_none() {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        format!(
            "https://{}.{}/v{}/data/query/{}",
            self.project_id, host, self.config.api_version, self.config.dataset
        )
    }

    fn mutate_url(&self) -> String {
        format!(
            "https://{}.api.sanity.io/v{}/data/mutate/{}",
            self.project_id, self.config.api_version, self.config.dataset
        )
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body: body.chars().take(500).collect(),
        })
    }
}

#[async_trait]
impl ContentStore for SanityStore {
    async fn fetch(&self, query: &Query) -> Result<Value, StoreError> {
        let (groq, params) = query.to_groq();

        // Query parameters travel as `$name=<json>`.
        let mut pairs = vec![("query".to_string(), groq)];
        for (name, value) in params {
            pairs.push((format!("${name}"), value.to_string()));
        }

        let mut request = self.client.get(self.query_url()).query(&pairs);
        if let Some(token) = &self.config.read_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(doc_type = query.doc_type, "querying content store");

        let response = Self::check_status(request.send().await?).await?;
        let bytes = response.bytes().await?;
        let body: QueryResponse = serde_json::from_slice(&bytes)?;
        Ok(body.result)
    }

    async fn create(&self, document: Value) -> Result<String, StoreError> {
        let token = self
            .config
            .write_token
            .as_deref()
            .ok_or_else(|| StoreError::ReadOnly("SANITY_WRITE_TOKEN is not set".to_string()))?;

        let response = self
            .client
            .post(self.mutate_url())
            .query(&[("returnIds", "true")])
            .bearer_auth(token)
            .json(&json!({ "mutations": [{ "create": document }] }))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        let body: MutateResponse = serde_json::from_slice(&bytes)?;

        Ok(body
            .results
            .into_iter()
            .next()
            .map(|r| r.id)
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "sanity"
    }
}
