//! Content store boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::query::Query;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Network, DNS, TLS or connection failure.
    #[error("content store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("content store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("content store did not answer within {0:?}")]
    Timeout(Duration),

    /// The payload did not match the expected document schema.
    #[error("unexpected content shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("content store is read-only: {0}")]
    ReadOnly(String),
}

impl StoreError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Transport(_) => "transport",
            StoreError::Status { .. } => "status",
            StoreError::Timeout(_) => "timeout",
            StoreError::Decode(_) => "decode",
            StoreError::ReadOnly(_) => "read_only",
        }
    }
}

/// A queryable document store.
///
/// `fetch` answers `null` (single) or `[]` (list) when nothing matches;
/// errors are reserved for transport and schema failures.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch(&self, query: &Query) -> Result<Value, StoreError>;

    /// Create a document and return its id.
    async fn create(&self, document: Value) -> Result<String, StoreError>;

    fn name(&self) -> &'static str;
}
