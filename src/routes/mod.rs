/**
 * Routes Module
 * API route handlers
 */

pub mod contact;
pub mod health;
pub mod pages;
pub mod sitemap;

use serde::{Deserialize, Serialize};

/// Error body shared by every route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }
}

/// `{ "ok": true }`
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}
