/**
 * Contact Routes
 * Contact form submission endpoint
 */
use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::contact::ContactError;
use crate::routes::{ErrorResponse, OkResponse};
use crate::state::AppState;

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Caller identity for rate limiting: the first `X-Forwarded-For` entry,
/// else the peer address.
pub fn client_key(headers: &HeaderMap, peer: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| peer.ip().to_string())
}

/// POST /api/contact - Submit the contact form
pub async fn submit(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let key = client_key(&headers, &peer);

    match state.contact.submit(&key, &body).await {
        Ok(outcome) => {
            tracing::debug!(outcome = ?outcome, "contact submission handled");
            (StatusCode::OK, Json(OkResponse { ok: true })).into_response()
        }
        Err(e) => e.into_response(),
    }
}
