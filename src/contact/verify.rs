//! Human verification of contact submissions (Cloudflare Turnstile).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("verification request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait HumanVerifier: Send + Sync {
    /// `Ok(true)` when the token proves a human submitted the form.
    async fn verify(&self, token: &str, remote_ip: &str) -> Result<bool, VerifyError>;
}

/// Accepts everything; used when no secret is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledVerifier;

#[async_trait]
impl HumanVerifier for DisabledVerifier {
    async fn verify(&self, _token: &str, _remote_ip: &str) -> Result<bool, VerifyError> {
        Ok(true)
    }
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

pub struct TurnstileVerifier {
    client: reqwest::Client,
    secret: String,
    endpoint: String,
}

impl TurnstileVerifier {
    pub fn new(secret: String) -> Result<Self, VerifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            secret,
            endpoint: SITEVERIFY_URL.to_string(),
        })
    }
}

#[async_trait]
impl HumanVerifier for TurnstileVerifier {
    async fn verify(&self, token: &str, remote_ip: &str) -> Result<bool, VerifyError> {
        let response: SiteVerifyResponse = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("secret", self.secret.as_str()),
                ("response", token),
                ("remoteip", remote_ip),
            ])
            .send()
            .await?
            .json()
            .await?;

        if !response.success {
            tracing::info!(error_codes = ?response.error_codes, "turnstile rejected token");
        }
        Ok(response.success)
    }
}

/// Turnstile when a secret is configured, otherwise the pass-through verifier.
pub fn from_secret(secret: Option<String>) -> Result<Box<dyn HumanVerifier>, VerifyError> {
    match secret {
        Some(secret) => Ok(Box::new(TurnstileVerifier::new(secret)?)),
        None => {
            tracing::warn!("TURNSTILE_SECRET_KEY not set, contact form verification disabled");
            Ok(Box::new(DisabledVerifier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_verifier_accepts_anything() {
        assert!(DisabledVerifier.verify("", "unknown").await.unwrap());
    }

    #[test]
    fn test_siteverify_response_decodes() {
        let ok: SiteVerifyResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.success);

        let bad: SiteVerifyResponse =
            serde_json::from_str(r#"{"success":false,"error-codes":["invalid-input-response"]}"#)
                .unwrap();
        assert!(!bad.success);
        assert_eq!(bad.error_codes, vec!["invalid-input-response"]);
    }

    #[test]
    fn test_from_secret_selects_verifier() {
        assert!(from_secret(None).is_ok());
        assert!(from_secret(Some("secret".to_string())).is_ok());
    }
}
