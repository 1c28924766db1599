/**
 * Contact Module
 * Contact form pipeline: rate limit, honeypot, human verification,
 * field validation, then best-effort persistence and notification
 */

pub mod notify;
pub mod rate_limit;
pub mod validation;
pub mod verify;

use axum::http::StatusCode;
use chrono::Utc;

use crate::content::types::ContactSubmission;
use crate::content::ContentClient;
use notify::Notifier;
use rate_limit::RateLimiter;
use validation::{ContactRequest, FieldError};
use verify::HumanVerifier;

/// Rejections surfaced to the submitter. The display text is the message
/// shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Too many submissions. Please try again later.")]
    RateLimited,
    #[error("Invalid request.")]
    InvalidRequest,
    #[error("Human verification failed. Please try again.")]
    VerificationFailed,
    #[error("Name, email, and message are required.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<FieldError> for ContactError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Missing => ContactError::MissingFields,
            FieldError::InvalidEmail => ContactError::InvalidEmail,
        }
    }
}

/// What happened to an accepted submission. Both variants answer `{ok:true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Delivered { persisted: bool, notified: bool },
    /// Honeypot tripped; nothing was stored or sent.
    Discarded,
}

pub struct ContactService {
    limiter: RateLimiter,
    verifier: Box<dyn HumanVerifier>,
    notifier: Box<dyn Notifier>,
    content: ContentClient,
}

impl ContactService {
    pub fn new(
        limiter: RateLimiter,
        verifier: Box<dyn HumanVerifier>,
        notifier: Box<dyn Notifier>,
        content: ContentClient,
    ) -> Self {
        Self {
            limiter,
            verifier,
            notifier,
            content,
        }
    }

    /// Run one submission through the pipeline. `client_key` identifies the
    /// caller for rate limiting and is forwarded to the verifier.
    pub async fn submit(&self, client_key: &str, body: &[u8]) -> Result<ContactOutcome, ContactError> {
        if !self.limiter.check(client_key).await {
            tracing::warn!(client = %client_key, "contact submission rate limited");
            return Err(ContactError::RateLimited);
        }

        let request: ContactRequest = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "contact body is not valid JSON");
            ContactError::InvalidRequest
        })?;

        if request.is_bot() {
            tracing::info!(client = %client_key, "honeypot filled, discarding submission");
            return Ok(ContactOutcome::Discarded);
        }

        let token = validation::sanitize(
            request.turnstile_token.as_deref(),
            validation::MAX_MESSAGE_LEN,
        );
        match self.verifier.verify(&token, client_key).await {
            Ok(true) => {}
            Ok(false) => return Err(ContactError::VerificationFailed),
            Err(e) => {
                tracing::warn!(error = %e, "human verification unavailable");
                return Err(ContactError::VerificationFailed);
            }
        }

        let valid = validation::validate(&request)?;
        let submission = ContactSubmission::new(valid.name, valid.email, valid.message, Utc::now());

        let (persisted, notified) =
            tokio::join!(self.persist(&submission), self.notify(&submission));

        tracing::info!(persisted, notified, "contact submission accepted");
        Ok(ContactOutcome::Delivered {
            persisted,
            notified,
        })
    }

    async fn persist(&self, submission: &ContactSubmission) -> bool {
        match self.content.create_submission(submission).await {
            Ok(id) => {
                tracing::info!(id = %id, store = self.content.store_name(), "contact submission saved");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "failed to save contact submission");
                false
            }
        }
    }

    async fn notify(&self, submission: &ContactSubmission) -> bool {
        match self.notifier.notify(submission).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, notifier = self.notifier.name(), "failed to send contact notification");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::memory::MemoryStore;
    use crate::content::types::CONTACT_SUBMISSION_TYPE;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use notify::NotifyError;
    use rate_limit::ManualClock;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use verify::VerifyError;

    /// Counts notifications; optionally fails every one.
    #[derive(Default, Clone)]
    pub(crate) struct RecordingNotifier {
        pub sent: Arc<AtomicUsize>,
        pub fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
            if self.fail {
                let err: Result<lettre::Address, _> = "broken".parse();
                return Err(NotifyError::Address(err.unwrap_err()));
            }
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct RejectingVerifier;

    #[async_trait]
    impl HumanVerifier for RejectingVerifier {
        async fn verify(&self, _token: &str, _ip: &str) -> Result<bool, VerifyError> {
            Ok(false)
        }
    }

    pub(crate) fn service(
        store: MemoryStore,
        notifier: RecordingNotifier,
        verifier: Box<dyn HumanVerifier>,
    ) -> ContactService {
        ContactService::new(
            RateLimiter::with_clock(3, Duration::from_secs(15 * 60), Arc::new(ManualClock::new())),
            verifier,
            Box::new(notifier),
            ContentClient::new(Arc::new(store), Duration::from_secs(1)),
        )
    }

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn valid_body() -> Vec<u8> {
        body(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "message": "Let's make a film.",
            "website": "",
            "turnstileToken": "tok"
        }))
    }

    #[tokio::test]
    async fn test_fourth_submission_in_window_is_rate_limited() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let svc = service(store.clone(), notifier.clone(), Box::new(verify::DisabledVerifier));

        for _ in 0..3 {
            assert_matches!(
                svc.submit("1.2.3.4", &valid_body()).await,
                Ok(ContactOutcome::Delivered { persisted: true, notified: true })
            );
        }
        let err = svc.submit("1.2.3.4", &valid_body()).await.unwrap_err();
        assert_eq!(err, ContactError::RateLimited);
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);

        assert_eq!(store.documents_of_type(CONTACT_SUBMISSION_TYPE).await.len(), 3);
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_honeypot_is_silent_no_op() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let svc = service(store.clone(), notifier.clone(), Box::new(RejectingVerifier));

        let outcome = svc
            .submit(
                "5.6.7.8",
                &body(json!({ "name": "bot", "email": "nope", "website": "http://spam.example" })),
            )
            .await;

        assert_eq!(outcome, Ok(ContactOutcome::Discarded));
        assert!(store.documents_of_type(CONTACT_SUBMISSION_TYPE).await.is_empty());
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_string_honeypot_is_discarded_quietly() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let svc = service(store.clone(), notifier.clone(), Box::new(verify::DisabledVerifier));

        for website in [json!(1), json!(true)] {
            let outcome = svc
                .submit(
                    "9.9.9.9",
                    &body(json!({ "name": "bot", "email": "a@b.co", "message": "x", "website": website })),
                )
                .await;
            assert_eq!(outcome, Ok(ContactOutcome::Discarded));
        }
        assert!(store.documents_of_type(CONTACT_SUBMISSION_TYPE).await.is_empty());
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_string_fields_count_as_missing() {
        let svc = service(
            MemoryStore::new(),
            RecordingNotifier::default(),
            Box::new(verify::DisabledVerifier),
        );
        assert_eq!(
            svc.submit("k", &body(json!({ "name": 7, "email": "ada@example.com", "message": "Hi" })))
                .await,
            Err(ContactError::MissingFields)
        );
    }

    #[tokio::test]
    async fn test_malformed_email_is_rejected() {
        let svc = service(
            MemoryStore::new(),
            RecordingNotifier::default(),
            Box::new(verify::DisabledVerifier),
        );
        let err = svc
            .submit(
                "k",
                &body(json!({ "name": "Ada", "email": "not-an-email", "message": "Hi" })),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ContactError::InvalidEmail);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_fields_and_bad_json() {
        let svc = service(
            MemoryStore::new(),
            RecordingNotifier::default(),
            Box::new(verify::DisabledVerifier),
        );
        assert_eq!(
            svc.submit("a", &body(json!({ "name": "Ada", "email": "ada@example.com" }))).await,
            Err(ContactError::MissingFields)
        );
        assert_eq!(svc.submit("b", b"{not json").await, Err(ContactError::InvalidRequest));
    }

    #[tokio::test]
    async fn test_failed_verification_stops_pipeline() {
        let store = MemoryStore::new();
        let svc = service(store.clone(), RecordingNotifier::default(), Box::new(RejectingVerifier));
        assert_eq!(
            svc.submit("k", &valid_body()).await,
            Err(ContactError::VerificationFailed)
        );
        assert!(store.documents_of_type(CONTACT_SUBMISSION_TYPE).await.is_empty());
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_block_persistence() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier {
            fail: true,
            ..RecordingNotifier::default()
        };
        let svc = service(store.clone(), notifier, Box::new(verify::DisabledVerifier));

        assert_eq!(
            svc.submit("k", &valid_body()).await,
            Ok(ContactOutcome::Delivered {
                persisted: true,
                notified: false
            })
        );
        let saved = store.documents_of_type(CONTACT_SUBMISSION_TYPE).await;
        assert_eq!(saved[0]["email"], "ada@example.com");
        assert_eq!(saved[0]["read"], false);
    }

    #[tokio::test]
    async fn test_persistence_failure_does_not_block_notification() {
        let notifier = RecordingNotifier::default();
        let svc = ContactService::new(
            RateLimiter::new(3, Duration::from_secs(60)),
            Box::new(verify::DisabledVerifier),
            Box::new(notifier.clone()),
            ContentClient::new(
                Arc::new(crate::content::sanity::SanityStore::new(
                    "abc123".to_string(),
                    crate::config::SanityConfig {
                        project_id: Some("abc123".to_string()),
                        dataset: "production".to_string(),
                        api_version: "2024-01-01".to_string(),
                        read_token: None,
                        write_token: None,
                        use_cdn: false,
                    },
                )
                .unwrap()),
                Duration::from_secs(1),
            ),
        );

        assert_eq!(
            svc.submit("k", &valid_body()).await,
            Ok(ContactOutcome::Delivered {
                persisted: false,
                notified: true
            })
        );
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }
}
