//! Operator notification for new contact submissions.
//!
//! [`EmailNotifier`] sends through the `lettre` async SMTP transport. When
//! `SMTP_HOST` is not set, [`crate::config::ContactConfig::email`] is `None` and the
//! [`NoopNotifier`] is used instead.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub use crate::config::EmailConfig;
use crate::content::types::ContactSubmission;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError>;

    fn name(&self) -> &'static str;
}

/// Drops notifications; used when SMTP is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
        tracing::debug!("email notification skipped, SMTP not configured");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

// ---------------------------------------------------------------------------
// EmailNotifier
// ---------------------------------------------------------------------------

pub struct EmailNotifier {
    config: EmailConfig,
    to: Mailbox,
    from: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig, to: &str) -> Result<Self, NotifyError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            to: to.parse()?,
            from: config.from_address.parse()?,
            mailer: builder.build(),
            config,
        })
    }

    fn message(&self, submission: &ContactSubmission) -> Result<Message, NotifyError> {
        let reply_to: Mailbox = submission.email.parse()?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .reply_to(reply_to)
            .subject(subject(submission))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(plain_body(submission)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body(submission)),
                    ),
            )?;

        Ok(message)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let message = self.message(submission)?;
        self.mailer.send(message).await?;
        tracing::info!(
            smtp_host = %self.config.smtp_host,
            reply_to = %submission.email,
            "contact notification sent"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// SMTP notifier when configured, otherwise the no-op notifier.
pub fn from_config(config: Option<EmailConfig>, to: &str) -> Result<Box<dyn Notifier>, NotifyError> {
    match config {
        Some(config) => Ok(Box::new(EmailNotifier::new(config, to)?)),
        None => {
            tracing::warn!("SMTP_HOST not set, contact notifications disabled");
            Ok(Box::new(NoopNotifier))
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn subject(submission: &ContactSubmission) -> String {
    // Header values must stay on one line.
    let name: String = submission
        .name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    format!("New message from {name}")
}

fn submitted_label(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y %H:%M UTC").to_string()
}

fn plain_body(submission: &ContactSubmission) -> String {
    format!(
        "New contact form submission\n\nName: {}\nEmail: {}\n\n{}\n\nSubmitted {}\n",
        submission.name,
        submission.email,
        submission.message,
        submitted_label(&submission.submitted_at)
    )
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn html_body(submission: &ContactSubmission) -> String {
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let message = escape_html(&submission.message);

    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; padding: 24px;">
  <h2 style="margin: 0 0 16px;">New contact form submission</h2>
  <table style="width: 100%; border-collapse: collapse;">
    <tr><td style="padding: 8px 0; font-weight: bold; width: 80px;">Name</td><td style="padding: 8px 0;">{name}</td></tr>
    <tr><td style="padding: 8px 0; font-weight: bold;">Email</td><td style="padding: 8px 0;"><a href="mailto:{email}">{email}</a></td></tr>
    <tr><td style="padding: 8px 0; font-weight: bold; vertical-align: top;">Message</td><td style="padding: 8px 0; white-space: pre-wrap;">{message}</td></tr>
  </table>
  <p style="margin: 24px 0 0; color: #888; font-size: 12px;">Submitted {submitted}</p>
</div>"#,
        submitted = submitted_label(&submission.submitted_at)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission() -> ContactSubmission {
        ContactSubmission::new(
            "Ada <script>".to_string(),
            "ada@example.com".to_string(),
            "Line one\n<b>bold</b> & more".to_string(),
            Utc.with_ymd_and_hms(2026, 3, 4, 17, 5, 0).unwrap(),
        )
    }

    #[test]
    fn test_html_body_escapes_user_input() {
        let html = html_body(&submission());
        assert!(html.contains("Ada &lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("March 4, 2026 17:05 UTC"));
    }

    #[test]
    fn test_subject_stays_on_one_line() {
        let mut s = submission();
        s.name = "Ada\r\nBcc: someone@example.com".to_string();
        assert!(!subject(&s).contains('\n'));
    }

    #[test]
    fn test_plain_body_carries_fields() {
        let body = plain_body(&submission());
        assert!(body.contains("Email: ada@example.com"));
        assert!(body.contains("<b>bold</b>"));
    }

    #[test]
    fn test_message_sets_reply_to_submitter() {
        let config = EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            from_address: crate::config::DEFAULT_FROM_ADDRESS.to_string(),
            smtp_user: None,
            smtp_password: None,
        };
        let notifier = EmailNotifier::new(config, "hello@neilsandoz.com").unwrap();
        let message = notifier.message(&submission()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Reply-To: ada@example.com"));
        assert!(raw.contains("To: hello@neilsandoz.com"));
    }

    #[test]
    fn test_notify_error_display() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = NotifyError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
