use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_EMAIL_LEN: usize = 200;
pub const MAX_MESSAGE_LEN: usize = 2000;

lazy_static::lazy_static! {
    /// `local@domain.tld`, no whitespace
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Contact form body as posted by the site.
///
/// Every field is optional on the wire. A missing field, or one that is not
/// a string, behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "text_only")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub message: Option<String>,
    /// Honeypot; humans never see it. Kept as raw JSON so any filled-in
    /// value trips it, whatever its type.
    #[serde(default)]
    pub website: Value,
    #[serde(default, deserialize_with = "text_only")]
    pub turnstile_token: Option<String>,
}

impl ContactRequest {
    pub fn is_bot(&self) -> bool {
        match &self.website {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

fn text_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Trim and cap at `max_len` characters.
pub fn sanitize(value: Option<&str>, max_len: usize) -> String {
    value
        .unwrap_or_default()
        .trim()
        .chars()
        .take(max_len)
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Missing,
    InvalidEmail,
}

pub fn validate(request: &ContactRequest) -> Result<ValidContact, FieldError> {
    let name = sanitize(request.name.as_deref(), MAX_NAME_LEN);
    let email = sanitize(request.email.as_deref(), MAX_EMAIL_LEN);
    let message = sanitize(request.message.as_deref(), MAX_MESSAGE_LEN);

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(FieldError::Missing);
    }
    if !is_valid_email(&email) {
        return Err(FieldError::InvalidEmail);
    }

    Ok(ValidContact {
        name,
        email,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
            ..ContactRequest::default()
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada @example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_sanitize_trims_then_truncates() {
        assert_eq!(sanitize(Some("  hi  "), 10), "hi");
        assert_eq!(sanitize(None, 10), "");
        assert_eq!(sanitize(Some(&"x".repeat(250)), MAX_NAME_LEN).len(), 200);
        // Truncation counts characters, not bytes.
        assert_eq!(sanitize(Some("ééé"), 2), "éé");
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        assert_eq!(
            validate(&request("   ", "ada@example.com", "Hello")),
            Err(FieldError::Missing)
        );
        assert_eq!(
            validate(&ContactRequest::default()),
            Err(FieldError::Missing)
        );
    }

    #[test]
    fn test_malformed_email_rejected() {
        assert_eq!(
            validate(&request("Ada", "not-an-email", "Hello")),
            Err(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn test_long_message_is_truncated_not_rejected() {
        let valid = validate(&request("Ada", "ada@example.com", &"m".repeat(5000))).unwrap();
        assert_eq!(valid.message.chars().count(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_honeypot_detection() {
        let mut r = ContactRequest::default();
        assert!(!r.is_bot());
        r.website = json!("");
        assert!(!r.is_bot());
        r.website = json!("http://spam.example");
        assert!(r.is_bot());
    }

    #[test]
    fn test_honeypot_of_any_type_trips() {
        for (website, bot) in [
            (json!(1), true),
            (json!(true), true),
            (json!(["x"]), true),
            (json!({}), true),
            (json!(0), false),
            (json!(false), false),
            (Value::Null, false),
        ] {
            let r: ContactRequest = serde_json::from_value(json!({ "website": website.clone() })).unwrap();
            assert_eq!(r.is_bot(), bot, "website = {website}");
        }
    }

    #[test]
    fn test_non_string_fields_read_as_empty() {
        let r: ContactRequest =
            serde_json::from_value(json!({ "name": 42, "email": null, "message": ["hi"] })).unwrap();
        assert!(r.name.is_none() && r.email.is_none() && r.message.is_none());
        assert_eq!(validate(&r), Err(FieldError::Missing));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let r: ContactRequest =
            serde_json::from_str(r#"{"name":"Ada","turnstileToken":"tok"}"#).unwrap();
        assert_eq!(r.turnstile_token.as_deref(), Some("tok"));
        assert!(r.email.is_none());
    }
}
