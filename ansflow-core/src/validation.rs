//! Client side form validation
//!
//! Request bodies implement [`Validate`] so obviously invalid input (missing
//! required fields, names with spaces, non-http URLs, unparseable JSON text)
//! is rejected before any HTTP call is made. The backend remains the
//! authority for every other invariant.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Identifiers: letters, digits, `_` and `-`, no whitespace
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid name pattern"));

/// Hostnames and IPv4 addresses
static HOSTNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    ))
    .expect("valid hostname pattern")
});

/// Docker image names, optionally namespaced (`library/nginx`)
static IMAGE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+([._-][a-z0-9]+)*(/[a-z0-9]+([._-][a-z0-9]+)*)*$")
        .expect("valid image name pattern")
});

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field as sent on the wire
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation applied to request bodies before they are sent
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

/// Required identifier made of letters, digits, `_` and `-`
pub fn require_name(field: &str, value: &str) -> Result<(), ValidationError> {
    require_non_empty(field, value)?;
    if !NAME_PATTERN.is_match(value) {
        return Err(ValidationError::new(
            field,
            "may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}

pub fn require_max_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(())
}

/// Required `http://` or `https://` URL with a non-empty host part
pub fn require_http_url(field: &str, value: &str) -> Result<(), ValidationError> {
    require_non_empty(field, value)?;
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::new(field, "must start with http:// or https://"))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(ValidationError::new(field, "must contain a host"));
    }
    Ok(())
}

pub fn optional_http_url(field: &str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(url) if !url.trim().is_empty() => require_http_url(field, url),
        _ => Ok(()),
    }
}

pub fn require_hostname(field: &str, value: &str) -> Result<(), ValidationError> {
    require_non_empty(field, value)?;
    if !HOSTNAME_PATTERN.is_match(value) {
        return Err(ValidationError::new(field, "is not a valid hostname"));
    }
    Ok(())
}

pub fn require_image_name(field: &str, value: &str) -> Result<(), ValidationError> {
    require_non_empty(field, value)?;
    if !IMAGE_NAME_PATTERN.is_match(value) {
        return Err(ValidationError::new(
            field,
            "must be lowercase letters, digits and '.', '_', '-' separators",
        ));
    }
    Ok(())
}

pub fn require_port(field: &str, port: u32) -> Result<(), ValidationError> {
    if port == 0 || port > 65535 {
        return Err(ValidationError::new(field, "must be between 1 and 65535"));
    }
    Ok(())
}

/// Text area content that must parse as JSON (empty is allowed)
pub fn require_json_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new(field, format!("is not valid JSON: {}", e)))
}

/// JSON value that must be an object (or absent/null)
pub fn require_json_object(
    field: &str,
    value: Option<&serde_json::Value>,
) -> Result<(), ValidationError> {
    match value {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::Object(_)) => Ok(()),
        Some(_) => Err(ValidationError::new(field, "must be a JSON object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_rejects_spaces() {
        assert!(require_name("name", "my project").is_err());
        assert!(require_name("name", "my-project_2").is_ok());
        assert!(require_name("name", "").is_err());
    }

    #[test]
    fn test_http_url() {
        assert!(require_http_url("url", "https://registry.example.com").is_ok());
        assert!(require_http_url("url", "http://10.0.0.1:5000/v2").is_ok());
        assert!(require_http_url("url", "registry.example.com").is_err());
        assert!(require_http_url("url", "https://").is_err());
        assert!(optional_http_url("url", None).is_ok());
        assert!(optional_http_url("url", Some("")).is_ok());
        assert!(optional_http_url("url", Some("ftp://x")).is_err());
    }

    #[test]
    fn test_hostname() {
        assert!(require_hostname("hostname", "web-01.prod.local").is_ok());
        assert!(require_hostname("hostname", "192.168.1.10").is_ok());
        assert!(require_hostname("hostname", "bad host").is_err());
        assert!(require_hostname("hostname", "-leading").is_err());
    }

    #[test]
    fn test_image_name() {
        assert!(require_image_name("name", "library/nginx").is_ok());
        assert!(require_image_name("name", "my.app-api").is_ok());
        assert!(require_image_name("name", "MyApp").is_err());
    }

    #[test]
    fn test_port_range() {
        assert!(require_port("port", 22).is_ok());
        assert!(require_port("port", 0).is_err());
        assert!(require_port("port", 70000).is_err());
    }

    #[test]
    fn test_json_text() {
        assert!(require_json_text("parameters", "").is_ok());
        assert!(require_json_text("parameters", r#"{"env": "prod"}"#).is_ok());
        let err = require_json_text("parameters", "{env: prod}").unwrap_err();
        assert_eq!(err.field, "parameters");
    }

    #[test]
    fn test_json_object() {
        assert!(require_json_object("config", None).is_ok());
        assert!(require_json_object("config", Some(&json!({"a": 1}))).is_ok());
        assert!(require_json_object("config", Some(&json!([1, 2]))).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("name", "is required");
        assert_eq!(err.to_string(), "invalid name: is required");
    }
}
