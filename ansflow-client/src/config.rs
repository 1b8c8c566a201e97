//! Client configuration
//!
//! Transport settings shared by every request: server URL, API prefix,
//! timeout and the login path published when a session expires.

use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::session::DEFAULT_LOGIN_PATH;

/// Default API prefix appended to the server URL
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// AnsFlow client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub server_url: String,

    /// Path prefix of the REST API
    pub api_prefix: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Where the user is sent after a 401
    pub login_path: String,
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - ANSFLOW_URL (optional, default: http://localhost:8000)
    /// - ANSFLOW_API_PREFIX (optional, default: /api/v1)
    /// - ANSFLOW_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> Self {
        let server_url =
            std::env::var("ANSFLOW_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

        let api_prefix =
            std::env::var("ANSFLOW_API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string());

        let timeout = std::env::var("ANSFLOW_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            server_url,
            api_prefix,
            timeout,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Full base URL of the API, without a trailing slash
    pub fn api_base_url(&self) -> String {
        let server = self.server_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            server.to_string()
        } else {
            format!("{}/{}", server, prefix)
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(ClientError::InvalidConfig(
                "server_url cannot be empty".to_string(),
            ));
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ClientError::InvalidConfig(
                "server_url must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "timeout must be greater than 0".to_string(),
            ));
        }

        if !self.login_path.starts_with('/') {
            return Err(ClientError::InvalidConfig(
                "login_path must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_base_url(), "http://localhost:8000/api/v1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_base_url_normalizes_slashes() {
        let config = ClientConfig::new("http://ansflow.local/").with_api_prefix("api/v1/");
        assert_eq!(config.api_base_url(), "http://ansflow.local/api/v1");

        let config = ClientConfig::new("http://ansflow.local").with_api_prefix("");
        assert_eq!(config.api_base_url(), "http://ansflow.local");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();
        assert!(config.validate().is_ok());

        config.server_url = "ansflow.local".to_string();
        assert!(config.validate().is_err());

        config.server_url = "https://ansflow.local".to_string();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config.timeout = Duration::from_secs(5);
        config.login_path = "login".to_string();
        assert!(config.validate().is_err());
    }
}
