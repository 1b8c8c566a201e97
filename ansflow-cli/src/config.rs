//! Configuration module
//!
//! Handles CLI configuration: server URL, token file and timeout.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ansflow_client::{AnsflowClient, ClientConfig, FileTokenStore, Session};
use anyhow::{Context, Result};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the AnsFlow server, without the API prefix
    pub server_url: String,
    /// Where the access token is persisted between invocations
    pub token_file: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Build a client whose session is backed by the token file
    pub fn client(&self) -> Result<AnsflowClient> {
        let config = ClientConfig::new(&self.server_url).with_timeout(self.timeout);
        let store = FileTokenStore::new(&self.token_file);
        let session = Session::with_login_path(Arc::new(store), config.login_path.clone());

        AnsflowClient::new(&config, session)
            .with_context(|| format!("Failed to create client for {}", self.server_url))
    }
}

/// `<config dir>/ansflow/credentials.json`, or the working directory when
/// the platform has no config dir
pub fn default_token_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ansflow")
        .join("credentials.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_token_file_name() {
        let path = default_token_file();
        assert!(path.ends_with("ansflow/credentials.json"));
    }

    #[test]
    fn test_client_uses_api_prefix() {
        let config = Config {
            server_url: "http://ansflow.local:8000".to_string(),
            token_file: PathBuf::from("/nonexistent/credentials.json"),
            timeout: Duration::from_secs(5),
        };
        let client = config.client().unwrap();
        assert_eq!(client.base_url(), "http://ansflow.local:8000/api/v1");
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let config = Config {
            server_url: "ansflow.local".to_string(),
            token_file: PathBuf::from("/nonexistent/credentials.json"),
            timeout: Duration::from_secs(5),
        };
        assert!(config.client().is_err());
    }
}
