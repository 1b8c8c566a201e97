//! AnsFlow HTTP Client
//!
//! A type-safe client for the AnsFlow REST API. Every call the CLI makes
//! goes through [`AnsflowClient`], which:
//!
//! - prefixes paths with the configured API base (`<server>/api/v1`)
//! - attaches `Authorization: Bearer <token>` when the session holds a token
//! - clears the token and publishes a login redirect on any 401 response
//! - unwraps paginated `{results: [...]}` envelopes so list methods always
//!   return a `Vec`
//!
//! There is no caching, retry or request deduplication: every
//! call is a fresh round trip.
//!
//! # Example
//!
//! ```no_run
//! use ansflow_client::{AnsflowClient, ClientConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ansflow_client::ClientError> {
//!     let client = AnsflowClient::new(&ClientConfig::default(), Session::in_memory())?;
//!     client.login("admin", "admin").await?;
//!
//!     for inventory in client.get_ansible_inventories().await? {
//!         println!("{} ({})", inventory.name, inventory.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod collection;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;

mod analytics;
mod ansible;
mod auth;
mod cicd;
mod docker;
mod pipelines;
mod projects;

// Re-export commonly used types
pub use collection::{Resource, ResourceTable};
pub use config::ClientConfig;
pub use dashboard::{DashboardPoller, DashboardSnapshot};
pub use error::{ClientError, Result};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionState, TokenStore};

use ansflow_core::dto::ActionResult;
use ansflow_core::{ListResponse, Page};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the AnsFlow API
///
/// Cloning is cheap; clones share the connection pool and the session.
/// Resource methods are organized by backend app:
/// - Authentication (login, logout)
/// - CI/CD tools, atomic steps and pipeline executions
/// - Pipelines and parallel groups
/// - Ansible inventories, playbooks, credentials, hosts, groups, executions
/// - Docker registries, images, containers, compose projects
/// - Projects, members and environments
/// - Analytics
#[derive(Debug, Clone)]
pub struct AnsflowClient {
    /// API base URL (e.g., "http://localhost:8000/api/v1")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Token storage and login state
    session: Session,
}

impl AnsflowClient {
    /// Create a new client from configuration
    ///
    /// Builds the shared transport with the configured timeout and JSON
    /// `Content-Type`/`Accept` headers.
    ///
    /// # Example
    /// ```
    /// use ansflow_client::{AnsflowClient, ClientConfig, Session};
    ///
    /// let client = AnsflowClient::new(&ClientConfig::default(), Session::in_memory()).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
    /// ```
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(config.api_base_url(), client, session))
    }

    /// Create a client with a custom HTTP client
    ///
    /// `base_url` must already include the API prefix.
    pub fn with_client(base_url: impl Into<String>, client: Client, session: Session) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session whose token is attached to requests
    pub fn session(&self) -> &Session {
        &self.session
    }

    // =============================================================================
    // Request Pipeline
    // =============================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request and attach the bearer token if one is stored
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self.client.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request, expiring the session on 401
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let response = builder.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let redirect_to = self.session.expire();
            return Err(ClientError::Unauthorized { redirect_to });
        }

        Ok(response)
    }

    // =============================================================================
    // Verbs
    // =============================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        self.handle_response(response).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        self.handle_response(response).await
    }

    /// GET a list endpoint, unwrapping any envelope
    pub(crate) async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let response: ListResponse<T> = self.get(path).await?;
        Ok(response.into_items())
    }

    pub(crate) async fn list_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response: ListResponse<T> = self.get_with_query(path, query).await?;
        Ok(response.into_items())
    }

    /// GET a list endpoint, keeping the pagination counters
    pub(crate) async fn list_page<T, Q>(&self, path: &str, query: &Q) -> Result<Page<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response: ListResponse<T> = self.get_with_query(path, query).await?;
        Ok(response.into_page())
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PATCH, path).json(body))
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        self.handle_empty_response(response).await
    }

    /// POST to an action endpoint without a body
    pub(crate) async fn post_action(&self, path: &str) -> Result<ActionResult> {
        let response = self.send(self.request(Method::POST, path)).await?;
        self.handle_action_response(response).await
    }

    /// POST to an action endpoint with a JSON body
    pub(crate) async fn post_action_with<B>(&self, path: &str, body: &B) -> Result<ActionResult>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        self.handle_action_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await?;
        Ok(())
    }

    /// Handle an action response; an empty body counts as a bare success
    async fn handle_action_response(&self, response: reqwest::Response) -> Result<ActionResult> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;

        if body.trim().is_empty() {
            return Ok(ActionResult::default());
        }

        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse action response: {}", e)))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                extract_error_message(&error_text),
            ));
        }

        Ok(response)
    }
}

/// Pull a readable message out of a backend error body
///
/// Django REST Framework answers with `{"detail": "..."}`, `{"error": "..."}`
/// or a map of field names to message lists.
fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    for key in ["detail", "error", "message"] {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }

    if let Some(fields) = value.as_object() {
        let parts: Vec<String> = fields
            .iter()
            .map(|(field, errors)| {
                let text = match errors {
                    serde_json::Value::Array(items) => items
                        .iter()
                        .map(|i| i.as_str().map(str::to_string).unwrap_or_else(|| i.to_string()))
                        .collect::<Vec<_>>()
                        .join(" "),
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                format!("{}: {}", field, text)
            })
            .collect();
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AnsflowClient::new(&ClientConfig::default(), Session::in_memory()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = AnsflowClient::with_client(
            "http://localhost:8000/api/v1/",
            Client::new(),
            Session::in_memory(),
        );
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::new("localhost:8000");
        assert!(matches!(
            AnsflowClient::new(&config, Session::in_memory()),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"detail": "Not found."}"#),
            "Not found."
        );
        assert_eq!(
            extract_error_message(r#"{"name": ["This field must be unique."]}"#),
            "name: This field must be unique."
        );
        assert_eq!(extract_error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
