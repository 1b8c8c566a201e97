//! Error types for the AnsFlow client

use ansflow_core::ValidationError;
use thiserror::Error;

use crate::session::StoreError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the AnsFlow client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The session is no longer valid; the stored token has been cleared
    #[error("Authentication required, please log in again ({redirect_to})")]
    Unauthorized {
        /// Where the user should be sent to log in
        redirect_to: String,
    },

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Request rejected before it was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Token storage could not be read or written
    #[error("Token storage error: {0}")]
    Storage(#[from] StoreError),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error invalidated the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
            || self.is_unauthorized()
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ClientError::api_error(404, "missing").is_not_found());
        assert!(ClientError::api_error(400, "bad").is_client_error());
        assert!(ClientError::api_error(502, "gateway").is_server_error());
        assert!(!ClientError::api_error(502, "gateway").is_client_error());

        let unauthorized = ClientError::Unauthorized {
            redirect_to: "/login".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(unauthorized.is_client_error());
    }

    #[test]
    fn test_validation_converts() {
        let err: ClientError = ValidationError::new("name", "is required").into();
        assert_eq!(err.to_string(), "Validation failed: invalid name: is required");
    }
}
