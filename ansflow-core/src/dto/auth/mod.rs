//! Authentication DTOs

use serde::{Deserialize, Serialize};

use crate::validation::{Validate, ValidationError, require_non_empty};

/// Body of `POST /auth/token/`
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)
    }
}

/// JWT pair returned by `POST /auth/token/`
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"***")
            .field("refresh", &self.refresh.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let req = LoginRequest {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", req);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));

        let pair = TokenPair {
            access: "eyJhbGciOi".to_string(),
            refresh: None,
        };
        assert!(!format!("{:?}", pair).contains("eyJ"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let req = LoginRequest {
            username: "admin".to_string(),
            password: " ".to_string(),
        };
        assert_eq!(req.validate().unwrap_err().field, "password");
    }
}
