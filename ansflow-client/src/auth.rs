//! Authentication endpoints

use ansflow_core::Validate;
use ansflow_core::dto::auth::{LoginRequest, TokenPair};
use tracing::info;

use crate::AnsflowClient;
use crate::error::Result;
use crate::session::SessionState;

impl AnsflowClient {
    // =============================================================================
    // Authentication
    // =============================================================================

    /// Obtain a JWT pair and store it in the session
    ///
    /// Stores the access token under `authToken` and the refresh token under
    /// `refresh_token`. A 401 answer expires the session like any other call.
    ///
    /// # Example
    /// ```no_run
    /// # use ansflow_client::{AnsflowClient, ClientConfig, Session};
    /// # async fn example() -> Result<(), ansflow_client::ClientError> {
    /// let client = AnsflowClient::new(&ClientConfig::default(), Session::in_memory())?;
    /// client.login("admin", "admin123").await?;
    /// assert!(client.is_authenticated());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        req.validate()?;

        let tokens: TokenPair = self.post("/auth/token/", &req).await?;
        self.session.establish(&tokens)?;
        info!("Logged in as {}", username);

        Ok(tokens)
    }

    /// Drop the stored tokens
    pub fn logout(&self) -> Result<()> {
        self.session.logout()?;
        Ok(())
    }

    /// Whether a token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
            && !matches!(self.session.state(), SessionState::LoginRequired { .. })
    }
}
