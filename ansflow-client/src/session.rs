//! Authentication session
//!
//! The access token lives in a [`TokenStore`] under the fixed key
//! [`AUTH_TOKEN_KEY`]; the refresh token is kept under [`REFRESH_TOKEN_KEY`]
//! but never exchanged. A [`Session`] is issued at login and invalidated at
//! logout or on the first 401 response, at which point its state becomes
//! [`SessionState::LoginRequired`] carrying the login path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ansflow_core::dto::auth::TokenPair;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

/// Key of the JWT access token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Key of the (unused) refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Default login path published when a session expires
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Errors raised by token storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt token file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

/// Persistent key/value storage for tokens
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory token storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with an access token
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(AUTH_TOKEN_KEY.to_string(), token.into());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

/// Token storage backed by a JSON object on disk
///
/// The file holds the same keys a browser would keep in local storage
/// (`authToken`, `refresh_token`). A missing file reads as empty.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Observable login state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No token has been issued
    Anonymous,
    /// A token is stored and attached to requests
    Authenticated,
    /// The backend rejected the token; the user must log in again
    LoginRequired {
        /// Where the login view lives
        redirect_to: String,
    },
}

/// Authentication session shared by every clone of a client
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    store: Arc<dyn TokenStore>,
    login_path: String,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Create a session over `store`; it starts authenticated if a token is already stored
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self::with_login_path(store, DEFAULT_LOGIN_PATH)
    }

    pub fn with_login_path(store: Arc<dyn TokenStore>, login_path: impl Into<String>) -> Self {
        let initial = match store.get(AUTH_TOKEN_KEY) {
            Ok(Some(_)) => SessionState::Authenticated,
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!("Failed to read stored token: {}", e);
                SessionState::Anonymous
            }
        };
        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(SessionInner {
                store,
                login_path: login_path.into(),
                state,
            }),
        }
    }

    /// A session that keeps its token in memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// The stored access token, read fresh on every call
    pub fn token(&self) -> Option<String> {
        match self.inner.store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read stored token: {}", e);
                None
            }
        }
    }

    /// The stored refresh token
    pub fn refresh_token(&self) -> Option<String> {
        self.inner.store.get(REFRESH_TOKEN_KEY).ok().flatten()
    }

    /// Persist a freshly issued token pair
    pub fn establish(&self, tokens: &TokenPair) -> Result<(), StoreError> {
        self.inner.store.set(AUTH_TOKEN_KEY, &tokens.access)?;
        match &tokens.refresh {
            Some(refresh) => self.inner.store.set(REFRESH_TOKEN_KEY, refresh)?,
            None => self.inner.store.remove(REFRESH_TOKEN_KEY)?,
        }
        self.inner.state.send_replace(SessionState::Authenticated);
        info!("Session established");
        Ok(())
    }

    /// Explicit logout: drop both tokens
    pub fn logout(&self) -> Result<(), StoreError> {
        self.inner.store.remove(AUTH_TOKEN_KEY)?;
        self.inner.store.remove(REFRESH_TOKEN_KEY)?;
        self.inner.state.send_replace(SessionState::Anonymous);
        info!("Logged out");
        Ok(())
    }

    /// Invalidate after a 401: drop the access token and require a new login
    ///
    /// Returns the login path callers should send the user to.
    pub fn expire(&self) -> String {
        if let Err(e) = self.inner.store.remove(AUTH_TOKEN_KEY) {
            warn!("Failed to clear stored token: {}", e);
        }
        let redirect_to = self.inner.login_path.clone();
        self.inner.state.send_replace(SessionState::LoginRequired {
            redirect_to: redirect_to.clone(),
        });
        warn!("Session expired, redirecting to {}", redirect_to);
        redirect_to
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Watch state transitions (e.g. to stop background polling)
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// The login path if the session currently requires a new login
    pub fn redirect_target(&self) -> Option<String> {
        match self.state() {
            SessionState::LoginRequired { redirect_to } => Some(redirect_to),
            _ => None,
        }
    }

    pub fn login_path(&self) -> &str {
        &self.inner.login_path
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access: "access-token".to_string(),
            refresh: Some("refresh-token".to_string()),
        }
    }

    #[test]
    fn test_initial_state_follows_store() {
        let session = Session::in_memory();
        assert_eq!(session.state(), SessionState::Anonymous);

        let session = Session::new(Arc::new(MemoryTokenStore::with_token("abc")));
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_establish_and_logout() {
        let session = Session::in_memory();
        session.establish(&pair()).unwrap();
        assert_eq!(session.token().as_deref(), Some("access-token"));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh-token"));
        assert_eq!(session.state(), SessionState::Authenticated);

        session.logout().unwrap();
        assert!(session.token().is_none());
        assert!(session.refresh_token().is_none());
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_expire_clears_token_and_publishes_redirect() {
        let session = Session::in_memory();
        session.establish(&pair()).unwrap();
        let mut rx = session.subscribe();

        assert_eq!(session.expire(), "/login");
        assert!(session.token().is_none());
        assert_eq!(session.redirect_target().as_deref(), Some("/login"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            SessionState::LoginRequired {
                redirect_to: "/login".to_string()
            }
        );
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::in_memory();
        let clone = session.clone();
        session.establish(&pair()).unwrap();
        assert_eq!(clone.token().as_deref(), Some("access-token"));
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = FileTokenStore::new(&path);
        assert!(store.get(AUTH_TOKEN_KEY).unwrap().is_none());
        store.set(AUTH_TOKEN_KEY, "abc").unwrap();
        store.set(REFRESH_TOKEN_KEY, "def").unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        reopened.remove(AUTH_TOKEN_KEY).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("authToken"));
        assert!(raw.contains("refresh_token"));
    }

    #[test]
    fn test_file_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(
            store.get(AUTH_TOKEN_KEY),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
