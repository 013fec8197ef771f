//! Login session: one opaque token persisted in durable client-side storage.
//!
//! The presence of a token is the whole authentication check: no format
//! validation, no expiry. State is derived once from storage by
//! [`Session::restore`] and afterwards changes only through
//! [`Session::login`] and [`Session::logout`].

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use thiserror::Error;

/// Storage key (file name) holding the session token.
pub const TOKEN_KEY: &str = "vulkan_token";

/// Session storage errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("No configuration directory available for token storage")]
    NoConfigDir,
}

/// Durable storage for a single token.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Returns the stored token, if any.
    fn load(&self) -> Result<Option<String>, SessionError>;

    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Removes the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token persisted as a single file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/vulkan/vulkan_token`.
    pub fn default_location() -> Result<Self, SessionError> {
        let dir = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
        Ok(Self::new(dir.join("vulkan").join(TOKEN_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(non_blank(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        log::debug!("session token written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token slot for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.clone().and_then(non_blank))
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

fn non_blank(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Authentication state of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { token: String },
}

/// Shared handle to the login session.
///
/// Clones observe the same state.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    state: Arc<RwLock<SessionState>>,
}

impl Session {
    /// Derive the initial state from whatever token is already stored.
    pub fn restore(store: Arc<dyn TokenStore>) -> Result<Self, SessionError> {
        let state = match store.load()? {
            Some(token) => SessionState::Authenticated { token },
            None => SessionState::Unauthenticated,
        };
        log::debug!(
            "session restored: authenticated={}",
            matches!(state, SessionState::Authenticated { .. })
        );
        Ok(Self {
            store,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Session backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryTokenStore::new()),
            state: Arc::new(RwLock::new(SessionState::Unauthenticated)),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), SessionState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<String> {
        match self.state() {
            SessionState::Authenticated { token } => Some(token),
            SessionState::Unauthenticated => None,
        }
    }

    /// Persist `token` and become authenticated.
    pub fn login(&self, token: &str) -> Result<(), SessionError> {
        self.store.save(token)?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            SessionState::Authenticated {
                token: token.to_string(),
            };
        log::info!("logged in");
        Ok(())
    }

    /// Clear the stored token and become unauthenticated.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            SessionState::Unauthenticated;
        log::info!("logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_without_token_is_unauthenticated() {
        let session = Session::restore(Arc::new(MemoryTokenStore::new())).unwrap();
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(session.token().is_none());
    }

    #[test]
    fn restore_with_token_is_authenticated() {
        let session =
            Session::restore(Arc::new(MemoryTokenStore::with_token("fake-jtw-token"))).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("fake-jtw-token"));
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let session = Session::restore(Arc::new(MemoryTokenStore::with_token("  \n"))).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn login_and_logout_update_store_and_state() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = Session::restore(store.clone()).unwrap();

        session.login("abc").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clones_share_state() {
        let session = Session::in_memory();
        let other = session.clone();
        session.login("abc").unwrap();
        assert!(other.is_authenticated());
    }

    #[test]
    fn file_store_round_trips_and_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(TOKEN_KEY);

        let session = Session::restore(Arc::new(FileTokenStore::new(&path))).unwrap();
        assert!(!session.is_authenticated());
        session.login("fake-jtw-token").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fake-jtw-token");

        let restarted = Session::restore(Arc::new(FileTokenStore::new(&path))).unwrap();
        assert_eq!(restarted.token().as_deref(), Some("fake-jtw-token"));

        restarted.logout().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join(TOKEN_KEY));
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
