//! Authentication session and its persisted token.
//!
//! The session has two states, anonymous and authenticated. All transitions go
//! through [`Session::sign_in`], [`Session::sign_out`] and [`Session::expire`],
//! which keep the in-memory state and the persisted token in step.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// In-memory session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
    },
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user asked to log out.
    Logout,
    /// A protected call was rejected with 401.
    Expired,
}

/// On-disk shape of the session file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

/// File holding the single durable token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$SHELF_HOME/session.json`.
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted token. A missing file means no token.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;
        let stored: StoredSession = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        Ok(stored.access_token.filter(|t| !t.is_empty()))
    }

    /// Persists the token with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let stored = StoredSession {
            access_token: Some(token.to_string()),
        };
        let contents =
            serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted token. Returns whether one was present.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}

/// Session context passed explicitly to everything that needs the token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    store: Option<SessionStore>,
}

impl Session {
    /// Restores the session from the default store.
    ///
    /// # Errors
    /// Returns an error if the session file is unreadable.
    pub fn load() -> Result<Self> {
        Self::load_from(SessionStore::default_location())
    }

    /// Restores the session from `store`.
    ///
    /// # Errors
    /// Returns an error if the session file is unreadable.
    pub fn load_from(store: SessionStore) -> Result<Self> {
        let state = match store.load()? {
            Some(token) => SessionState::Authenticated { token },
            None => SessionState::Anonymous,
        };
        Ok(Self {
            state,
            store: Some(store),
        })
    }

    /// Session that never touches disk.
    pub fn ephemeral(token: Option<String>) -> Self {
        Self {
            state: token.map_or(SessionState::Anonymous, |token| {
                SessionState::Authenticated { token }
            }),
            store: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    /// Anonymous -> Authenticated.
    ///
    /// The in-memory state changes even if persisting fails.
    ///
    /// # Errors
    /// Returns an error if the token cannot be persisted.
    pub fn sign_in(&mut self, token: String) -> Result<()> {
        tracing::info!(token = %mask_token(&token), "session started");
        let persisted = match &self.store {
            Some(store) => store.save(&token),
            None => Ok(()),
        };
        self.state = SessionState::Authenticated { token };
        persisted
    }

    /// Authenticated -> Anonymous after an explicit logout.
    ///
    /// # Errors
    /// Returns an error if the persisted token cannot be removed.
    pub fn sign_out(&mut self) -> Result<()> {
        self.end(SignOutReason::Logout)
    }

    /// Authenticated -> Anonymous after the backend rejected the token.
    ///
    /// # Errors
    /// Returns an error if the persisted token cannot be removed.
    pub fn expire(&mut self) -> Result<()> {
        self.end(SignOutReason::Expired)
    }

    fn end(&mut self, reason: SignOutReason) -> Result<()> {
        tracing::info!(?reason, "session ended");
        self.state = SessionState::Anonymous;
        match &self.store {
            Some(store) => store.clear().map(drop),
            None => Ok(()),
        }
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 16 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_sign_in_persists_token() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let mut session = Session::load_from(store.clone()).unwrap();
        assert!(!session.is_authenticated());

        session.sign_in("tok-abc".to_string()).unwrap();
        assert_eq!(session.token(), Some("tok-abc"));
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-abc"));

        let restored = Session::load_from(store).unwrap();
        assert!(restored.is_authenticated());
    }

    #[test]
    fn test_expire_clears_persisted_token() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save("stale").unwrap();

        let mut session = Session::load_from(store.clone()).unwrap();
        assert_eq!(session.token(), Some("stale"));

        session.expire().unwrap();
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_sign_out_without_file_is_ok() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let mut session = Session::load_from(store.clone()).unwrap();
        session.sign_out().unwrap();
        assert!(!store.clear().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        store.save("secret").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_empty_token_reads_as_anonymous() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"access_token": ""}"#).unwrap();

        let session = Session::load_from(SessionStore::new(path)).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{").unwrap();

        let err = Session::load_from(SessionStore::new(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse session"));
    }

    #[test]
    fn test_ephemeral_session_transitions() {
        let mut session = Session::ephemeral(None);
        session.sign_in("t".to_string()).unwrap();
        assert!(session.is_authenticated());
        session.sign_out().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbGciOiJI...");
        assert_eq!(mask_token("short"), "***");
    }
}
