//! File-based session state for the console.
//!
//! Persists the bearer token, the current user record (JSON-serialized, the
//! way the backend returned it) and the theme preference. The file survives
//! restarts; absence of a key is a valid "unset" state, never an error.
//!
//! # File Location
//!
//! - Windows: `~/.sales-console/session.toml`
//! - Linux/macOS: `~/.config/sales-console/session.toml`
//!
//! # Security
//!
//! - File permissions set to 0600 (owner read/write only) on Unix
//! - Only the issued token is stored, never a password
//!
//! # Invariant
//!
//! `current_user` is present only while `access_token` is present; a token
//! may exist without a user (token-only refresh). [`SessionStore::set_session`]
//! and [`SessionStore::clear_session`] maintain this.

use sales_link::User;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CLIError, Result};

/// Persisted key-value session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    /// Opaque bearer token issued at login
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,

    /// JSON-serialized user record
    #[serde(skip_serializing_if = "Option::is_none")]
    current_user: Option<String>,

    /// Theme preference: "light" or "dark"
    #[serde(skip_serializing_if = "Option::is_none")]
    app_theme: Option<String>,
}

/// File-backed session store with an in-memory cache
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
    state: SessionFile,
}

impl SessionStore {
    /// Default session file path
    /// - Windows: `~/.sales-console/session.toml`
    /// - Linux/macOS: `~/.config/sales-console/session.toml`
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".sales-console").join("session.toml")
            } else {
                PathBuf::from(".sales-console").join("session.toml")
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("sales-console").join("session.toml")
            } else if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("sales-console")
                    .join("session.toml")
            } else {
                PathBuf::from(".sales-console").join("session.toml")
            }
        }
    }

    /// Create a store at the default location
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_path())
    }

    /// Create a store at a custom location
    pub fn with_path(file_path: PathBuf) -> Result<Self> {
        let mut store = Self {
            file_path,
            state: SessionFile::default(),
        };
        store.load_from_disk()?;
        Ok(store)
    }

    fn load_from_disk(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            self.state = SessionFile::default();
            return Ok(());
        }

        let contents = fs::read_to_string(&self.file_path).map_err(|e| {
            CLIError::Configuration(format!(
                "Failed to read session file at '{}': {e}",
                self.file_path.display()
            ))
        })?;

        self.state = toml::from_str(&contents).map_err(|e| {
            CLIError::Configuration(format!(
                "Corrupted session file at '{}': {e}",
                self.file_path.display()
            ))
        })?;
        Ok(())
    }

    fn save_to_disk(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.state)
            .map_err(|e| CLIError::Configuration(format!("Failed to serialize session: {e}")))?;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CLIError::Configuration(format!(
                    "Failed to create session directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(&self.file_path, contents).map_err(|e| {
            CLIError::Configuration(format!(
                "Failed to write session file at '{}': {e}",
                self.file_path.display()
            ))
        })?;

        // Owner read/write only; the file holds a live token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.file_path, permissions).map_err(|e| {
                CLIError::Configuration(format!(
                    "Failed to set permissions for '{}': {e}",
                    self.file_path.display()
                ))
            })?;
        }

        Ok(())
    }

    /// The stored bearer token, if any
    pub fn token(&self) -> Option<&str> {
        self.state.access_token.as_deref()
    }

    /// The stored user record. Malformed stored JSON is treated as absent.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.state.current_user.as_deref()?;
        serde_json::from_str(raw).ok()
    }

    /// The stored theme preference, if any
    pub fn theme(&self) -> Option<&str> {
        self.state.app_theme.as_deref()
    }

    /// Persist a fresh session after login.
    ///
    /// A `None` user records a token-only session.
    pub fn set_session(&mut self, token: &str, user: Option<&User>) -> Result<()> {
        self.state.access_token = Some(token.to_string());
        self.state.current_user = match user {
            Some(u) => Some(serde_json::to_string(u)?),
            None => None,
        };
        self.save_to_disk()
    }

    /// Remove token and user. The theme preference survives.
    ///
    /// Safe to call when the session is already clear.
    pub fn clear_session(&mut self) -> Result<()> {
        if self.state.access_token.is_none() && self.state.current_user.is_none() {
            return Ok(());
        }
        self.state.access_token = None;
        self.state.current_user = None;
        self.save_to_disk()
    }

    /// Persist the theme preference
    pub fn set_theme(&mut self, theme: &str) -> Result<()> {
        self.state.app_theme = Some(theme.to_string());
        self.save_to_disk()
    }

    /// The file path used by this store
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: "Alice Souza".to_string(),
            role: "ADMIN".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn create_temp_store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.toml");
        let store = SessionStore::with_path(file_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_unset_keys_are_valid() {
        let (store, _temp_dir) = create_temp_store();
        assert_eq!(store.token(), None);
        assert!(store.current_user().is_none());
        assert_eq!(store.theme(), None);
    }

    #[test]
    fn test_set_and_clear_session() {
        let (mut store, _temp_dir) = create_temp_store();
        let user = sample_user();

        store.set_session("tok.abc.sig", Some(&user)).unwrap();
        assert_eq!(store.token(), Some("tok.abc.sig"));
        assert_eq!(store.current_user().unwrap().username, "alice");

        store.clear_session().unwrap();
        assert_eq!(store.token(), None);
        assert!(store.current_user().is_none());

        // idempotent
        store.clear_session().unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_token_only_session() {
        let (mut store, _temp_dir) = create_temp_store();
        store.set_session("refresh-token", None).unwrap();
        assert_eq!(store.token(), Some("refresh-token"));
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_theme_survives_clear() {
        let (mut store, _temp_dir) = create_temp_store();
        store.set_theme("dark").unwrap();
        store.set_session("tok", Some(&sample_user())).unwrap();
        store.clear_session().unwrap();
        assert_eq!(store.theme(), Some("dark"));
    }

    #[test]
    fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.toml");

        {
            let mut store = SessionStore::with_path(file_path.clone()).unwrap();
            store.set_session("persisted", Some(&sample_user())).unwrap();
        }

        let store = SessionStore::with_path(file_path).unwrap();
        assert_eq!(store.token(), Some("persisted"));
        assert_eq!(store.current_user().unwrap().email, "alice@example.com");
    }

    #[test]
    fn test_malformed_user_json_treated_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.toml");
        fs::write(
            &file_path,
            "access_token = \"tok\"\ncurrent_user = \"{not json\"\n",
        )
        .unwrap();

        let store = SessionStore::with_path(file_path).unwrap();
        assert_eq!(store.token(), Some("tok"));
        assert!(store.current_user().is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (mut store, _temp_dir) = create_temp_store();
        store.set_session("tok", None).unwrap();

        let metadata = fs::metadata(store.path()).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    }
}
