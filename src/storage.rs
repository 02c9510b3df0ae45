//! Persisted client state: the session credential and the appearance flag
//!
//! Stored as a small YAML file in the data directory. Writes happen on every
//! mutation; read failures fall back to an empty state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::constants::STATE_FILE;

/// Storage shared between the app layer (writer) and the gateway (token reader)
pub type SharedStorage = Arc<Mutex<Storage>>;

/// Lock shared storage, recovering the data if a previous holder panicked
pub fn lock(storage: &SharedStorage) -> MutexGuard<'_, Storage> {
    storage.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    is_logged_in: bool,
    #[serde(default)]
    dark_mode: bool,
}

/// File-backed key/value state
pub struct Storage {
    state: PersistedState,
    path: Option<PathBuf>,
}

impl Storage {
    /// Open the state file in `dir`, starting empty if it is missing or unreadable
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STATE_FILE);
        let state = match fs::read_to_string(&path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt state file");
                PersistedState::default()
            }),
            Err(_) => PersistedState::default(),
        };

        Storage {
            state,
            path: Some(path),
        }
    }

    /// Storage that never touches the filesystem
    pub fn in_memory() -> Self {
        Storage {
            state: PersistedState::default(),
            path: None,
        }
    }

    pub fn shared(self) -> SharedStorage {
        Arc::new(Mutex::new(self))
    }

    /// Cached bearer token, if any
    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    /// Cache a credential after login/register
    pub fn store_credential(&mut self, token: impl Into<String>) -> Result<()> {
        self.state.token = Some(token.into());
        self.state.is_logged_in = true;
        self.save()
    }

    /// Replace the token only (profile update after a password change)
    pub fn replace_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.state.token = Some(token.into());
        self.save()
    }

    /// Forget the credential (logout or failed session initialization)
    pub fn clear_credential(&mut self) -> Result<()> {
        self.state.token = None;
        self.state.is_logged_in = false;
        self.save()
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> Result<()> {
        self.state.dark_mode = dark;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }
        let content = serde_yaml::to_string(&self.state)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open(dir.path());
        assert!(storage.token().is_none());

        storage.store_credential("abc123").unwrap();
        storage.set_dark_mode(true).unwrap();

        let reopened = Storage::open(dir.path());
        assert_eq!(reopened.token(), Some("abc123"));
        assert!(reopened.is_logged_in());
        assert!(reopened.dark_mode());
    }

    #[test]
    fn test_clear_credential_keeps_theme() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open(dir.path());
        storage.store_credential("abc123").unwrap();
        storage.set_dark_mode(true).unwrap();
        storage.clear_credential().unwrap();

        let reopened = Storage::open(dir.path());
        assert!(reopened.token().is_none());
        assert!(!reopened.is_logged_in());
        assert!(reopened.dark_mode());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STATE_FILE), "token: [unclosed").unwrap();
        let storage = Storage::open(dir.path());
        assert!(storage.token().is_none());
        assert!(!storage.dark_mode());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let mut storage = Storage::in_memory();
        storage.store_credential("").unwrap();
        assert!(storage.token().is_none());
    }
}
