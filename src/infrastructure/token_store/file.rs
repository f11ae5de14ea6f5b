//! File-backed session token persistence.
//!
//! The token lives in a single file named `token` inside the configured
//! state directory, surviving process restarts the way browser storage
//! survived page reloads in the original front end.

use crate::domain::{TokenStore, TokenStorePtr};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Fixed storage key: the token's file name inside the state directory.
const TOKEN_FILE_NAME: &str = "token";

/// Creates a token store persisting to `state_dir`.
///
/// The directory itself is created lazily on first `save`, so constructing
/// the store never touches the filesystem.
pub fn create(state_dir: &Path) -> TokenStorePtr {
    // ---
    Arc::new(FileTokenStore::new(state_dir))
}

pub struct FileTokenStore {
    // ---
    path: PathBuf,
}

impl FileTokenStore {
    // ---
    pub fn new(state_dir: &Path) -> Self {
        // ---
        Self {
            path: state_dir.join(TOKEN_FILE_NAME),
        }
    }
}

impl TokenStore for FileTokenStore {
    // ---
    fn save(&self, token: &str) -> Result<()> {
        // ---
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, token)?;

        tracing::debug!(path = %self.path.display(), "Session token persisted");
        Ok(())
    }

    fn read(&self) -> Option<String> {
        // ---
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();

        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn clear(&self) {
        // ---
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to clear session token");
            }
        }
    }
}
