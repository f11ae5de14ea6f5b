//! In-memory token store for tests and non-persistent sessions.

use crate::domain::{TokenStore, TokenStorePtr};
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Creates a token store that forgets everything on drop.
///
/// Useful for tests and for callers that explicitly do not want the
/// session to survive the process.
pub fn create() -> TokenStorePtr {
    // ---
    Arc::new(MemoryTokenStore::new())
}

#[derive(Default)]
pub struct MemoryTokenStore {
    // ---
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    // ---
    fn save(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}
