use crate::error::Result;
use std::sync::Arc;

/// Abstraction for session-token persistence.
///
/// The store holds at most one opaque token at a time, under a fixed key.
/// Presence of a token is the authentication signal consulted before the
/// first identity check completes, so reads must be cheap and synchronous.
pub trait TokenStore: Send + Sync + 'static {
    // ---
    /// Persist the token, replacing any previous one. No expiry is applied;
    /// the backend alone decides when a token stops being valid.
    fn save(&self, token: &str) -> Result<()>;

    /// The currently persisted token, or `None`. Read failures are treated
    /// as absence.
    fn read(&self) -> Option<String>;

    /// Remove the persisted token. Removing an absent token is a no-op.
    fn clear(&self);
}

/// Type alias for any backend that implements TokenStore.
pub type TokenStorePtr = Arc<dyn TokenStore>;
