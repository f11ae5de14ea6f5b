//! Normalized local index of the caller's own ratings.
//!
//! The backend exposes no idempotent upsert for music and book ratings, so
//! the client must know whether a subject was already rated before choosing
//! create or update. That knowledge lives here as a single `subject id ->
//! (rating id, stars)` map, produced at the service boundary — never
//! inferred from response shapes at call sites.
//!
//! The index is rebuilt wholesale whenever a "my ratings" list is fetched
//! and patched in place after each successful mutation. Concurrent rate
//! attempts on the same subject from one process can still lose an update;
//! that window is accepted.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// One locally known rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedRating {
    /// Server-side id of the rating row, needed for update and delete.
    pub rating_id: i64,
    /// Star value 1-5 as last seen by this client.
    pub stars: u8,
}

/// Shared map from subject id to the caller's rating of that subject.
#[derive(Clone, Default)]
pub struct RatingIndex {
    inner: Arc<RwLock<HashMap<i64, IndexedRating>>>,
}

impl RatingIndex {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// The caller's rating of `subject_id`, if known locally.
    pub fn get(&self, subject_id: i64) -> Option<IndexedRating> {
        // ---
        self.inner.read().get(&subject_id).copied()
    }

    /// Record (or overwrite) the rating for one subject.
    pub fn record(&self, subject_id: i64, rating_id: i64, stars: u8) {
        // ---
        self.inner
            .write()
            .insert(subject_id, IndexedRating { rating_id, stars });
    }

    /// Drop the entry holding `rating_id`, wherever it is keyed.
    pub fn forget_rating(&self, rating_id: i64) {
        // ---
        self.inner
            .write()
            .retain(|_, entry| entry.rating_id != rating_id);
    }

    /// Replace the whole index with entries from a freshly fetched list.
    pub fn rebuild(&self, entries: impl IntoIterator<Item = (i64, IndexedRating)>) {
        // ---
        let mut map = self.inner.write();
        map.clear();
        map.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
