//! Client aggregate and dependency wiring.
//!
//! This module defines the one object an embedding application holds: the
//! session manager plus one service handle per backend resource, all
//! sharing a single HTTP client, token store, and metrics implementation.
//!
//! The aggregate is built once at startup and passed by reference to every
//! consumer — explicit dependency injection in place of the global mutable
//! auth state older clients relied on.
//!
//! # Design Principles
//!
//! - **Dependency Inversion**: consumers depend on abstractions
//!   (TokenStore, Metrics traits), not concrete backends.
//! - **Immutable After Initialization**: the aggregate is wired once;
//!   per-call mutability lives inside the session manager and the rating
//!   indexes, never in the wiring.
//! - **Cheap Cloning**: the HTTP client, token store, and metrics handles
//!   are `Arc`-backed, so each service holds its own clone at no cost.

use crate::config::AppConfig;
use crate::domain::{MetricsPtr, TokenStorePtr};
use crate::error::Result;
use crate::http::ApiClient;
use crate::services::{
    BookService, MovieService, MusicService, RatingService, RecommendationService,
};
use crate::session::SessionManager;
use std::sync::Arc;

/// Fully wired MediaRate client.
///
/// # Lifecycle
///
/// 1. Created once via [`crate::create_client`] (or [`Self::new`] with
///    explicit dependencies, as the tests do)
/// 2. `session().initialize()` is awaited before the first routing decision
/// 3. Service handles are cloned out freely by views
pub struct MediaRateClient {
    /// Auth lifecycle: login, logout, registration, identity.
    session: Arc<SessionManager>,

    /// Movie catalog: search, browse, discover, details.
    movies: MovieService,

    /// Movie ratings and the caller's rating stats.
    ratings: RatingService,

    /// Music catalog and track ratings.
    music: MusicService,

    /// Book catalog and book ratings.
    books: BookService,

    /// Backend-computed movie recommendations.
    recommendations: RecommendationService,
}

impl MediaRateClient {
    // ---

    /// Wires the aggregate from explicit dependencies.
    ///
    /// # Errors
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AppConfig, tokens: TokenStorePtr, metrics: MetricsPtr) -> Result<Self> {
        // ---
        let api = ApiClient::new(&config.api, tokens.clone(), metrics.clone())?;

        let session = Arc::new(SessionManager::new(api.clone(), tokens, metrics));

        Ok(MediaRateClient {
            session,
            movies: MovieService::new(api.clone()),
            ratings: RatingService::new(api.clone()),
            music: MusicService::new(api.clone()),
            books: BookService::new(api.clone()),
            recommendations: RecommendationService::new(api),
        })
    }

    /// The shared session manager.
    pub fn session(&self) -> &Arc<SessionManager> {
        // ---
        &self.session
    }

    /// Movie catalog operations.
    pub fn movies(&self) -> &MovieService {
        // ---
        &self.movies
    }

    /// Movie rating operations.
    pub fn ratings(&self) -> &RatingService {
        // ---
        &self.ratings
    }

    /// Music catalog and rating operations.
    pub fn music(&self) -> &MusicService {
        // ---
        &self.music
    }

    /// Book catalog and rating operations.
    pub fn books(&self) -> &BookService {
        // ---
        &self.books
    }

    /// Recommendation operations.
    pub fn recommendations(&self) -> &RecommendationService {
        // ---
        &self.recommendations
    }
}
