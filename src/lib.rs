// src/lib.rs
use std::env;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod client;
mod config;
mod error;
mod http;
mod infrastructure;
mod services;
mod session;

// Hoist up only the public symbol(s)
pub use client::MediaRateClient;
pub use error::{ClientError, Result};
pub use http::ApiClient;
pub use session::{SessionManager, SessionPhase};

pub use config::*;

pub use services::{
    poster_url, // ---
    BookService,
    DiscoverFilters,
    IndexedRating,
    MovieService,
    MusicSeeds,
    MusicService,
    RatingService,
    RecommendationService,
};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_file_token_store, // ---
    create_memory_token_store,
    create_noop_metrics,
    create_prom_metrics,
};

/// Build the client with backends determined by environment variables.
pub fn create_client() -> anyhow::Result<MediaRateClient> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;

    // Determine metrics implementation from environment
    let metrics_type = env::var("MEDIARATE_METRICS_TYPE").unwrap_or_else(|_| "noop".to_string());
    let metrics = if metrics_type == "prom" {
        create_prom_metrics()?
    } else {
        create_noop_metrics()?
    };

    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    // Session token survives restarts in the configured state directory
    let tokens = create_file_token_store(&config.storage.state_dir);

    let client = MediaRateClient::new(&config, tokens, metrics)?;

    Ok(client)
}
