// src/config.rs

//! Client configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the SDK.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
///
/// Missing configuration is treated as a deployment error,
/// not a recoverable runtime condition.
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
///
/// This macro is intended for config unit tests only and enforces
/// consistent error messages across failure cases.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated client configuration.
///
/// This is the single source of truth for startup configuration.
/// All required configuration is validated eagerly during initialization.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: api::ApiConfig,
    pub storage: storage::StorageConfig,
}

impl AppConfig {
    /// Loads and validates all client configuration from the environment.
    ///
    /// A `.env` file in the working directory is honored when present.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        dotenvy::dotenv().ok();

        Ok(Self {
            api: api::ApiConfig::from_env()?,
            storage: storage::StorageConfig::from_env()?,
        })
    }
}

// ============================================================
// API configuration
// ============================================================

mod api {
    // ---
    use super::*;

    /// Backend API configuration derived from environment variables.
    ///
    /// The base URL is required for the client to function and is
    /// validated eagerly during startup.
    #[derive(Debug, Clone)]
    pub struct ApiConfig {
        /// Base URL of the MediaRate backend (e.g. https://api.example.com/api/v1).
        pub base_url: String,

        /// Overall timeout applied to every outgoing request. Defaults to 30 seconds.
        pub timeout: Duration,
    }

    impl ApiConfig {
        /// Builds an [`ApiConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if required configuration is missing.
        /// Startup will fail fast rather than continuing with incomplete
        /// or invalid configuration.
        pub fn from_env() -> Result<Self> {
            // ---
            let base_url = required_env!("MEDIARATE_API_URL");
            let timeout_secs = optional_env_parse!("MEDIARATE_HTTP_TIMEOUT_SEC", u64, 30);

            Ok(Self {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            })
        }
    }
}
pub use api::ApiConfig;

// ============================================================
// Storage configuration
// ============================================================

mod storage {
    // ---
    use super::*;

    /// Local persistence configuration.
    ///
    /// The state directory holds the session token file that survives
    /// process restarts; it plays the role the browser's persistent
    /// key-value storage played in the original front end.
    #[derive(Debug, Clone)]
    pub struct StorageConfig {
        /// Directory holding client-side persisted state (the session token).
        pub state_dir: PathBuf,
    }

    impl StorageConfig {
        /// Builds a [`StorageConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if required configuration is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let state_dir = required_env!("MEDIARATE_STATE_DIR");

            Ok(Self {
                state_dir: PathBuf::from(state_dir),
            })
        }
    }
}
pub use storage::StorageConfig;

// ============================================================
// Tests
// ============================================================
