// src/error.rs

//! Error type shared by every client operation.
//!
//! Service modules never catch errors themselves; whatever the HTTP layer
//! produces propagates unchanged to the caller, which owns user-facing
//! messaging. The `Api` variant keeps the raw status and server payload so
//! callers can special-case responses such as 400 "already rated" or
//! 404 "not found".

use reqwest::StatusCode;

/// Error returned by all client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("API error {status}: {payload}")]
    Api {
        status: StatusCode,
        /// Server-supplied error body, `Null` when the body was not JSON.
        payload: serde_json::Value,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response carried a body we could not decode.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The persistent token store failed.
    #[error("token storage error: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl ClientError {
    // ---
    /// Build an `Api` error from a status and whatever body the server sent.
    pub fn api(status: StatusCode, payload: serde_json::Value) -> Self {
        // ---
        Self::Api { status, payload }
    }

    /// Status code of the server response, if this is an `Api` error.
    pub fn status(&self) -> Option<StatusCode> {
        // ---
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server answered with exactly `code`.
    pub fn is_status(&self, code: u16) -> bool {
        // ---
        self.status().map(|s| s.as_u16() == code).unwrap_or(false)
    }

    /// The `detail` field of the server's error payload, when present.
    ///
    /// The MediaRate backend reports human-readable failures as
    /// `{"detail": "..."}`; this is what views surface for duplicate-rating
    /// and credential errors.
    pub fn detail(&self) -> Option<&str> {
        // ---
        match self {
            Self::Api { payload, .. } => payload.get("detail").and_then(|d| d.as_str()),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
