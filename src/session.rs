//! Session lifecycle for authenticated users.
//!
//! A single `SessionManager` is constructed at process start and shared by
//! reference with every consumer, replacing the global mutable auth state
//! of older clients. The startup sequence walks an explicit state machine:
//!
//! ```text
//! Unchecked -> Checking -> { Authenticated, Anonymous }
//! ```
//!
//! `initialize` must complete before any route-guarding decision is made.

use crate::domain::{MetricsPtr, Token, TokenStorePtr, User};
use crate::error::Result;
use crate::http::ApiClient;
use parking_lot::RwLock;
use serde::Serialize;

// ---

/// Where the session stands in its startup lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Process start; persisted state not yet consulted.
    Unchecked,
    /// A persisted token is being validated against `/auth/me`.
    Checking,
    /// Identity confirmed by the backend.
    Authenticated,
    /// No session, or the persisted one was rejected.
    Anonymous,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    //
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    //
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

// ---

/// Login, logout, registration, and identity state for one user session.
pub struct SessionManager {
    client: ApiClient,
    tokens: TokenStorePtr,
    metrics: MetricsPtr,
    phase: RwLock<SessionPhase>,
    user: RwLock<Option<User>>,
}

impl SessionManager {
    // ---
    pub fn new(client: ApiClient, tokens: TokenStorePtr, metrics: MetricsPtr) -> Self {
        // ---
        Self {
            client,
            tokens,
            metrics,
            phase: RwLock::new(SessionPhase::Unchecked),
            user: RwLock::new(None),
        }
    }

    /// Restores a persisted session, if any, before the first routing
    /// decision.
    ///
    /// With a stored token the identity is fetched from `/auth/me`; a
    /// rejected token is cleared and never retried — the session silently
    /// demotes to [`SessionPhase::Anonymous`] rather than surfacing an
    /// error.
    pub async fn initialize(&self) -> SessionPhase {
        // ---
        *self.phase.write() = SessionPhase::Checking;

        let phase = match self.tokens.read() {
            None => SessionPhase::Anonymous,
            Some(_) => match self.current_user().await {
                Ok(user) => {
                    tracing::info!(username = %user.username, "Session restored");
                    SessionPhase::Authenticated
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Persisted token rejected; demoting to anonymous");
                    self.tokens.clear();
                    *self.user.write() = None;
                    SessionPhase::Anonymous
                }
            },
        };

        *self.phase.write() = phase;
        phase
    }

    /// Exchanges credentials for a token, persists it, and fetches the
    /// caller's identity.
    ///
    /// # Errors
    /// Propagates the HTTP error if either call fails. A failed credential
    /// exchange leaves no token persisted. A failed identity fetch *after*
    /// a successful exchange leaves the token in place ("best-effort
    /// authenticated"); callers may retry [`Self::current_user`] later.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        // ---
        let token: Token = self
            .client
            .post("/auth/login", &LoginRequest { email, password })
            .await?;

        self.tokens.save(&token.access_token)?;
        self.metrics.record_login();

        let user = self.current_user().await?;

        *self.phase.write() = SessionPhase::Authenticated;
        tracing::info!(username = %user.username, "Login succeeded");

        Ok(user)
    }

    /// Creates a new account. Does not log the new user in.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        // ---
        let user: User = self
            .client
            .post(
                "/auth/register",
                &RegisterRequest {
                    username,
                    email,
                    password,
                },
            )
            .await?;

        tracing::info!(username = %user.username, "Account registered");
        Ok(user)
    }

    /// Drops the session client-side: clears the persisted token and the
    /// cached identity. The backend is not told; token invalidation is
    /// entirely expiry-driven on the server.
    pub fn logout(&self) {
        // ---
        self.tokens.clear();
        *self.user.write() = None;
        *self.phase.write() = SessionPhase::Anonymous;

        tracing::info!("Logged out");
    }

    /// Fetches the caller's identity from `/auth/me` and caches it.
    ///
    /// Idempotent for an unchanged valid token: two successive calls yield
    /// the same record.
    pub async fn current_user(&self) -> Result<User> {
        // ---
        let user: User = self.client.get("/auth/me").await?;

        *self.user.write() = Some(user.clone());
        Ok(user)
    }

    /// The identity cached by the last successful fetch, if any.
    pub fn cached_user(&self) -> Option<User> {
        // ---
        self.user.read().clone()
    }

    /// Synchronous predicate: is a token currently persisted?
    ///
    /// Deliberately does not consult the server, so a revoked token yields
    /// a false positive until the next authenticated call fails.
    pub fn is_authenticated(&self) -> bool {
        // ---
        self.tokens.read().is_some()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        // ---
        *self.phase.read()
    }
}
