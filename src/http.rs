// src/http.rs

//! Bearer-token HTTP plumbing shared by every service module.
//!
//! `ApiClient` centralizes the base URL, attaches the `Authorization`
//! header when the token store holds a token, and converts non-2xx
//! responses into [`ClientError::Api`] values carrying the status and the
//! server's error payload. There is no retry, no per-request timeout
//! override, and no cancellation; a call either resolves or rejects on the
//! strength of the network and the backend alone.

use crate::config::ApiConfig;
use crate::domain::{MetricsPtr, TokenStorePtr};
use crate::error::{ClientError, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

/// Shared HTTP client for the MediaRate backend.
///
/// Cheaply cloneable: the underlying `reqwest::Client` is an `Arc`
/// internally, and the token store and metrics handles are `Arc` aliases.
/// Every service module holds its own clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: TokenStorePtr,
    metrics: MetricsPtr,
}

impl ApiClient {
    // ---
    /// Builds a client for `config.base_url` with the configured timeout.
    pub fn new(config: &ApiConfig, tokens: TokenStorePtr, metrics: MetricsPtr) -> Result<Self> {
        // ---
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            metrics,
        })
    }

    fn url(&self, path: &str) -> String {
        // ---
        format!("{}{}", self.base_url, path)
    }

    /// Starts a request, attaching the bearer token when one is persisted.
    ///
    /// The store is consulted for every call. An in-flight request keeps
    /// whichever header value it captured here, even if a logout clears the
    /// token before the response arrives.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        // ---
        let builder = self.http.request(method, self.url(path));

        match self.tokens.read() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_raw(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<String> {
        // ---
        let start = Instant::now();

        let response = builder.send().await?;
        let status = response.status();

        self.metrics
            .record_request(start, path, method.as_str(), status.as_u16());
        tracing::debug!(method = %method, path, status = status.as_u16(), "API call");

        if !status.is_success() {
            // Preserve whatever error body the server sent; views inspect
            // it for 400 "already rated" and 404 "not found" messaging.
            let payload = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null);

            tracing::warn!(method = %method, path, status = status.as_u16(), "API call failed");
            return Err(ClientError::api(status, payload));
        }

        Ok(response.text().await?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        // ---
        let body = self.send_raw(method, path, builder).await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// GET `path`, decoding the JSON response body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        // ---
        let builder = self.request(Method::GET, path);
        self.send(Method::GET, path, builder).await
    }

    /// GET `path` with query parameters.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        // ---
        let builder = self.request(Method::GET, path).query(query);
        self.send(Method::GET, path, builder).await
    }

    /// POST a JSON body to `path`, decoding the JSON response body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        // ---
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    /// POST with no body (e.g. trigger endpoints), decoding the response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        // ---
        let builder = self.request(Method::POST, path);
        self.send(Method::POST, path, builder).await
    }

    /// PUT a JSON body to `path`, decoding the JSON response body.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        // ---
        let builder = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, builder).await
    }

    /// PATCH `path` with no body, decoding the JSON response body.
    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        // ---
        let builder = self.request(Method::PATCH, path);
        self.send(Method::PATCH, path, builder).await
    }

    /// DELETE `path`, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        // ---
        let builder = self.request(Method::DELETE, path);
        self.send_raw(Method::DELETE, path, builder).await?;

        Ok(())
    }
}
