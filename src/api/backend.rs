//! Outbound client for the backend system of record.
//!
//! Every proxied route issues exactly one call through [`Backend::send`]. The
//! reply body is buffered so callers can decide whether a malformed payload is
//! fatal (success paths) or tolerated (error paths).

use crate::api::error::ProxyError;
use anyhow::{Context, Result};
use axum::body::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Clone)]
pub struct Backend {
    client: Client,
    base_url: Url,
}

impl Backend {
    /// Build the shared client for `base_url`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join the base URL with a fixed sub-path such as `/api/auth/me`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.endpoint(path))
    }

    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.endpoint(path))
    }

    /// Send a prepared request once and buffer the reply.
    ///
    /// # Errors
    /// Returns [`ProxyError::Transport`] if the request cannot be completed.
    #[instrument(skip_all)]
    pub async fn send(&self, request: RequestBuilder) -> Result<Reply, ProxyError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%status, bytes = body.len(), "backend replied");

        Ok(Reply { status, body })
    }

    /// Returns true when the backend answers HTTP at all, whatever the status.
    pub async fn is_reachable(&self) -> bool {
        self.client.get(self.base_url.clone()).send().await.is_ok()
    }
}

/// Buffered backend response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl Reply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body strictly.
    ///
    /// # Errors
    /// Returns [`ProxyError::InvalidJson`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ProxyError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the body, yielding `None` for empty or malformed payloads.
    #[must_use]
    pub fn lenient_json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// First non-empty string among `keys` in a JSON object body.
    #[must_use]
    pub fn text_field(&self, keys: &[&str]) -> Option<String> {
        let body = self.lenient_json()?;
        keys.iter().find_map(|key| {
            body.get(key)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        })
    }
}
