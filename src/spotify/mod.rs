//! # Spotify Integration Module
//!
//! Thin client over the Spotify Web API and accounts service, shared by the
//! proxy handlers and the client commands.
//!
//! ```text
//! Proxy handlers / CLI / importer / player
//!          ↓
//! SpotifyClient
//!     ├── auth     (authorize URL, code exchange, current user)
//!     ├── catalog  (playlists, albums, browse, search, recently played)
//!     └── player   (playback control endpoints, current playback)
//!          ↓
//! reqwest → Spotify Web API
//! ```
//!
//! Every request is a single call: there is no retry and no caching. A
//! non-2xx answer becomes [`SpotifyError::Status`] carrying the provider's
//! status and body untouched, so callers can pass it through or key their
//! messages on it.

pub mod auth;
pub mod catalog;
pub mod player;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify answered {status}: {body}")]
    Status { status: StatusCode, body: Value },

    #[error("request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected answer from Spotify: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SpotifyError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SpotifyError::Status { status, .. } => Some(*status),
            SpotifyError::Http(e) => e.status(),
            SpotifyError::Decode(_) => None,
        }
    }
}

/// Handle on the Spotify services.
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    accounts_url: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, accounts_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            accounts_url: accounts_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client pointing at the endpoints configured in the environment.
    pub fn from_env() -> Self {
        Self::new(config::spotify_api_url(), config::spotify_accounts_url())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn accounts_url(&self) -> &str {
        &self.accounts_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends an authenticated GET and decodes the JSON answer.
    pub async fn get<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, SpotifyError> {
        let request = self.http.get(self.api(path)).bearer_auth(token);
        let response = send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Sends an authenticated GET with URL-encoded query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SpotifyError> {
        let request = self.http.get(self.api(path)).query(query).bearer_auth(token);
        let response = send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Sends an authenticated GET and returns the raw JSON answer.
    pub async fn get_json(&self, token: &str, path: &str) -> Result<Value, SpotifyError> {
        self.get::<Value>(token, path).await
    }
}

/// Sends the request and turns any non-2xx answer into
/// [`SpotifyError::Status`].
pub(crate) async fn send(request: RequestBuilder) -> Result<reqwest::Response, SpotifyError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Err(SpotifyError::Status { status, body })
}

/// Strips an optional `Bearer ` prefix from an `Authorization` value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let value = header.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();
    (!token.is_empty()).then_some(token)
}
