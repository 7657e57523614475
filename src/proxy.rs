//! Client side of the backend proxy.
//!
//! The client commands never see the Spotify client secret: the code
//! exchange and the synced library both go through the proxy.

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::{Value, json};
use thiserror::Error;

use crate::{
    config,
    types::{Library, LibraryEntry, SaveLibraryResponse},
};

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy answered {status}: {body}")]
    Status { status: StatusCode, body: Value },

    #[error("request to the proxy failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProxyError {
    /// Human readable reason, taken from the `{error}` body when present.
    pub fn reason(&self) -> String {
        match self {
            ProxyError::Status { body, .. } => match &body["error"] {
                Value::String(msg) => msg.clone(),
                Value::Null => body.to_string(),
                other => other["error_description"]
                    .as_str()
                    .map(String::from)
                    .unwrap_or_else(|| other.to_string()),
            },
            ProxyError::Http(e) => e.to_string(),
        }
    }
}

/// HTTP client for the backend proxy's routes.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: Client,
    base_url: String,
}

impl ProxyClient {
    /// Creates a client for the proxy at `base_url`; a trailing slash is
    /// ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the proxy configured by `SPOTIPOD_API_URL`.
    pub fn from_env() -> Self {
        Self::new(config::proxy_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Login entry point the browser is sent to.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - Where Spotify sends the browser back to
    /// * `state` - Value the callback must receive unchanged
    ///
    /// # Returns
    ///
    /// `None` when the base URL is not a valid URL.
    pub fn login_url(&self, redirect_uri: &str, state: &str) -> Option<String> {
        Url::parse_with_params(
            &format!("{}/api/spotify/login", self.base_url),
            &[("redirect_uri", redirect_uri), ("state", state)],
        )
        .ok()
        .map(String::from)
    }

    /// Asks the proxy to exchange an authorization code.
    ///
    /// # Returns
    ///
    /// The token answer as Spotify sent it.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Status`] carries the proxy's `{error}` body when the
    /// exchange is rejected.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<Value, ProxyError> {
        let request = self
            .http
            .post(format!("{}/api/spotify/token", self.base_url))
            .json(&json!({ "code": code, "redirect_uri": redirect_uri }));
        Ok(send(request).await?.json().await?)
    }

    /// Overwrites the synced library of `user_id`.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token owned by `user_id`
    /// * `user_id` - Spotify id of the library owner
    /// * `playlists` - Playlists to store, in order
    /// * `albums` - Albums to store, in order
    ///
    /// # Errors
    ///
    /// A 403 [`ProxyError::Status`] when the token belongs to someone else.
    pub async fn save_library(
        &self,
        token: &str,
        user_id: &str,
        playlists: &[LibraryEntry],
        albums: &[LibraryEntry],
    ) -> Result<SaveLibraryResponse, ProxyError> {
        let request = self
            .http
            .post(format!("{}/api/user/library", self.base_url))
            .bearer_auth(token)
            .json(&json!({
                "userId": user_id,
                "playlists": playlists,
                "albums": albums,
            }));
        Ok(send(request).await?.json().await?)
    }

    /// Reads the synced library of `user_id`, empty when never saved.
    ///
    /// # Errors
    ///
    /// Same ownership rules as [`ProxyClient::save_library`].
    pub async fn load_library(&self, token: &str, user_id: &str) -> Result<Library, ProxyError> {
        let request = self
            .http
            .get(format!("{}/api/user/library/{}", self.base_url, user_id))
            .bearer_auth(token);
        Ok(send(request).await?.json().await?)
    }
}

async fn send(request: RequestBuilder) -> Result<reqwest::Response, ProxyError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Err(ProxyError::Status { status, body })
}
