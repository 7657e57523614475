use std::path::PathBuf;

use chrono::Utc;
use serde_json::Value;

use crate::{config, types::Token};

/// Keeps the access token obtained at login in the local data directory so
/// that every client command can reuse it.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Builds a manager from the proxy's token answer.
    ///
    /// Returns `None` when the answer carries no access token, which is how
    /// the provider reports a failed exchange.
    pub fn from_response(response: &Value) -> Option<Self> {
        let access_token = response["access_token"].as_str()?.to_string();
        Some(Self::new(Token {
            access_token,
            token_type: response["token_type"].as_str().map(String::from),
            expires_in: response["expires_in"].as_u64(),
            refresh_token: response["refresh_token"].as_str().map(String::from),
            scope: response["scope"].as_str().map(String::from),
            obtained_at: Utc::now().timestamp() as u64,
        }))
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Forgets the stored token. A token that was never stored is fine.
    pub async fn clear() -> Result<(), String> {
        match async_fs::remove_file(Self::token_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Whether the token is past its announced lifetime. Tokens without an
    /// expiry are assumed valid.
    pub fn is_expired(&self) -> bool {
        let Some(expires_in) = self.token.expires_in else {
            return false;
        };
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + expires_in
    }

    pub fn access_token(&self) -> &str {
        &self.token.access_token
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        config::app_dir().join("cache/token.json")
    }
}
