use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Url, header};
use serde_json::Value;

use super::{SpotifyClient, SpotifyError, send};
use crate::types::CurrentUser;

/// Permissions requested at login: library reading, playback through the
/// web player and remote control, recent activity.
pub const SCOPES: &str = "user-read-private playlist-read-private playlist-read-collaborative user-library-read streaming user-modify-playback-state user-read-playback-state user-read-recently-played";

impl SpotifyClient {
    /// Builds the accounts service authorization URL the user is sent to.
    ///
    /// Returns `None` when the configured accounts URL is not a valid URL.
    pub fn authorize_url(
        &self,
        client_id: &str,
        redirect_uri: &str,
        state: Option<&str>,
    ) -> Option<String> {
        let mut params = vec![
            ("response_type", "code"),
            ("client_id", client_id),
            ("scope", SCOPES),
            ("redirect_uri", redirect_uri),
        ];
        if let Some(state) = state {
            params.push(("state", state));
        }

        let base = format!("{}/authorize", self.accounts_url());
        Url::parse_with_params(&base, &params)
            .ok()
            .map(String::from)
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// The client credentials travel as an HTTP Basic header, which is why
    /// this call only ever happens on the proxy. The provider's JSON answer
    /// is returned as-is.
    pub async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Value, SpotifyError> {
        let credentials = STANDARD.encode(format!("{client_id}:{client_secret}"));
        let request = self
            .http()
            .post(format!("{}/api/token", self.accounts_url()))
            .header(header::AUTHORIZATION, format!("Basic {credentials}"))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ]);

        let response = send(request).await?;
        Ok(response.json::<Value>().await?)
    }

    /// Resolves the owner of an access token.
    pub async fn current_user(&self, token: &str) -> Result<CurrentUser, SpotifyError> {
        self.get(token, "/me").await
    }
}
