use reqwest::{Method, StatusCode, header};
use serde_json::{Value, json};

use super::{SpotifyClient, SpotifyError, send};
use crate::types::CurrentPlayback;

impl SpotifyClient {
    async fn player_command(
        &self,
        token: &str,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<(), SpotifyError> {
        let mut request = self
            .http()
            .request(method, self.api(path))
            .query(query)
            .bearer_auth(token);
        request = match body {
            Some(body) => request.json(&body),
            // the control endpoints refuse bodiless PUTs without a length
            None => request.header(header::CONTENT_LENGTH, 0),
        };

        send(request).await?;
        Ok(())
    }

    /// Starts `track_uri` within `context_uri` (album or playlist) on the
    /// given device.
    pub async fn play_in_context(
        &self,
        token: &str,
        device_id: &str,
        context_uri: &str,
        track_uri: &str,
    ) -> Result<(), SpotifyError> {
        let body = json!({
            "context_uri": context_uri,
            "offset": { "uri": track_uri },
        });
        self.player_command(
            token,
            Method::PUT,
            "/me/player/play",
            &[("device_id", device_id.to_string())],
            Some(body),
        )
        .await
    }

    /// Resumes playback on the active device.
    pub async fn resume(&self, token: &str) -> Result<(), SpotifyError> {
        self.player_command(token, Method::PUT, "/me/player/play", &[], None)
            .await
    }

    pub async fn pause(&self, token: &str) -> Result<(), SpotifyError> {
        self.player_command(token, Method::PUT, "/me/player/pause", &[], None)
            .await
    }

    pub async fn next_track(&self, token: &str) -> Result<(), SpotifyError> {
        self.player_command(token, Method::POST, "/me/player/next", &[], None)
            .await
    }

    pub async fn previous_track(&self, token: &str) -> Result<(), SpotifyError> {
        self.player_command(token, Method::POST, "/me/player/previous", &[], None)
            .await
    }

    pub async fn seek(&self, token: &str, position_ms: u64) -> Result<(), SpotifyError> {
        self.player_command(
            token,
            Method::PUT,
            "/me/player/seek",
            &[("position_ms", position_ms.to_string())],
            None,
        )
        .await
    }

    pub async fn set_volume(&self, token: &str, volume_percent: u8) -> Result<(), SpotifyError> {
        self.player_command(
            token,
            Method::PUT,
            "/me/player/volume",
            &[("volume_percent", volume_percent.to_string())],
            None,
        )
        .await
    }

    pub async fn set_shuffle(&self, token: &str, state: bool) -> Result<(), SpotifyError> {
        self.player_command(
            token,
            Method::PUT,
            "/me/player/shuffle",
            &[("state", state.to_string())],
            None,
        )
        .await
    }

    /// Reads the current playback, `None` when no session is active.
    pub async fn current_playback(
        &self,
        token: &str,
    ) -> Result<Option<CurrentPlayback>, SpotifyError> {
        let request = self.http().get(self.api("/me/player")).bearer_auth(token);
        let response = send(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice::<CurrentPlayback>(&bytes)?))
    }
}
