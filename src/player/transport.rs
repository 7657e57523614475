use async_trait::async_trait;
use thiserror::Error;

use crate::spotify::{SpotifyClient, SpotifyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDirection {
    Next,
    Previous,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no player device is available")]
    NoDevice,

    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

/// Commands the playback bridge sends to the player.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Pauses when `playing`, resumes otherwise.
    async fn toggle_play(&self, playing: bool) -> Result<(), TransportError>;

    async fn skip(&self, direction: SkipDirection) -> Result<(), TransportError>;

    async fn seek(&self, position_ms: u64) -> Result<(), TransportError>;

    /// Sets the volume, `0.0..=1.0`.
    async fn set_volume(&self, volume: f32) -> Result<(), TransportError>;

    async fn set_shuffle(&self, shuffle: bool) -> Result<(), TransportError>;

    /// Starts `track_uri` inside `context_uri` on `device_id`.
    async fn play_in_context(
        &self,
        device_id: &str,
        context_uri: &str,
        track_uri: &str,
    ) -> Result<(), TransportError>;
}

/// Drives the player through the Web API's `/me/player` control endpoints.
pub struct HttpTransport {
    client: SpotifyClient,
    token: String,
}

impl HttpTransport {
    pub fn new(client: SpotifyClient, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn toggle_play(&self, playing: bool) -> Result<(), TransportError> {
        if playing {
            self.client.pause(&self.token).await?;
        } else {
            self.client.resume(&self.token).await?;
        }
        Ok(())
    }

    async fn skip(&self, direction: SkipDirection) -> Result<(), TransportError> {
        match direction {
            SkipDirection::Next => self.client.next_track(&self.token).await?,
            SkipDirection::Previous => self.client.previous_track(&self.token).await?,
        }
        Ok(())
    }

    async fn seek(&self, position_ms: u64) -> Result<(), TransportError> {
        Ok(self.client.seek(&self.token, position_ms).await?)
    }

    async fn set_volume(&self, volume: f32) -> Result<(), TransportError> {
        let percent = (volume.clamp(0.0, 1.0) * 100.0).round() as u8;
        Ok(self.client.set_volume(&self.token, percent).await?)
    }

    async fn set_shuffle(&self, shuffle: bool) -> Result<(), TransportError> {
        Ok(self.client.set_shuffle(&self.token, shuffle).await?)
    }

    async fn play_in_context(
        &self,
        device_id: &str,
        context_uri: &str,
        track_uri: &str,
    ) -> Result<(), TransportError> {
        if device_id.is_empty() {
            return Err(TransportError::NoDevice);
        }
        Ok(self
            .client
            .play_in_context(&self.token, device_id, context_uri, track_uri)
            .await?)
    }
}
