use std::time::Duration;

use tokio::sync::mpsc;

use super::events::{PlaybackSnapshot, PlayerEvent};
use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::CurrentPlayback,
    warning,
};

/// Feeds the bridge from `GET /me/player`, standing in for the callbacks a
/// browser player would deliver.
pub struct PlayerPoller {
    client: SpotifyClient,
    token: String,
    interval: Duration,
}

impl PlayerPoller {
    pub fn new(client: SpotifyClient, token: impl Into<String>, interval: Duration) -> Self {
        Self {
            client,
            token: token.into(),
            interval,
        }
    }

    /// Reads the playback once and translates it into events.
    pub async fn poll_once(&self) -> Result<Vec<PlayerEvent>, SpotifyError> {
        let playback = self.client.current_playback(&self.token).await?;
        Ok(events_for(playback.as_ref()))
    }

    /// Polls until the receiving side goes away. Failed polls are reported
    /// and skipped.
    pub async fn run(self, tx: mpsc::Sender<PlayerEvent>) {
        loop {
            match self.poll_once().await {
                Ok(events) => {
                    for event in events {
                        if tx.send(event).await.is_err() {
                            return;
                        }
                    }
                }
                Err(e) => warning!("Reading playback failed: {}", e),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = tx.closed() => return,
            }
        }
    }
}

/// Events describing a playback read: `Ready` when a device is reported,
/// then `StateChanged`. No playback at all yields `StateChanged(None)`.
pub fn events_for(playback: Option<&CurrentPlayback>) -> Vec<PlayerEvent> {
    let Some(playback) = playback else {
        return vec![PlayerEvent::StateChanged(None)];
    };

    let mut events = Vec::with_capacity(2);
    if let Some(device_id) = playback.device.as_ref().and_then(|d| d.id.clone()) {
        events.push(PlayerEvent::Ready { device_id });
    }
    events.push(PlayerEvent::StateChanged(Some(PlaybackSnapshot::from(
        playback,
    ))));
    events
}
