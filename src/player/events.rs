use serde::{Deserialize, Serialize};

use super::state::{ConnectionPhase, PlayerState};
use crate::types::{CurrentPlayback, Track};

/// Playback snapshot as carried by the player's `player_state_changed`
/// callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub paused: bool,
    pub position: u64,
    pub duration: u64,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub track_window: TrackWindow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackWindow {
    #[serde(default)]
    pub current_track: Option<Track>,
}

impl From<&CurrentPlayback> for PlaybackSnapshot {
    fn from(playback: &CurrentPlayback) -> Self {
        Self {
            paused: !playback.is_playing,
            position: playback.progress_ms.unwrap_or(0),
            duration: playback
                .item
                .as_ref()
                .and_then(|t| t.duration_ms)
                .unwrap_or(0),
            shuffle: playback.shuffle_state,
            track_window: TrackWindow {
                current_track: playback.item.clone(),
            },
        }
    }
}

/// Inbound notifications from the player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The player obtained a device id.
    Ready { device_id: String },
    /// The playback changed. `None` means there is no session right now.
    StateChanged(Option<PlaybackSnapshot>),
}

/// Maps an event onto the state it produces.
///
/// A `StateChanged(None)` leaves the state untouched: the absence of a
/// session is not a disconnect.
pub fn reduce(state: &PlayerState, event: &PlayerEvent) -> PlayerState {
    let mut next = state.clone();
    match event {
        PlayerEvent::Ready { device_id } => next.set_device_id(Some(device_id.clone())),
        PlayerEvent::StateChanged(None) => {}
        PlayerEvent::StateChanged(Some(snapshot)) => {
            next.set_current_track(snapshot.track_window.current_track.clone());
            next.set_playing(!snapshot.paused);
            next.set_progress(snapshot.position);
            next.set_duration(snapshot.duration);
            next.set_shuffle(snapshot.shuffle);
        }
    }
    next
}

/// Maps an event onto the connection phase it produces.
pub fn next_phase(phase: ConnectionPhase, event: &PlayerEvent) -> ConnectionPhase {
    match event {
        PlayerEvent::Ready { .. } => phase.max(ConnectionPhase::Ready),
        PlayerEvent::StateChanged(Some(snapshot))
            if snapshot.track_window.current_track.is_some() =>
        {
            ConnectionPhase::Active
        }
        PlayerEvent::StateChanged(_) => phase,
    }
}
