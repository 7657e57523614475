use serde::{Deserialize, Serialize};

use crate::types::Track;

/// Volume of a freshly created player.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Lifecycle of the connection to the player.
///
/// The order of the variants is the order in which a session moves through
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConnectionPhase {
    #[default]
    Disconnected,
    /// The player is being set up, no device yet.
    Connecting,
    /// A device id was obtained; remote commands are possible.
    Ready,
    /// A track is loaded.
    Active,
}

/// Everything the mini-player shows.
///
/// `progress_ms` has two writers: state-change events set it, and the local
/// ticker advances it while playing. Whichever wrote last wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub token: Option<String>,
    pub device_id: Option<String>,
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub progress_ms: u64,
    pub duration_ms: u64,
    pub volume: f32,
    pub is_shuffle: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            token: None,
            device_id: None,
            current_track: None,
            is_playing: false,
            progress_ms: 0,
            duration_ms: 0,
            volume: DEFAULT_VOLUME,
            is_shuffle: false,
        }
    }
}

impl PlayerState {
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn set_device_id(&mut self, device_id: Option<String>) {
        self.device_id = device_id;
    }

    pub fn set_current_track(&mut self, track: Option<Track>) {
        self.current_track = track;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn set_progress(&mut self, progress_ms: u64) {
        self.progress_ms = progress_ms;
    }

    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Sets the volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.is_shuffle = shuffle;
    }

    pub fn advance(&mut self, elapsed_ms: u64) {
        self.progress_ms = self.progress_ms.saturating_add(elapsed_ms);
    }

    pub fn is_muted(&self) -> bool {
        self.volume <= 0.0
    }
}

/// Renders milliseconds as `m:ss`.
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{minutes}:{seconds:02}")
}
