use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use super::{
    events::{PlayerEvent, next_phase, reduce},
    state::{ConnectionPhase, DEFAULT_VOLUME, PlayerState},
    transport::{SkipDirection, Transport},
};
use crate::warning;

/// Period of the local progress ticker.
pub const TICK: Duration = Duration::from_millis(1000);

/// Glue between the player and the mini-player state.
///
/// Inbound events go through [`reduce`]; outbound commands go through the
/// [`Transport`]. Commands are fire-and-forget: a failure is reported as a
/// warning and the state is left as it was.
pub struct PlaybackBridge<T> {
    transport: T,
    state: PlayerState,
    phase: ConnectionPhase,
    remembered_volume: f32,
}

impl<T: Transport> PlaybackBridge<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: PlayerState::default(),
            phase: ConnectionPhase::Disconnected,
            remembered_volume: DEFAULT_VOLUME,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.state.set_token(Some(token.into()));
        self
    }

    /// Seeds the volume to restore on unmute, e.g. one kept from an earlier
    /// session. Silence is ignored.
    pub fn with_remembered_volume(mut self, volume: f32) -> Self {
        if volume > 0.0 {
            self.remembered_volume = volume.min(1.0);
        }
        self
    }

    /// Seeds the volume the device reported, without sending a command.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.state.set_volume(volume);
        if !self.state.is_muted() {
            self.remembered_volume = self.state.volume;
        }
        self
    }

    /// Volume restored by the next unmute.
    pub fn remembered_volume(&self) -> f32 {
        self.remembered_volume
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Marks the player as being set up.
    pub fn connect(&mut self) {
        if self.phase == ConnectionPhase::Disconnected {
            self.phase = ConnectionPhase::Connecting;
        }
    }

    pub fn handle(&mut self, event: PlayerEvent) {
        self.phase = next_phase(self.phase, &event);
        self.state = reduce(&self.state, &event);
    }

    /// Advances the local progress by one tick while playing.
    pub fn tick(&mut self) {
        if self.state.is_playing {
            self.state.advance(TICK.as_millis() as u64);
        }
    }

    fn connected(&self) -> bool {
        self.phase != ConnectionPhase::Disconnected
    }

    pub async fn toggle_play(&mut self) {
        if !self.connected() {
            return;
        }
        if let Err(e) = self.transport.toggle_play(self.state.is_playing).await {
            warning!("Toggle play failed: {}", e);
        }
    }

    pub async fn skip(&mut self, direction: SkipDirection) {
        if !self.connected() {
            return;
        }
        if let Err(e) = self.transport.skip(direction).await {
            warning!("Skip failed: {}", e);
        }
    }

    /// Moves the progress right away, then asks the player to follow.
    pub async fn seek(&mut self, position_ms: u64) {
        self.state.set_progress(position_ms);
        if !self.connected() {
            return;
        }
        if let Err(e) = self.transport.seek(position_ms).await {
            warning!("Seek failed: {}", e);
        }
    }

    pub async fn set_volume(&mut self, volume: f32) {
        self.state.set_volume(volume);
        self.remembered_volume = self.state.volume;
        self.push_volume().await;
    }

    /// Mutes, remembering the current volume, or restores the remembered
    /// volume when already muted.
    pub async fn toggle_mute(&mut self) {
        if self.state.is_muted() {
            self.state.set_volume(self.remembered_volume);
        } else {
            self.remembered_volume = self.state.volume;
            self.state.set_volume(0.0);
        }
        self.push_volume().await;
    }

    async fn push_volume(&mut self) {
        if !self.connected() {
            return;
        }
        if let Err(e) = self.transport.set_volume(self.state.volume).await {
            warning!("Volume change failed: {}", e);
        }
    }

    /// Flips shuffle on the player; the state follows once the player
    /// accepted it.
    pub async fn toggle_shuffle(&mut self) {
        if !self.connected() || self.state.token.is_none() {
            return;
        }
        let shuffle = !self.state.is_shuffle;
        match self.transport.set_shuffle(shuffle).await {
            Ok(()) => self.state.set_shuffle(shuffle),
            Err(e) => warning!("Shuffle change failed: {}", e),
        }
    }

    /// Starts a track of an album or playlist on this bridge's device.
    ///
    /// Does nothing until a device id and a token are known.
    pub async fn play_track(&mut self, context_uri: &str, track_uri: &str) {
        let (Some(device_id), Some(_)) = (self.state.device_id.as_deref(), &self.state.token)
        else {
            return;
        };
        if let Err(e) = self
            .transport
            .play_in_context(device_id, context_uri, track_uri)
            .await
        {
            warning!("Playing {} failed: {}", track_uri, e);
        }
    }

    /// Applies events until the channel closes.
    ///
    /// While playing, progress is advanced every [`TICK`]; the ticker is idle
    /// whenever playback is stopped and restarts one period after playback
    /// resumes. `on_change` sees the state after every event and tick.
    pub async fn run<F>(&mut self, mut events: mpsc::Receiver<PlayerEvent>, mut on_change: F)
    where
        F: FnMut(ConnectionPhase, &PlayerState),
    {
        let mut ticker = time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.reset();

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let was_playing = self.state.is_playing;
                    self.handle(event);
                    if self.state.is_playing && !was_playing {
                        ticker.reset();
                    }
                    on_change(self.phase, &self.state);
                }
                _ = ticker.tick(), if self.state.is_playing => {
                    self.tick();
                    on_change(self.phase, &self.state);
                }
            }
        }
    }
}
