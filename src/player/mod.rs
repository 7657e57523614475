//! # Player Module
//!
//! State of the mini-player and the bridge keeping it in sync with the
//! Spotify player.
//!
//! ```text
//!  player events ──mpsc──▶ PlaybackBridge ──reduce──▶ PlayerState
//!  (Ready, StateChanged)        │   ▲
//!                               │   └── 1 s ticker while playing
//!                               ▼
//!                          Transport (toggle, skip, seek, volume, shuffle, play)
//! ```
//!
//! The reducer is a pure function, so the event mapping is tested without a
//! player. [`HttpTransport`] and [`PlayerPoller`] connect the bridge to the
//! Web API's `/me/player` endpoints.

mod bridge;
mod events;
mod poller;
mod state;
mod transport;

pub use bridge::{PlaybackBridge, TICK};
pub use events::{PlaybackSnapshot, PlayerEvent, TrackWindow, next_phase, reduce};
pub use poller::{PlayerPoller, events_for};
pub use state::{ConnectionPhase, DEFAULT_VOLUME, PlayerState, format_time};
pub use transport::{HttpTransport, SkipDirection, Transport, TransportError};
