use std::time::Duration;

use indicatif::ProgressBar;
use tokio::sync::mpsc;

use super::auth::require_token;
use crate::{
    error, info,
    management::VolumeMemory,
    player::{
        ConnectionPhase, DEFAULT_VOLUME, HttpTransport, PlaybackBridge, PlayerPoller, PlayerState,
        SkipDirection, events_for, format_time,
    },
    spotify::SpotifyClient,
    utils, warning,
};

/// How often `watch` reads the playback from Spotify.
const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// One-shot playback commands.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerControl {
    Toggle,
    Next,
    Previous,
    Seek(u64),
    /// Volume in percent.
    Volume(u8),
    Mute,
    Shuffle,
    Play {
        context_uri: String,
        track_uri: String,
    },
}

/// Prints what is playing right now.
pub async fn status() {
    let token = require_token().await;
    let bridge = open_bridge(&SpotifyClient::from_env(), &token).await;
    let state = bridge.state();

    let Some(track) = &state.current_track else {
        info!("Nothing is playing.");
        return;
    };

    println!("{} - {}", track.name, track.artist_names());
    if let Some(album) = &track.album {
        println!("  album    {}", album.name);
    }
    println!(
        "  {}  {} / {}",
        if state.is_playing { "playing" } else { "paused " },
        format_time(state.progress_ms),
        format_time(state.duration_ms)
    );
    println!(
        "  volume   {}%{}",
        (state.volume * 100.0).round(),
        if state.is_shuffle { "  shuffle on" } else { "" }
    );
}

/// Sends one command to the active player.
pub async fn control(command: PlayerControl) {
    let token = require_token().await;
    let mut bridge = open_bridge(&SpotifyClient::from_env(), &token).await;

    match command {
        PlayerControl::Toggle => bridge.toggle_play().await,
        PlayerControl::Next => bridge.skip(SkipDirection::Next).await,
        PlayerControl::Previous => bridge.skip(SkipDirection::Previous).await,
        PlayerControl::Seek(position_ms) => bridge.seek(position_ms).await,
        PlayerControl::Volume(percent) => {
            bridge.set_volume(f32::from(percent) / 100.0).await;
            remember_volume(&bridge).await;
        }
        PlayerControl::Mute => {
            bridge.toggle_mute().await;
            remember_volume(&bridge).await;
        }
        PlayerControl::Shuffle => bridge.toggle_shuffle().await,
        PlayerControl::Play {
            context_uri,
            track_uri,
        } => {
            if bridge.state().device_id.is_none() {
                warning!("No active device. Start Spotify on a device first.");
                return;
            }
            bridge.play_track(&context_uri, &track_uri).await
        }
    }
}

/// Live mini-player: follows the playback until interrupted.
pub async fn watch() {
    let token = require_token().await;
    let client = SpotifyClient::from_env();

    let (tx, rx) = mpsc::channel(16);
    let poller = PlayerPoller::new(client.clone(), token.clone(), POLL_INTERVAL);
    let poller = tokio::spawn(poller.run(tx));

    let pb = utils::track_bar();
    let mut bridge =
        PlaybackBridge::new(HttpTransport::new(client, token.clone())).with_token(token);
    bridge.connect();
    render(&pb, bridge.phase(), bridge.state());

    tokio::select! {
        _ = bridge.run(rx, |phase, state| render(&pb, phase, state)) => {}
        _ = tokio::signal::ctrl_c() => {}
    }

    poller.abort();
    pb.finish_and_clear();
}

/// Bridge seeded with one read of the current playback.
pub(crate) async fn open_bridge(client: &SpotifyClient, token: &str) -> PlaybackBridge<HttpTransport> {
    let playback = match client.current_playback(token).await {
        Ok(playback) => playback,
        Err(e) => error!("Cannot read playback. Err: {}", e),
    };

    let volume = playback
        .as_ref()
        .and_then(|p| p.device.as_ref())
        .and_then(|d| d.volume_percent)
        .map(|v| f32::from(v) / 100.0)
        .unwrap_or(DEFAULT_VOLUME);

    let remembered = VolumeMemory::default_location()
        .load()
        .await
        .unwrap_or(DEFAULT_VOLUME);
    let mut bridge = PlaybackBridge::new(HttpTransport::new(client.clone(), token))
        .with_token(token)
        .with_remembered_volume(remembered)
        .with_volume(volume);
    bridge.connect();
    for event in events_for(playback.as_ref()) {
        bridge.handle(event);
    }
    bridge
}

async fn remember_volume(bridge: &PlaybackBridge<HttpTransport>) {
    if let Err(e) = VolumeMemory::default_location()
        .remember(bridge.remembered_volume())
        .await
    {
        warning!("Failed to remember the volume: {}", e);
    }
}

fn render(pb: &ProgressBar, phase: ConnectionPhase, state: &PlayerState) {
    let Some(track) = &state.current_track else {
        pb.set_length(1);
        pb.set_position(0);
        pb.set_prefix("-");
        pb.set_message(match phase {
            ConnectionPhase::Ready => "Connected. Start playback on a device.",
            _ => "Waiting for the player...",
        });
        return;
    };

    pb.set_length(state.duration_ms.max(1));
    pb.set_position(state.progress_ms.min(state.duration_ms));
    pb.set_prefix(if state.is_playing { "▶" } else { "⏸" });
    pb.set_message(format!(
        "{} / {}  {} - {}",
        format_time(state.progress_ms),
        format_time(state.duration_ms),
        track.name,
        track.artist_names()
    ));
}
