use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::{
    player::format_time,
    types::{ImportedItem, ItemKind, LibraryEntry, LibraryTableRow, Track, TrackTableRow},
};

/// Random value round-tripped through the OAuth redirect.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Spinner shown while waiting on the network.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Bar mirroring the progress of the current track.
pub fn track_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{prefix:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

/// Parses a position given either as `m:ss` or as plain milliseconds.
pub fn parse_position(input: &str) -> Option<u64> {
    let input = input.trim();
    match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: u64 = seconds.parse().ok()?;
            (seconds < 60).then_some((minutes * 60 + seconds) * 1000)
        }
        None => input.parse().ok(),
    }
}

/// Clap value parser for [`parse_position`].
pub fn parse_position_arg(input: &str) -> Result<u64, String> {
    parse_position(input)
        .ok_or_else(|| format!("invalid position '{input}', expected m:ss or milliseconds"))
}

/// Table rows for a list of provider entries of one kind.
pub fn table_rows(kind: ItemKind, entries: &[LibraryEntry]) -> Vec<LibraryTableRow> {
    entries
        .iter()
        .map(|entry| {
            LibraryTableRow::from(&ImportedItem {
                kind,
                entry: entry.clone(),
            })
        })
        .collect()
}

/// Numbered table rows for a track list, numbers starting at 1.
pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            number: i + 1,
            name: track.name.clone(),
            artists: track.artist_names(),
            length: track.duration_ms.map(format_time).unwrap_or_default(),
        })
        .collect()
}
