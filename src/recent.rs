//! Recent activity: albums and playlists worth importing, gathered from what
//! the user played lately and what Spotify puts forward.

use std::collections::HashSet;

use thiserror::Error;

use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::LibraryEntry,
    warning,
};

/// Categories whose playlists are suggested.
pub const RECENT_CATEGORIES: [&str; 6] = ["pop", "hip-hop", "rock", "mood", "party", "workout"];

#[derive(Debug, Error)]
pub enum RecentError {
    #[error("Failed to fetch recent tracks: {0}")]
    RecentTracks(String),
}

/// Albums and playlists, each unique by id in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct RecentActivity {
    pub albums: Vec<LibraryEntry>,
    pub playlists: Vec<LibraryEntry>,
}

#[derive(Default)]
struct UniqueEntries {
    seen: HashSet<String>,
    entries: Vec<LibraryEntry>,
}

impl UniqueEntries {
    fn extend(&mut self, entries: impl IntoIterator<Item = LibraryEntry>) {
        for entry in entries {
            let Some(id) = entry.id().map(String::from) else {
                continue;
            };
            if self.seen.insert(id) {
                self.entries.push(entry);
            }
        }
    }
}

/// Gathers the recent activity.
///
/// Recently played tracks are required; every other source is optional and
/// skipped with a warning when it fails.
pub async fn fetch_recent_activity(
    client: &SpotifyClient,
    token: &str,
) -> Result<RecentActivity, RecentError> {
    let played = client.recently_played(token, 50).await.map_err(|e| {
        RecentError::RecentTracks(
            e.status()
                .map(|s| s.as_u16().to_string())
                .unwrap_or_else(|| e.to_string()),
        )
    })?;

    let mut albums = UniqueEntries::default();
    albums.extend(played.into_iter().filter_map(|item| item.track.album));

    let mut playlists = UniqueEntries::default();
    playlists.extend(optional("user playlists", client.my_playlists(token, 50).await));
    playlists.extend(optional(
        "featured playlists",
        client.featured_playlists(token, 20).await,
    ));
    for category in RECENT_CATEGORIES {
        playlists.extend(optional(
            &format!("{category} playlists"),
            client.category_playlists(token, category, 10).await,
        ));
    }

    albums.extend(optional("new releases", client.new_releases(token, 20).await));

    Ok(RecentActivity {
        albums: albums.entries,
        playlists: playlists.entries,
    })
}

fn optional(source: &str, result: Result<Vec<LibraryEntry>, SpotifyError>) -> Vec<LibraryEntry> {
    result.unwrap_or_else(|e| {
        warning!("Could not fetch {}: {}", source, e);
        Vec::new()
    })
}
