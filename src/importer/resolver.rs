use reqwest::StatusCode;
use thiserror::Error;

use super::url::{ImportTarget, parse_import_url};
use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::{ImportedItem, ItemKind, LibraryEntry},
    warning,
};

/// Categories whose playlists are searched when a playlist is not directly
/// accessible.
pub const PROBE_CATEGORIES: [&str; 5] = ["pop", "hip-hop", "rock", "mood", "party"];

const PROBE_LIMIT: u32 = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Invalid URL or not logged in.")]
    InvalidInput,

    #[error(
        "Playlist not found. This appears to be a Spotify-curated playlist with restricted access. Try importing a different playlist or album."
    )]
    PlaylistNotFound,

    #[error("Access denied. The playlist might be private or require different permissions.")]
    PlaylistForbidden,

    #[error("Failed to access playlist: {0}")]
    PlaylistFailed(String),

    #[error("Album not found.")]
    AlbumNotFound,

    #[error("Failed to access album: {0}")]
    AlbumFailed(String),

    #[error("Failed to import from URL: {0}")]
    Request(String),
}

/// One lookup strategy for a playlist id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// `GET /playlists/{id}`
    Direct,
    /// The user's own and followed playlists.
    UserPlaylists,
    /// Playlist search, queried with the target id.
    Search,
    /// Spotify's featured playlists.
    Featured,
    /// Playlists of one browse category.
    Category(String),
}

impl Probe {
    pub fn name(&self) -> String {
        match self {
            Probe::Direct => "direct".to_string(),
            Probe::UserPlaylists => "user playlists".to_string(),
            Probe::Search => "search".to_string(),
            Probe::Featured => "featured playlists".to_string(),
            Probe::Category(category) => format!("{category} category"),
        }
    }
}

/// Probes tried for a playlist, in order.
pub fn default_playlist_probes() -> Vec<Probe> {
    let mut probes = vec![
        Probe::Direct,
        Probe::UserPlaylists,
        Probe::Search,
        Probe::Featured,
    ];
    probes.extend(
        PROBE_CATEGORIES
            .iter()
            .map(|c| Probe::Category(c.to_string())),
    );
    probes
}

/// Looks imported resources up on Spotify.
pub struct Importer<'a> {
    client: &'a SpotifyClient,
    token: &'a str,
    probes: Vec<Probe>,
}

impl<'a> Importer<'a> {
    pub fn new(client: &'a SpotifyClient, token: &'a str) -> Self {
        Self {
            client,
            token,
            probes: default_playlist_probes(),
        }
    }

    pub fn with_probes(mut self, probes: Vec<Probe>) -> Self {
        self.probes = probes;
        self
    }

    pub async fn resolve(&self, target: &ImportTarget) -> Result<ImportedItem, ImportError> {
        let entry = match target.kind {
            ItemKind::Playlist => self.resolve_playlist(&target.id).await?,
            ItemKind::Album => self.resolve_album(&target.id).await?,
        };
        Ok(ImportedItem {
            kind: target.kind,
            entry,
        })
    }

    /// Tries every probe in order and stops at the first one finding the
    /// playlist.
    ///
    /// Failed probes are reported and skipped. When all of them fail, the
    /// error is derived from the direct lookup's status.
    async fn resolve_playlist(&self, id: &str) -> Result<LibraryEntry, ImportError> {
        let mut direct_failure: Option<SpotifyError> = None;

        for probe in &self.probes {
            match self.run_probe(probe, id).await {
                Ok(Some(entry)) => return Ok(entry),
                Ok(None) => {}
                Err(e) => {
                    warning!("Playlist lookup via {} failed: {}", probe.name(), e);
                    if *probe == Probe::Direct {
                        direct_failure = Some(e);
                    }
                }
            }
        }

        Err(match direct_failure.as_ref().and_then(SpotifyError::status) {
            Some(StatusCode::NOT_FOUND) => ImportError::PlaylistNotFound,
            Some(StatusCode::FORBIDDEN) => ImportError::PlaylistForbidden,
            Some(status) => ImportError::PlaylistFailed(status.to_string()),
            None => match direct_failure {
                Some(e) => ImportError::Request(e.to_string()),
                None => ImportError::PlaylistNotFound,
            },
        })
    }

    async fn run_probe(&self, probe: &Probe, id: &str) -> Result<Option<LibraryEntry>, SpotifyError> {
        let candidates = match probe {
            Probe::Direct => return self.client.playlist(self.token, id).await.map(Some),
            Probe::UserPlaylists => self.client.my_playlists(self.token, PROBE_LIMIT).await?,
            Probe::Search => self.client.search_playlists(self.token, id).await?,
            Probe::Featured => {
                self.client
                    .featured_playlists(self.token, PROBE_LIMIT)
                    .await?
            }
            Probe::Category(category) => {
                self.client
                    .category_playlists(self.token, category, PROBE_LIMIT)
                    .await?
            }
        };
        Ok(candidates.into_iter().find(|p| p.has_id(id)))
    }

    /// Albums have a single direct lookup.
    async fn resolve_album(&self, id: &str) -> Result<LibraryEntry, ImportError> {
        self.client.album(self.token, id).await.map_err(|e| {
            warning!("Album lookup failed: {}", e);
            match e.status() {
                Some(StatusCode::NOT_FOUND) => ImportError::AlbumNotFound,
                Some(status) => ImportError::AlbumFailed(status.to_string()),
                None => ImportError::Request(e.to_string()),
            }
        })
    }
}

/// Parses `input` and resolves it.
///
/// Bad input or a missing token fail with [`ImportError::InvalidInput`]
/// before any request is made.
pub async fn import_url(
    client: &SpotifyClient,
    token: Option<&str>,
    input: &str,
) -> Result<ImportedItem, ImportError> {
    let (Some(target), Some(token)) = (parse_import_url(input), token) else {
        return Err(ImportError::InvalidInput);
    };
    Importer::new(client, token).resolve(&target).await
}
