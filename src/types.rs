use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Access token as cached by the client after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub state: String,
    pub token: Option<Token>,
    pub failure: Option<String>,
}

/// Body of `POST /api/spotify/token`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, alias = "redirectUri")]
    pub redirect_uri: Option<String>,
}

/// Query of `GET /api/spotify/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    pub redirect_uri: Option<String>,
    pub state: Option<String>,
}

/// Owner of an access token as reported by `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Playlist,
    Album,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Playlist => write!(f, "playlist"),
            ItemKind::Album => write!(f, "album"),
        }
    }
}

/// A provider playlist or album object, kept verbatim.
///
/// Only the handful of fields the application reads are exposed through
/// accessors; everything else is carried along untouched so that a library
/// saved and loaded again is identical to what was imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryEntry(pub Value);

impl LibraryEntry {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn uri(&self) -> Option<&str> {
        self.0.get("uri").and_then(Value::as_str)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.0
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first())
            .and_then(|image| image.get("url"))
            .and_then(Value::as_str)
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

/// A library entry tagged with the list it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedItem {
    pub kind: ItemKind,
    pub entry: LibraryEntry,
}

#[derive(Tabled)]
pub struct LibraryTableRow {
    #[tabled(rename = "type")]
    pub kind: String,
    pub name: String,
    pub id: String,
}

impl From<&ImportedItem> for LibraryTableRow {
    fn from(item: &ImportedItem) -> Self {
        Self {
            kind: item.kind.to_string(),
            name: item.entry.name().to_string(),
            id: item.entry.id().unwrap_or_default().to_string(),
        }
    }
}

/// A library item with its track list, as shown by `library show`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub kind: ItemKind,
    pub entry: LibraryEntry,
    pub tracks: Vec<Track>,
}

impl ItemDetail {
    /// Builds the detail from a full playlist or album object.
    ///
    /// Playlists wrap their tracks (`tracks.items[].track`, `null` for
    /// removed ones) while albums list them directly (`tracks.items[]`).
    /// Items that do not look like a track are skipped.
    pub fn from_provider(kind: ItemKind, object: Value) -> Self {
        let tracks = object
            .pointer("/tracks/items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match kind {
                        ItemKind::Playlist => item.get("track"),
                        ItemKind::Album => Some(item),
                    })
                    .filter_map(|track| serde_json::from_value::<Track>(track.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            kind,
            entry: LibraryEntry(object),
            tracks,
        }
    }

    /// The `n`th track, counting from 1 like the printed table.
    pub fn track(&self, n: usize) -> Option<&Track> {
        n.checked_sub(1).and_then(|i| self.tracks.get(i))
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub number: usize,
    pub name: String,
    pub artists: String,
    pub length: String,
}

/// A user's library as persisted by the proxy.
///
/// Stored files are served back untouched, so everything but the two lists
/// is optional when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub playlists: Vec<LibraryEntry>,
    #[serde(default)]
    pub albums: Vec<LibraryEntry>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Library {
    pub fn new(user_id: &str, playlists: Vec<LibraryEntry>, albums: Vec<LibraryEntry>) -> Self {
        Self {
            user_id: user_id.to_string(),
            playlists,
            albums,
            last_updated: Some(timestamp_now()),
        }
    }

    pub fn empty(user_id: &str) -> Self {
        Self::new(user_id, Vec::new(), Vec::new())
    }
}

/// Current time as an RFC 3339 timestamp with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of `POST /api/user/library`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLibraryRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub playlists: Option<Vec<LibraryEntry>>,
    #[serde(default)]
    pub albums: Option<Vec<LibraryEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLibraryResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A track as reported by the player, both by the web playback SDK
/// (`track_window.current_track`) and by `GET /me/player` (`item`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

impl Track {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Envelope of the browse and search endpoints returning playlists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsEnvelope {
    pub playlists: Paging<Option<LibraryEntry>>,
}

/// Envelope of `GET /browse/new-releases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumsEnvelope {
    pub albums: Paging<LibraryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistoryItem {
    pub track: PlayedTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayedTrack {
    #[serde(default)]
    pub album: Option<LibraryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_percent: Option<u8>,
}

/// Response of `GET /me/player`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPlayback {
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub shuffle_state: bool,
    #[serde(default)]
    pub item: Option<Track>,
}
