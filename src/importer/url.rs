use std::sync::LazyLock;

use regex::Regex;

use crate::types::ItemKind;

/// Resource a pasted URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub id: String,
    pub kind: ItemKind,
}

/// Recognized URL shapes, tried in this order: playlist, album,
/// user playlist, then `open.spotify.com/{playlist|album}/{id}`.
static URL_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"spotify\.com/playlist/([a-zA-Z0-9]+)",
        r"spotify\.com/album/([a-zA-Z0-9]+)",
        r"spotify\.com/user/[^/]+/playlist/([a-zA-Z0-9]+)",
        r"open\.spotify\.com/(playlist|album)/([a-zA-Z0-9]+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("Invalid Regex, this should be fixed at compile time."))
});

/// Extracts the resource id and type from free text.
///
/// The shapes are searched anywhere in the input, so query strings, tracking
/// parameters and surrounding text are ignored. Ids are ASCII alphanumeric.
///
/// # Arguments
///
/// * `input` - Whatever the user pasted
///
/// # Returns
///
/// The first shape matching wins; `None` when no shape matches.
pub fn parse_import_url(input: &str) -> Option<ImportTarget> {
    let [playlist, album, user_playlist, open_link] = &*URL_PATTERNS;

    let single = |regex: &Regex, kind: ItemKind| {
        regex.captures(input).map(|caps| ImportTarget {
            id: caps[1].to_string(),
            kind,
        })
    };

    single(playlist, ItemKind::Playlist)
        .or_else(|| single(album, ItemKind::Album))
        .or_else(|| single(user_playlist, ItemKind::Playlist))
        .or_else(|| {
            open_link.captures(input).map(|caps| ImportTarget {
                id: caps[2].to_string(),
                kind: if &caps[1] == "album" {
                    ItemKind::Album
                } else {
                    ItemKind::Playlist
                },
            })
        })
}
