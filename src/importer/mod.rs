//! # Importer Module
//!
//! Turns a pasted Spotify URL into a library entry.
//!
//! Parsing is pure and never touches the network. Albums are looked up
//! directly; playlists go through an ordered list of [`Probe`]s, the first
//! one finding the id wins. The list is plain data, so probes are added or
//! removed without touching the control flow.

mod resolver;
mod url;

pub use resolver::{
    ImportError, Importer, PROBE_CATEGORIES, Probe, default_playlist_probes, import_url,
};
pub use url::{ImportTarget, parse_import_url};
