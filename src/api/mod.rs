//! # API Module
//!
//! HTTP handlers of the Spotipod backend proxy, plus the local OAuth callback
//! used by the CLI login.
//!
//! ## Endpoints
//!
//! ### Proxy
//!
//! - [`login`] - `GET /api/spotify/login`, redirects to Spotify's consent page
//! - [`token`] - `POST /api/spotify/token`, exchanges a code with the client
//!   secret held server side
//! - [`playlists`], [`albums`], [`recently_played`] - read-only passthrough
//!   of the caller's Spotify data
//!
//! ### Library
//!
//! - [`save_library`] - `POST /api/user/library`
//! - [`load_library`] - `GET /api/user/library/{user_id}`
//!
//! Both resolve the owner of the bearer token through Spotify before touching
//! storage; a token belonging to another user is refused with 403.
//!
//! ### Local
//!
//! - [`callback`] - OAuth redirect target of the CLI login
//! - [`health`] - liveness probe
//!
//! Failures are expressed as [`ApiError`], whose response is always an
//! `{error}` body, except Spotify refusals that pass through unchanged.

mod callback;
mod error;
mod health;
mod library;
mod proxy;

use axum::http::{HeaderMap, header};

pub use callback::callback;
pub use error::ApiError;
pub use health::health;
pub use library::{load_library, save_library};
pub use proxy::{albums, login, playlists, recently_played, token};

use crate::spotify::bearer_token;

/// Access token of the caller, from `Authorization` with or without the
/// `Bearer` prefix.
fn access_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(bearer_token)
        .map(String::from)
}
