//! # CLI Module
//!
//! User-facing commands of Spotipod. Each command loads what it needs (token,
//! local library), delegates to the library modules and reports through the
//! logging macros; fatal problems end the process with [`crate::error!`].
//!
//! ```text
//! CLI Layer (commands)
//!     ↓
//! importer / recent / player / proxy client
//!     ↓
//! management (token cache, local library)   spotify (Web API client)
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotipod serve                       # run the backend proxy
//! spotipod auth                        # log in through the proxy
//! spotipod import <spotify url>        # add a playlist or album
//! spotipod library --filter albums     # list imported albums
//! spotipod library show <id> --play 3  # list an item's tracks, play the third
//! spotipod recent                      # browse recent activity
//! spotipod sync push                   # upload the library to the proxy
//! spotipod player watch                # live mini-player
//! ```

mod auth;
mod import;
mod library;
mod player;
mod recent;
mod serve;

pub use auth::{auth, logout};
pub use import::import;
pub use library::{list_library, pull, push, remove, show};
pub use player::{PlayerControl, control, status, watch};
pub use recent::recent;
pub use serve::serve;
