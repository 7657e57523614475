//! Spotipod Library
//!
//! This library provides the building blocks of Spotipod, a personal music
//! library layered over the Spotify Web API. It contains the backend proxy
//! (OAuth code exchange, read-only passthrough and per-user library storage)
//! as well as the client side: the local library, the URL import resolver,
//! the recent activity browser and the playback bridge driving the
//! mini-player.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the backend proxy and the local OAuth callback
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `importer` - URL parsing and the fallback probe chain for imports
//! - `management` - File-backed stores for tokens and libraries
//! - `player` - Player state, events, reducer and the playback bridge
//! - `proxy` - Client of the backend proxy used by the commands
//! - `recent` - Recent activity gathering
//! - `server` - Router construction and server bootstrap
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod importer;
pub mod management;
pub mod player;
pub mod proxy;
pub mod recent;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI layer where errors of every module meet. Boxed dynamic
/// errors keep the Send + Sync bounds required across await points.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal errors in the binary. Library code reports failures
/// through its error types and [`warning!`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures: swallowed import probes, failed player
/// commands, upstream errors answered by the proxy.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
