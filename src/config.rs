//! Configuration management for Spotipod.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, then in the working directory
//! 3. Application defaults (where applicable)
//!
//! The proxy server gathers its settings once into a [`ServerConfig`]; the
//! client commands read the accessor functions directly.

use std::{env, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3001";
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:8888";

/// Origins of the development frontend, always allowed by CORS.
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads environment variables from a `.env` file.
///
/// The file is looked up in the platform-specific local data directory under
/// `spotipod/.env`:
/// - Linux: `~/.local/share/spotipod/.env`
/// - macOS: `~/Library/Application Support/spotipod/.env`
/// - Windows: `%LOCALAPPDATA%/spotipod/.env`
///
/// When it does not exist, a `.env` in the working directory is tried. A
/// missing file is not an error, plain environment variables are enough.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the data directory cannot be created.
///
/// # Example
///
/// ```
/// use spotipod::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), ConfigError> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if dotenv::from_path(&path).is_err() {
        let _ = dotenv::dotenv();
    }
    Ok(())
}

/// Returns the application's directory inside the local data directory.
///
/// Holds the `.env` file, the token cache and the local library. Falls back
/// to the working directory on platforms without a data directory.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotipod");
    path
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the address the proxy server binds to.
///
/// `SERVER_ADDRESS` wins when set, otherwise `0.0.0.0:$PORT` with `PORT`
/// defaulting to 3001.
///
/// # Example
///
/// ```
/// use spotipod::config;
///
/// // "0.0.0.0:8080" with PORT=8080 and no SERVER_ADDRESS
/// let addr = config::server_addr();
/// println!("listening on {addr}");
/// ```
pub fn server_addr() -> String {
    var("SERVER_ADDRESS").unwrap_or_else(|| {
        let port = var("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        format!("0.0.0.0:{port}")
    })
}

/// Returns the Spotify application's client id.
///
/// # Errors
///
/// [`ConfigError::Missing`] when `SPOTIFY_CLIENT_ID` is unset or blank.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    var("SPOTIFY_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))
}

/// Returns the Spotify client secret.
///
/// Only the proxy server reads it. It must never be logged or sent to a
/// client.
///
/// # Errors
///
/// [`ConfigError::Missing`] when `SPOTIFY_CLIENT_SECRET` is unset or blank.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    var("SPOTIFY_CLIENT_SECRET").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_api_url() -> String {
    var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the Spotify accounts service base URL hosting `/authorize` and
/// `/api/token`.
pub fn spotify_accounts_url() -> String {
    var("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string())
}

/// Returns the deployed frontend's origin, if any.
pub fn frontend_url() -> Option<String> {
    var("FRONTEND_URL")
}

/// Returns every origin allowed by CORS: the development origins,
/// `FRONTEND_URL` and the comma separated `ALLOWED_ORIGINS`.
pub fn allowed_origins() -> Vec<String> {
    let mut origins: Vec<String> = DEV_ORIGINS.iter().map(|o| o.to_string()).collect();
    if let Some(frontend) = frontend_url() {
        origins.push(frontend);
    }
    if let Some(extra) = var("ALLOWED_ORIGINS") {
        origins.extend(
            extra
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from),
        );
    }
    origins.dedup();
    origins
}

/// Returns the directory holding one library file per user.
pub fn data_dir() -> PathBuf {
    var("SPOTIPOD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| app_dir().join("data"))
}

/// Returns the proxy base URL used by the client commands.
pub fn proxy_url() -> String {
    var("SPOTIPOD_API_URL")
        .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Returns the address of the local listener receiving the OAuth redirect.
pub fn callback_addr() -> String {
    var("SPOTIPOD_CALLBACK_ADDRESS").unwrap_or_else(|| DEFAULT_CALLBACK_ADDRESS.to_string())
}

/// Returns the redirect URI registered with Spotify for the CLI login.
pub fn callback_redirect_uri() -> String {
    format!("http://{}/callback", callback_addr())
}

/// Settings of the proxy server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub accounts_url: String,
    pub allowed_origins: Vec<String>,
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Builds the server settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `SPOTIFY_CLIENT_ID` or `SPOTIFY_CLIENT_SECRET` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            addr: server_addr(),
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            api_url: spotify_api_url(),
            accounts_url: spotify_accounts_url(),
            allowed_origins: allowed_origins(),
            data_dir: data_dir(),
        })
    }
}
