use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    Res, api,
    config::{self, ServerConfig},
    info,
    management::LibraryStore,
    spotify::SpotifyClient,
    types::PendingLogin,
    warning,
};

/// Shared by every proxy handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub spotify: SpotifyClient,
    pub store: LibraryStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let spotify = SpotifyClient::new(&config.api_url, &config.accounts_url);
        let store = LibraryStore::new(&config.data_dir);
        Self {
            config: Arc::new(config),
            spotify,
            store,
        }
    }
}

/// Builds the proxy router with its CORS policy.
pub fn make_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(api::health))
        .route("/api/spotify/login", get(api::login))
        .route("/api/spotify/token", post(api::token))
        .route("/api/spotify/playlists", get(api::playlists))
        .route("/api/spotify/albums", get(api::albums))
        .route("/api/spotify/recently-played", get(api::recently_played))
        .route("/api/user/library", post(api::save_library))
        .route("/api/user/library/{user_id}", get(api::load_library))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warning!("Ignoring invalid origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Runs the proxy until the process is stopped.
pub async fn start_api_server(config: ServerConfig) -> Res<()> {
    let addr = SocketAddr::from_str(&config.addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", config.addr, e))?;

    async_fs::create_dir_all(&config.data_dir).await?;
    info!("Storing libraries in {}", config.data_dir.display());

    let app = make_app(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Spotipod proxy listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Router of the local listener receiving the OAuth redirect.
pub fn callback_app(pending: Arc<Mutex<Option<PendingLogin>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(pending)))
}

/// Serves the OAuth callback on the configured local address.
pub async fn start_callback_server(pending: Arc<Mutex<Option<PendingLogin>>>) -> Res<()> {
    let addr = SocketAddr::from_str(&config::callback_addr())
        .map_err(|e| format!("Failed to parse callback address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, callback_app(pending)).await?;
    Ok(())
}
