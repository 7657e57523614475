use tabled::Table;

use super::{auth::require_token, player::open_bridge};
use crate::{
    error, info,
    management::{LibraryFilter, LibraryManager},
    proxy::ProxyClient,
    spotify::SpotifyClient,
    success,
    types::LibraryTableRow,
    utils, warning,
};

/// Prints the local library, playlists first.
pub async fn list_library(filter: LibraryFilter) {
    let manager = load_library().await;

    let rows: Vec<LibraryTableRow> = manager.items(filter).iter().map(Into::into).collect();
    if rows.is_empty() {
        info!(
            "Your library is empty. Import something with {} import <url>",
            env!("CARGO_PKG_NAME")
        );
        return;
    }

    println!("{}", Table::new(rows));
}

/// Drops an entry from the local library by id.
pub async fn remove(id: &str) {
    let mut manager = load_library().await;

    match manager.remove_any(id) {
        Some(kind) => {
            if let Err(e) = manager.persist().await {
                error!("Failed to save library. Err: {}", e);
            }
            success!("Removed {} {}", kind, id);
        }
        None => warning!("Nothing with id {} in your library.", id),
    }
}

/// Shows the tracks of a library item and optionally plays one of them.
///
/// # Arguments
///
/// * `id` - Id of a playlist or album in the local library
/// * `play` - Track number from the printed table to start, counting from 1
pub async fn show(id: &str, play: Option<usize>) {
    let Some(item) = load_library().await.find(id) else {
        error!(
            "Nothing with id {} in your library. List it with {} library",
            id,
            env!("CARGO_PKG_NAME")
        );
    };
    let token = require_token().await;
    let client = SpotifyClient::from_env();

    let pb = utils::spinner(format!("Loading {}...", item.entry.name()));
    let result = client.item_detail(&token, item.kind, id).await;
    pb.finish_and_clear();

    let detail = match result {
        Ok(detail) => detail,
        Err(e) => error!("Failed to load {}. Err: {}", item.kind, e),
    };

    info!("{} ({})", detail.entry.name(), detail.kind);
    if detail.tracks.is_empty() {
        warning!("No tracks.");
    } else {
        println!("{}", Table::new(utils::track_rows(&detail.tracks)));
    }

    let Some(number) = play else {
        return;
    };
    let Some(track) = detail.track(number) else {
        error!("There is no track {} in {}.", number, detail.entry.name());
    };
    let Some(context_uri) = detail.entry.uri().or(item.entry.uri()) else {
        error!("{} has no URI to play from.", detail.entry.name());
    };

    let mut bridge = open_bridge(&client, &token).await;
    if bridge.state().device_id.is_none() {
        warning!("No active device. Start Spotify on a device first.");
        return;
    }
    bridge.play_track(context_uri, &track.uri).await;
    info!("Starting {} - {}", track.name, track.artist_names());
}

/// Uploads the local library to the proxy, replacing the synced copy.
pub async fn push() {
    let token = require_token().await;
    let manager = load_library().await;
    let user_id = current_user_id(&token).await;

    let pb = utils::spinner("Saving library...");
    let result = ProxyClient::from_env()
        .save_library(&token, &user_id, manager.playlists(), manager.albums())
        .await;
    pb.finish_and_clear();

    match result {
        Ok(response) => success!("{}", response.message),
        Err(e) => error!("Failed to save library: {}", e.reason()),
    }
}

/// Replaces the local library with the synced copy.
pub async fn pull() {
    let token = require_token().await;
    let user_id = current_user_id(&token).await;

    let pb = utils::spinner("Loading library...");
    let result = ProxyClient::from_env().load_library(&token, &user_id).await;
    pb.finish_and_clear();

    let library = match result {
        Ok(library) => library,
        Err(e) => error!("Failed to load library: {}", e.reason()),
    };

    let mut manager = load_library().await;
    if library.playlists.is_empty() && library.albums.is_empty() && !manager.is_empty() {
        warning!("The synced library is empty, keeping your local copy. Run `sync push` to upload it.");
        return;
    }
    manager.replace(library.playlists, library.albums);
    if let Err(e) = manager.persist().await {
        error!("Failed to save library. Err: {}", e);
    }
    success!(
        "Pulled {} playlists and {} albums (last updated {}).",
        manager.playlists().len(),
        manager.albums().len(),
        library.last_updated.as_deref().unwrap_or("unknown")
    );
}

async fn load_library() -> LibraryManager {
    match LibraryManager::load_default().await {
        Ok(manager) => manager,
        Err(e) => error!("Failed to load library. Err: {}", e),
    }
}

async fn current_user_id(token: &str) -> String {
    match SpotifyClient::from_env().current_user(token).await {
        Ok(user) => user.id,
        Err(e) => error!("Cannot resolve the current user. Err: {}", e),
    }
}
