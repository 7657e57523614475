use tabled::Table;

use super::{auth::require_token, import::add_to_library};
use crate::{
    error, info,
    recent::{RecentActivity, fetch_recent_activity},
    spotify::SpotifyClient,
    types::{ImportedItem, ItemKind},
    utils, warning,
};

/// Shows recently played albums and suggested playlists, or imports one of
/// them by id.
pub async fn recent(import: Option<String>) {
    let token = require_token().await;
    let client = SpotifyClient::from_env();

    let pb = utils::spinner("Fetching recent activity...");
    let result = fetch_recent_activity(&client, &token).await;
    pb.finish_and_clear();

    let activity = match result {
        Ok(activity) => activity,
        Err(e) => error!("{}", e),
    };

    match import {
        Some(id) => match find(&activity, &id) {
            Some(item) => add_to_library(item).await,
            None => warning!("Nothing with id {} in your recent activity.", id),
        },
        None => print_activity(&activity),
    }
}

fn find(activity: &RecentActivity, id: &str) -> Option<ImportedItem> {
    let album = activity
        .albums
        .iter()
        .find(|e| e.has_id(id))
        .map(|entry| (ItemKind::Album, entry));
    let playlist = || {
        activity
            .playlists
            .iter()
            .find(|e| e.has_id(id))
            .map(|entry| (ItemKind::Playlist, entry))
    };

    album.or_else(playlist).map(|(kind, entry)| ImportedItem {
        kind,
        entry: entry.clone(),
    })
}

fn print_activity(activity: &RecentActivity) {
    if activity.albums.is_empty() && activity.playlists.is_empty() {
        info!("No recent activity found.");
        return;
    }

    if !activity.albums.is_empty() {
        info!("Recent albums");
        println!(
            "{}",
            Table::new(utils::table_rows(ItemKind::Album, &activity.albums))
        );
    }
    if !activity.playlists.is_empty() {
        info!("Playlists for you");
        println!(
            "{}",
            Table::new(utils::table_rows(ItemKind::Playlist, &activity.playlists))
        );
    }
}
