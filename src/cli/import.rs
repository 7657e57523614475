use super::auth::optional_token;
use crate::{
    error, importer, info, management::LibraryManager, spotify::SpotifyClient, success,
    types::ImportedItem, utils,
};

/// Imports a pasted Spotify URL into the local library.
pub async fn import(url: &str) {
    let token = optional_token().await;
    let client = SpotifyClient::from_env();

    let pb = utils::spinner("Resolving...");
    let result = importer::import_url(&client, token.as_deref(), url).await;
    pb.finish_and_clear();

    match result {
        Ok(item) => add_to_library(item).await,
        Err(e) => error!("{}", e),
    }
}

/// Stores an item unless an entry with its id is already there.
pub(crate) async fn add_to_library(item: ImportedItem) {
    let mut manager = match LibraryManager::load_default().await {
        Ok(manager) => manager,
        Err(e) => error!("Failed to load library. Err: {}", e),
    };

    let kind = item.kind;
    let name = item.entry.name().to_string();
    if !manager.import_item(item) {
        info!("{} is already in your library.", name);
        return;
    }

    if let Err(e) = manager.persist().await {
        error!("Failed to save library. Err: {}", e);
    }
    success!("Imported {} {}", kind, name);
}
