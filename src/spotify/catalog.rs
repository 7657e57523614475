use serde_json::Value;

use super::{SpotifyClient, SpotifyError};
use crate::types::{
    AlbumsEnvelope, ItemDetail, ItemKind, LibraryEntry, Paging, PlayHistoryItem,
    PlaylistsEnvelope,
};

impl SpotifyClient {
    /// Looks a playlist up by id.
    ///
    /// # Errors
    ///
    /// [`SpotifyError::Status`] with 404 for unknown or unlisted playlists and
    /// 403 for private ones.
    pub async fn playlist(&self, token: &str, id: &str) -> Result<LibraryEntry, SpotifyError> {
        self.get(token, &format!("/playlists/{id}")).await
    }

    /// Looks an album up by id.
    pub async fn album(&self, token: &str, id: &str) -> Result<LibraryEntry, SpotifyError> {
        self.get(token, &format!("/albums/{id}")).await
    }

    /// Full playlist or album object with its first page of tracks.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token of the user
    /// * `kind` - Whether `id` names a playlist or an album
    /// * `id` - Spotify id of the item
    ///
    /// # Errors
    ///
    /// [`SpotifyError::Status`] when Spotify rejects the lookup.
    pub async fn item_detail(
        &self,
        token: &str,
        kind: ItemKind,
        id: &str,
    ) -> Result<ItemDetail, SpotifyError> {
        let path = match kind {
            ItemKind::Playlist => format!("/playlists/{id}"),
            ItemKind::Album => format!("/albums/{id}"),
        };
        let object = self.get_json(token, &path).await?;
        Ok(ItemDetail::from_provider(kind, object))
    }

    /// Playlists owned or followed by the user.
    pub async fn my_playlists(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<LibraryEntry>, SpotifyError> {
        let page: Paging<Option<LibraryEntry>> = self
            .get(token, &format!("/me/playlists?limit={limit}"))
            .await?;
        Ok(page.items.into_iter().flatten().collect())
    }

    /// Raw `GET /me/playlists` answer, forwarded by the proxy.
    pub async fn my_playlists_raw(&self, token: &str) -> Result<Value, SpotifyError> {
        self.get_json(token, "/me/playlists").await
    }

    /// Raw `GET /me/albums` answer, forwarded by the proxy.
    pub async fn my_albums_raw(&self, token: &str) -> Result<Value, SpotifyError> {
        self.get_json(token, "/me/albums").await
    }

    /// Raw recently played answer, forwarded by the proxy.
    pub async fn recently_played_raw(&self, token: &str, limit: u32) -> Result<Value, SpotifyError> {
        self.get_json(token, &format!("/me/player/recently-played?limit={limit}"))
            .await
    }

    /// The user's last played tracks, newest first.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token with the `user-read-recently-played` scope
    /// * `limit` - Number of tracks, at most 50
    pub async fn recently_played(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<PlayHistoryItem>, SpotifyError> {
        let page: Paging<PlayHistoryItem> = self
            .get(token, &format!("/me/player/recently-played?limit={limit}"))
            .await?;
        Ok(page.items)
    }

    /// Full-text playlist search.
    pub async fn search_playlists(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<LibraryEntry>, SpotifyError> {
        let envelope: PlaylistsEnvelope = self
            .get_with_query(token, "/search", &[("q", query), ("type", "playlist")])
            .await?;
        Ok(envelope.playlists.items.into_iter().flatten().collect())
    }

    /// Spotify's featured playlists.
    pub async fn featured_playlists(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<LibraryEntry>, SpotifyError> {
        let envelope: PlaylistsEnvelope = self
            .get(token, &format!("/browse/featured-playlists?limit={limit}"))
            .await?;
        Ok(envelope.playlists.items.into_iter().flatten().collect())
    }

    /// Playlists of a browse category such as `pop` or `mood`.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token of the user
    /// * `category` - Browse category id
    /// * `limit` - Page size
    pub async fn category_playlists(
        &self,
        token: &str,
        category: &str,
        limit: u32,
    ) -> Result<Vec<LibraryEntry>, SpotifyError> {
        let envelope: PlaylistsEnvelope = self
            .get(
                token,
                &format!("/browse/categories/{category}/playlists?limit={limit}"),
            )
            .await?;
        Ok(envelope.playlists.items.into_iter().flatten().collect())
    }

    /// Newly released albums.
    pub async fn new_releases(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<LibraryEntry>, SpotifyError> {
        let envelope: AlbumsEnvelope = self
            .get(token, &format!("/browse/new-releases?limit={limit}"))
            .await?;
        Ok(envelope.albums.items)
    }
}
