use std::{io, path::PathBuf};

use clap::ValueEnum;

use super::StoreError;
use crate::{
    config,
    types::{ImportedItem, ItemKind, LibraryEntry},
};

pub const PLAYLISTS_KEY: &str = "imported_playlists";
pub const ALBUMS_KEY: &str = "imported_albums";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LibraryFilter {
    #[default]
    All,
    Playlists,
    Albums,
}

/// The library kept on this machine.
///
/// Playlists and albums live in two lists, each unique by provider id and
/// ordered by insertion. Both lists are stored under fixed keys, one JSON
/// file per key.
pub struct LibraryManager {
    root: PathBuf,
    playlists: Vec<LibraryEntry>,
    albums: Vec<LibraryEntry>,
}

impl LibraryManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            playlists: Vec::new(),
            albums: Vec::new(),
        }
    }

    pub fn default_root() -> PathBuf {
        config::app_dir().join("library")
    }

    /// Loads both lists from `root`. Lists that were never saved start empty.
    pub async fn load(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut manager = Self::new(root);
        manager.playlists = manager.read_key(PLAYLISTS_KEY).await?;
        manager.albums = manager.read_key(ALBUMS_KEY).await?;
        Ok(manager)
    }

    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(Self::default_root()).await
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;
        self.write_key(PLAYLISTS_KEY, &self.playlists).await?;
        self.write_key(ALBUMS_KEY, &self.albums).await
    }

    /// Adds an entry to the list matching `kind`.
    ///
    /// Returns `false` when an entry with the same id is already there, in
    /// which case the library is left unchanged.
    pub fn import(&mut self, kind: ItemKind, entry: LibraryEntry) -> bool {
        let list = self.list_mut(kind);
        let exists = match entry.id() {
            Some(id) => list.iter().any(|e| e.has_id(id)),
            None => true,
        };
        if exists {
            return false;
        }
        list.push(entry);
        true
    }

    pub fn import_item(&mut self, item: ImportedItem) -> bool {
        self.import(item.kind, item.entry)
    }

    /// Removes the entry with `id` from the list matching `kind`.
    pub fn remove(&mut self, kind: ItemKind, id: &str) -> bool {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|e| !e.has_id(id));
        list.len() != before
    }

    /// Removes `id` from whichever list holds it.
    pub fn remove_any(&mut self, id: &str) -> Option<ItemKind> {
        [ItemKind::Playlist, ItemKind::Album]
            .into_iter()
            .find(|kind| self.remove(*kind, id))
    }

    pub fn contains(&self, kind: ItemKind, id: &str) -> bool {
        self.list(kind).iter().any(|e| e.has_id(id))
    }

    /// Replaces both lists wholesale, dropping duplicate ids.
    pub fn replace(&mut self, playlists: Vec<LibraryEntry>, albums: Vec<LibraryEntry>) {
        self.playlists.clear();
        self.albums.clear();
        for entry in playlists {
            self.import(ItemKind::Playlist, entry);
        }
        for entry in albums {
            self.import(ItemKind::Album, entry);
        }
    }

    /// Items as shown by the library view: playlists first, then albums,
    /// each tagged with its type.
    pub fn items(&self, filter: LibraryFilter) -> Vec<ImportedItem> {
        let mut items = Vec::new();
        if filter != LibraryFilter::Albums {
            items.extend(self.playlists.iter().cloned().map(|entry| ImportedItem {
                kind: ItemKind::Playlist,
                entry,
            }));
        }
        if filter != LibraryFilter::Playlists {
            items.extend(self.albums.iter().cloned().map(|entry| ImportedItem {
                kind: ItemKind::Album,
                entry,
            }));
        }
        items
    }

    pub fn playlists(&self) -> &[LibraryEntry] {
        &self.playlists
    }

    pub fn albums(&self) -> &[LibraryEntry] {
        &self.albums
    }

    /// Looks an id up in both lists, playlists first.
    pub fn find(&self, id: &str) -> Option<ImportedItem> {
        [ItemKind::Playlist, ItemKind::Album]
            .into_iter()
            .find_map(|kind| {
                self.list(kind)
                    .iter()
                    .find(|e| e.has_id(id))
                    .map(|entry| ImportedItem {
                        kind,
                        entry: entry.clone(),
                    })
            })
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty() && self.albums.is_empty()
    }

    fn list(&self, kind: ItemKind) -> &Vec<LibraryEntry> {
        match kind {
            ItemKind::Playlist => &self.playlists,
            ItemKind::Album => &self.albums,
        }
    }

    fn list_mut(&mut self, kind: ItemKind) -> &mut Vec<LibraryEntry> {
        match kind {
            ItemKind::Playlist => &mut self.playlists,
            ItemKind::Album => &mut self.albums,
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    async fn read_key(&self, key: &str) -> Result<Vec<LibraryEntry>, StoreError> {
        match async_fs::read_to_string(self.key_path(key)).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write_key(&self, key: &str, entries: &[LibraryEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(self.key_path(key), json).await?;
        Ok(())
    }
}
