use std::{io, path::PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::types::{Library, LibraryEntry};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file access failed: {0}")]
    Io(#[from] io::Error),

    #[error("stored data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One JSON file per user under a data directory.
///
/// Saves overwrite the file wholesale. There is no locking: two sessions
/// saving at once race and the last write wins.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    dir: PathBuf,
}

impl LibraryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes the user's library and returns what was stored.
    pub async fn save(
        &self,
        user_id: &str,
        playlists: Vec<LibraryEntry>,
        albums: Vec<LibraryEntry>,
    ) -> Result<Library, StoreError> {
        let library = Library::new(user_id, playlists, albums);

        async_fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(&library)?;
        async_fs::write(self.path_for(user_id), json).await?;
        Ok(library)
    }

    /// Reads the user's library exactly as stored.
    ///
    /// The file is parsed as plain JSON and returned unchanged, key order
    /// and unknown fields included.
    ///
    /// # Returns
    ///
    /// The stored document, or [`Library::empty`] when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] when the file exists but cannot be read and
    /// [`StoreError::Serde`] when it is not JSON.
    pub async fn load(&self, user_id: &str) -> Result<Value, StoreError> {
        let json = match async_fs::read_to_string(self.path_for(user_id)).await {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(serde_json::to_value(Library::empty(user_id))?);
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(serde_json::from_str(&json)?)
    }

    pub fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{user_id}.json"))
    }
}
