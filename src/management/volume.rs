use std::{io, path::PathBuf};

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::config;

#[derive(Debug, Serialize, Deserialize)]
struct StoredVolume {
    volume: f32,
}

/// Last audible volume, kept on disk so a `player mute` in one invocation
/// can be undone by the next one.
#[derive(Debug, Clone)]
pub struct VolumeMemory {
    path: PathBuf,
}

impl VolumeMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Memory under the application's cache directory.
    pub fn default_location() -> Self {
        Self::new(config::app_dir().join("cache/volume.json"))
    }

    /// The remembered volume; `None` when nothing usable was stored.
    pub async fn load(&self) -> Option<f32> {
        let content = async_fs::read_to_string(&self.path).await.ok()?;
        let stored: StoredVolume = serde_json::from_str(&content).ok()?;
        (stored.volume > 0.0).then_some(stored.volume.min(1.0))
    }

    /// Stores `volume` unless it is silence.
    ///
    /// # Errors
    ///
    /// Fails when the cache directory or the file cannot be written.
    pub async fn remember(&self, volume: f32) -> Result<(), StoreError> {
        if volume <= 0.0 {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string(&StoredVolume { volume })?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub async fn forget(&self) -> Result<(), StoreError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
