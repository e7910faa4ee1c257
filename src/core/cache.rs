//! Last scan result persisted to disk for instant redisplay.
//!
//! A single snapshot file holds the repositories of the most recent completed scan
//! together with the folder they came from. A snapshot is only handed back for the
//! exact same folder path string; anything else (other folder, unreadable file,
//! older format) is discarded as a whole.
//!
//! # Public API
//! - [`SnapshotCache`]: Reads and writes the snapshot file
//! - [`RepoCacheSnapshot`]: On-disk record `{folderPath, repositories, cachedAt}`

use crate::core::{
    dirs::get_cache_directory,
    error::{GitManagerError, Result},
    repository::Repository,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE: &str = "repositories.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoCacheSnapshot {
    pub folder_path: String,
    pub repositories: Vec<Repository>,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SnapshotCache {
    file: PathBuf,
}

impl SnapshotCache {
    /// Cache stored in `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            file: dir.into().join(SNAPSHOT_FILE),
        }
    }

    /// Cache stored in the per-user cache directory
    pub fn user_default() -> Self {
        Self::in_dir(get_cache_directory())
    }

    pub fn file_path(&self) -> &Path {
        &self.file
    }

    pub fn save(&self, folder_path: &str, repositories: &[Repository]) -> Result<()> {
        let snapshot = RepoCacheSnapshot {
            folder_path: folder_path.to_string(),
            repositories: repositories.to_vec(),
            cached_at: Utc::now(),
        };

        if let Some(dir) = self.file.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                log::error!("Failed to create cache directory '{}': {}", dir.display(), e);
                GitManagerError::cache_directory_creation_failed(dir, e)
            })?;
        }

        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| {
            log::error!("Failed to serialize snapshot: {e}");
            GitManagerError::cache_serialization_failed(e)
        })?;

        // Write then rename so a concurrent reader never sees half a file
        let staging = self.file.with_extension("json.tmp");
        fs::write(&staging, json)
            .and_then(|_| fs::rename(&staging, &self.file))
            .map_err(|e| {
                log::error!("Failed to write snapshot '{}': {}", self.file.display(), e);
                GitManagerError::cache_write_failed(&self.file, e)
            })?;

        log::debug!(
            "Cached {} repositories for {}",
            repositories.len(),
            folder_path
        );
        Ok(())
    }

    /// Snapshot for exactly `folder_path`, if one is stored and readable
    pub fn load_snapshot(&self, folder_path: &str) -> Option<RepoCacheSnapshot> {
        match self.read() {
            Ok(Some(snapshot)) if snapshot.folder_path == folder_path => Some(snapshot),
            Ok(Some(snapshot)) => {
                log::debug!(
                    "Discarding snapshot for {} (requested {})",
                    snapshot.folder_path,
                    folder_path
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Ignoring unreadable snapshot: {e}");
                None
            }
        }
    }

    /// Cached repositories for `folder_path`, empty when there is no matching snapshot
    pub fn load(&self, folder_path: &str) -> Vec<Repository> {
        self.load_snapshot(folder_path)
            .map(|snapshot| snapshot.repositories)
            .unwrap_or_default()
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.file) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GitManagerError::cache_write_failed(&self.file, e)),
        }
    }

    fn read(&self) -> Result<Option<RepoCacheSnapshot>> {
        if !self.file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file)
            .map_err(|e| GitManagerError::cache_read_failed(&self.file, e))?;
        let snapshot = serde_json::from_str(&content)
            .map_err(|e| GitManagerError::cache_parse_failed(&self.file, e))?;
        Ok(Some(snapshot))
    }
}
