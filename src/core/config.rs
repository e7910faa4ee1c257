use crate::core::dirs::{get_cache_directory, get_config_directory};
use crate::core::error::{GitManagerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ManagerConfig {
    /// Executable used for every git invocation
    pub git_binary: String,
    /// Repositories loaded at the same time during a scan
    pub max_concurrent_loads: usize,
    /// Per git call; unset means wait forever
    pub command_timeout_secs: Option<u64>,
    /// Where the scan snapshot is stored; the user cache directory when unset
    pub cache_dir: Option<PathBuf>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
            max_concurrent_loads: 8,
            command_timeout_secs: None,
            cache_dir: None,
        }
    }
}

impl ManagerConfig {
    pub fn default_path() -> PathBuf {
        get_config_directory().join(CONFIG_FILE)
    }

    /// Load from the user config directory, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GitManagerError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| GitManagerError::config_parse_failed(path, e))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| GitManagerError::config_write_failed(dir, e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| GitManagerError::config_write_failed(path, e))
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn concurrency(&self) -> usize {
        self.max_concurrent_loads.max(1)
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(get_cache_directory)
    }
}
