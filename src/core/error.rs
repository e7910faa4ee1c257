//! Domain-specific error types for git-manager.
//!
//! [`GitManagerError`] covers the few things that can actually fail: running the
//! external `git` binary, reading or writing the snapshot cache and the config file,
//! and pointing the service at a folder that does not exist. Expected "nothing to
//! show" states (no base branch, no remote, no comparison branch) are modelled as
//! `Option::None` by the resolvers and never reach this type.
//!
//! # Public API
//! - [`GitManagerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitManagerError>`

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Domain-specific error types for git-manager
#[derive(Error, Debug)]
pub enum GitManagerError {
    // External process errors
    #[error("{}", failure_text(.0))]
    CommandFailed(String),

    #[error("Failed to run '{binary}': {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    #[error("'{command}' did not finish within {timeout:?}")]
    CommandTimedOut { command: String, timeout: Duration },

    // Folder selection errors
    #[error("Folder does not exist: {path}")]
    FolderNotFound { path: PathBuf },

    #[error("No folder selected")]
    NoFolderSelected,

    // Cache errors
    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize cache data: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{path}': {source}")]
    CacheParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Config errors
    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitManagerError
pub type Result<T> = std::result::Result<T, GitManagerError>;

fn failure_text(message: &str) -> &str {
    if message.is_empty() {
        "Git command failed"
    } else {
        message
    }
}

impl GitManagerError {
    /// Create a command failed error from the captured process output
    pub fn command_failed(message: impl Into<String>) -> Self {
        Self::CommandFailed(message.into())
    }

    /// Create a spawn error for a binary that could not be started
    pub fn spawn(binary: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            binary: binary.into(),
            source,
        }
    }

    /// Create a timeout error for a command line
    pub fn command_timed_out(command: impl Into<String>, timeout: Duration) -> Self {
        Self::CommandTimedOut {
            command: command.into(),
            timeout,
        }
    }

    /// Create a folder not found error
    pub fn folder_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FolderNotFound { path: path.into() }
    }

    /// Message text of a failed command, if this is one
    pub fn command_message(&self) -> Option<&str> {
        match self {
            Self::CommandFailed(message) => Some(message),
            _ => None,
        }
    }

    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn cache_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheParseFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }
}
