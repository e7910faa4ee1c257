//! Core functionality for git-manager.
//!
//! This module provides the git plumbing (process execution, branch and remote
//! resolution, log parsing), repository discovery, the scan service and its
//! snapshot cache, plus configuration and terminal output helpers.

pub mod branches;
pub mod cache;
pub mod code_lines;
pub mod commit_log;
pub mod config;
pub mod dirs;
pub mod error;
pub mod git;
pub mod output;
pub mod process;
pub mod remote;
pub mod repo_service;
pub mod repository;
pub mod scanner;

#[cfg(test)]
pub(crate) mod testing;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{GitManagerError, Result};

// === Git execution ===
// Subprocess runner and the client that layers the ownership retry on top of it
pub use git::GitClient;
pub use process::{GitExecutor, SystemGit};

// === Repository model ===
// Plain values produced by a scan and by the code-line history
pub use remote::{Provider, RemoteInfo};
pub use repository::{CodeLinePoint, Commit, Repository};

// === Scanning ===
// Folder discovery, concurrent loading and the persisted last result
pub use cache::{RepoCacheSnapshot, SnapshotCache};
pub use repo_service::{RepoService, ScanOutcome, ScopedAccess};
pub use scanner::find_repositories;

// === Configuration ===
pub use config::ManagerConfig;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_section_header, print_success};
