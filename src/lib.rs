//! Git Manager - scans a folder for git repositories and reports, for each one,
//! what its working branch has on top of `main`/`master`.
//!
//! Every fact comes from running the `git` executable; nothing links against libgit2.
//! A scan loads repositories concurrently, sorts them by name and keeps the last
//! result on disk so it can be shown again before the next scan finishes.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The scan service ([`RepoService`]) and its outcome type
//! - The repository model: repositories, commits, code-line history points
//! - Remote URL parsing and web link building
//! - The git client and the executor seam used to run git
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Scanning
    find_repositories,
    CodeLinePoint,
    Commit,
    // Git execution
    GitClient,
    GitExecutor,
    // Error handling
    GitManagerError,
    // Configuration
    ManagerConfig,
    Provider,
    RemoteInfo,
    RepoService,
    // Repository model
    Repository,
    Result,
    ScanOutcome,
    SnapshotCache,
    SystemGit,
};
