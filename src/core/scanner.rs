//! Discovery of git working copies below a root folder.
//!
//! The walk is a `walkdir` traversal that never follows symbolic links. A
//! directory containing a `.git` entry (directory, or pointer file for worktrees
//! and submodules) is a repository root and is not descended into, so nested
//! repositories such as vendored checkouts are never reported twice. Hidden
//! entries below the root are skipped; unreadable directories are skipped silently.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const GIT_METADATA_ENTRY: &str = ".git";

/// Repository roots under `root`, in no particular order.
pub fn find_repositories(root: &Path) -> Vec<PathBuf> {
    let mut repositories = Vec::new();
    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        if is_repository(entry.path()) {
            repositories.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    log::debug!(
        "Found {} repositories under {}",
        repositories.len(),
        root.display()
    );
    repositories
}

pub fn is_repository(path: &Path) -> bool {
    path.join(GIT_METADATA_ENTRY).exists()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
