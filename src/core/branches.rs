//! Branch topology of a working copy.
//!
//! - **Current branch**: `git rev-parse --abbrev-ref HEAD`, with a fallback that reads
//!   the `HEAD` file directly (following the `gitdir:` pointer of linked worktrees)
//!   when git reports a detached `HEAD` or fails, e.g. in a repository without commits.
//! - **Base ref**: `main` if it exists locally, else `master`, else none.
//! - **Comparison branch**: the most recently committed local branch that is not a
//!   primary branch, else the current branch when that is not primary either.

use crate::core::{error::Result, git::GitClient, process::GitExecutor};
use std::path::{Path, PathBuf};

/// Trunk branch names in order of preference.
pub const PRIMARY_BRANCHES: [&str; 2] = ["main", "master"];

impl<E: GitExecutor> GitClient<E> {
    pub async fn current_branch(&self, path: &Path) -> Result<Option<String>> {
        match self.run(&["rev-parse", "--abbrev-ref", "HEAD"], path).await {
            Ok(output) if output.is_empty() => Ok(None),
            Ok(output) if output == "HEAD" => Ok(head_branch_fallback(path)),
            Ok(output) => Ok(Some(output)),
            Err(e) => match head_branch_fallback(path) {
                Some(branch) => {
                    log::debug!("rev-parse failed in {}, using HEAD file: {e}", path.display());
                    Ok(Some(branch))
                }
                None => Err(e),
            },
        }
    }

    pub async fn local_branches(&self, path: &Path) -> Result<Vec<String>> {
        self.ref_names(&["for-each-ref", "refs/heads", "--format=%(refname:short)"], path)
            .await
    }

    pub async fn remote_branches(&self, path: &Path) -> Result<Vec<String>> {
        self.ref_names(&["for-each-ref", "refs/remotes", "--format=%(refname:short)"], path)
            .await
    }

    pub async fn base_ref(&self, path: &Path) -> Result<Option<String>> {
        let locals = self.local_branches(path).await?;
        Ok(select_base_ref(&locals))
    }

    pub async fn latest_non_primary_branch(
        &self,
        path: &Path,
        base_ref: Option<&str>,
        current_branch: Option<&str>,
    ) -> Result<Option<String>> {
        let by_recency = self
            .ref_names(
                &[
                    "for-each-ref",
                    "refs/heads",
                    "--sort=-committerdate",
                    "--format=%(refname:short)",
                ],
                path,
            )
            .await?;
        Ok(select_comparison_branch(&by_recency, base_ref, current_branch))
    }

    async fn ref_names(&self, args: &[&str], path: &Path) -> Result<Vec<String>> {
        let output = self.run(args, path).await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

pub fn select_base_ref(local_branches: &[String]) -> Option<String> {
    PRIMARY_BRANCHES
        .into_iter()
        .find(|primary| local_branches.iter().any(|b| b == primary))
        .map(str::to_string)
}

/// Pick the comparison branch from local branches sorted newest commit first.
pub fn select_comparison_branch(
    branches_by_recency: &[String],
    base_ref: Option<&str>,
    current_branch: Option<&str>,
) -> Option<String> {
    let is_excluded =
        |name: &str| PRIMARY_BRANCHES.contains(&name) || base_ref.is_some_and(|b| b == name);

    branches_by_recency
        .iter()
        .find(|name| !is_excluded(name.as_str()))
        .cloned()
        .or_else(|| {
            current_branch
                .filter(|current| !is_excluded(*current))
                .map(str::to_string)
        })
}

/// Branch name from the `HEAD` file, when it holds a symbolic ref.
fn head_branch_fallback(path: &Path) -> Option<String> {
    let git_dir = git_directory(path)?;
    let head = std::fs::read_to_string(git_dir.join("HEAD")).ok()?;
    let reference = head.trim().strip_prefix("ref:")?.trim();
    reference
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// The metadata directory of a working copy: `.git` itself, or the target of a
/// `gitdir:` pointer file (relative pointers resolve against the working copy).
pub fn git_directory(path: &Path) -> Option<PathBuf> {
    let dot_git = path.join(".git");
    let metadata = std::fs::metadata(&dot_git).ok()?;
    if metadata.is_dir() {
        return Some(dot_git);
    }

    let contents = std::fs::read_to_string(&dot_git).ok()?;
    let target = contents.trim().strip_prefix("gitdir:")?.trim();
    if target.is_empty() {
        return None;
    }
    Some(path.join(target))
}
