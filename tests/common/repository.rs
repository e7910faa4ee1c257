//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories inside a temporary workspace
//! folder, committing with fixed dates so branch recency is deterministic.

#![allow(dead_code)]

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// First commit date used by [`commit_file`]; each later commit is one hour newer.
const BASE_EPOCH: i64 = 1_700_000_000;

/// Temporary folder that holds any number of repositories. The TempDir must be
/// kept alive for the duration of the test to prevent cleanup.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    commits: std::cell::Cell<i64>,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = fs::canonicalize(temp_dir.path())?.join("projects");
        fs::create_dir_all(&root)?;
        Ok(Self {
            temp_dir,
            root,
            commits: std::cell::Cell::new(0),
        })
    }

    /// Path of the workspace folder to scan
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A directory next to the scanned folder, e.g. for cache or config files
    pub fn side_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = fs::canonicalize(self.temp_dir.path())?.join(name);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Initialize an empty repository on `main` at `relative` inside the workspace
    pub fn init_repo(&self, relative: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        fs::create_dir_all(&path)?;
        git(&path, &["init", "--quiet"])?;
        git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        git(&path, &["config", "user.name", "Test User"])?;
        git(&path, &["config", "user.email", "test@example.com"])?;
        git(&path, &["config", "commit.gpgsign", "false"])?;
        Ok(path)
    }

    /// Write `content` to `file` and commit it with the next fixed date
    pub fn commit_file(&self, repo: &Path, file: &str, content: &str, message: &str) -> Result<()> {
        let target = repo.join(file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
        git(repo, &["add", "--all"])?;
        self.commit(repo, message)
    }

    /// Commit whatever is staged plus tracked deletions
    pub fn commit(&self, repo: &Path, message: &str) -> Result<()> {
        let n = self.commits.get();
        self.commits.set(n + 1);
        let date = format!("{} +0000", BASE_EPOCH + n * 3600);

        let output = Command::new("git")
            .args(["commit", "--quiet", "--allow-empty", "-m", message])
            .current_dir(repo)
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .output()
            .context("failed to run git commit")?;
        if !output.status.success() {
            bail!(
                "git commit failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }
}

/// Run git in `repo`, failing the test helper when git exits non-zero
pub fn git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn create_branch(repo: &Path, branch: &str) -> Result<()> {
    git(repo, &["checkout", "--quiet", "-b", branch])?;
    Ok(())
}

pub fn checkout(repo: &Path, branch: &str) -> Result<()> {
    git(repo, &["checkout", "--quiet", branch])?;
    Ok(())
}

pub fn add_remote(repo: &Path, name: &str, url: &str) -> Result<()> {
    git(repo, &["remote", "add", name, url])?;
    Ok(())
}

pub fn head_hash(repo: &Path) -> Result<String> {
    git(repo, &["rev-parse", "HEAD"])
}
