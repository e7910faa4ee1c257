//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories in specific branch states
//! to test scanning scenarios consistently.

#![allow(dead_code)]

use super::repository::*;
use anyhow::Result;
use std::path::PathBuf;

/// Scenario: `main` with one commit, then `feature-x` two commits ahead and checked out.
/// The repository has a GitHub `origin` remote.
pub fn create_feature_repo(workspace: &TestWorkspace, name: &str) -> Result<PathBuf> {
    let repo = workspace.init_repo(name)?;
    workspace.commit_file(&repo, "README.txt", "readme\n", "Initial commit")?;
    create_branch(&repo, "feature-x")?;
    workspace.commit_file(&repo, "src/login.rs", "fn login() {}\n", "Add login (#12)")?;
    workspace.commit_file(&repo, "src/login.rs", "fn login() {}\n\n", "Fix typo")?;
    add_remote(&repo, "origin", &format!("git@github.com:acme/{name}.git"))?;
    Ok(repo)
}

/// Scenario: a single `master` branch with one commit and no remote
pub fn create_master_only_repo(workspace: &TestWorkspace, name: &str) -> Result<PathBuf> {
    let repo = workspace.init_repo(name)?;
    git(&repo, &["symbolic-ref", "HEAD", "refs/heads/master"])?;
    workspace.commit_file(&repo, "notes.txt", "notes\n", "Initial commit")?;
    Ok(repo)
}

/// Scenario: a folder that looks like a repository but git cannot read it
pub fn create_broken_repo(workspace: &TestWorkspace, name: &str) -> Result<PathBuf> {
    let path = workspace.root().join(name);
    std::fs::create_dir_all(&path)?;
    std::fs::write(path.join(".git"), "gitdir: ./missing-metadata\n")?;
    Ok(path)
}
