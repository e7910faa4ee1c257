//! Common assertion helpers for test output validation
//!
//! Provides predicates and assertion utilities for validating git-manager
//! command output and scan results.

#![allow(dead_code)]

use git_manager::Repository;
use predicates::prelude::*;

/// Creates a predicate that checks for the folder-not-found error message
pub fn folder_not_found() -> impl Predicate<str> {
    predicates::str::contains("Folder does not exist")
}

/// Creates a predicate that checks for the error prefix printed by the CLI
pub fn has_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

/// A failed record carries nothing but its identity and the message
pub fn assert_failed_record(repo: &Repository) {
    assert!(repo.error_message.is_some(), "{} should have failed", repo.name);
    assert!(repo.current_branch.is_none());
    assert!(repo.comparison_branch.is_none());
    assert!(repo.base_ref.is_none());
    assert!(repo.remote_url.is_none());
    assert!(repo.commits.is_empty());
}

pub fn names(repositories: &[Repository]) -> Vec<&str> {
    repositories.iter().map(|r| r.name.as_str()).collect()
}
