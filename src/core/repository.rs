//! Value records produced by a scan.
//!
//! Every record is built fresh by a scan or a single-repository refresh and never
//! mutated afterwards; a refresh replaces the whole [`Repository`] for its id.
//!
//! # Public API
//! - [`Repository`]: One discovered working copy, either loaded or failed
//! - [`Commit`]: One commit ahead of the base ref
//! - [`CodeLinePoint`]: One step of the code-size timeline
//!
//! # Serialization
//! Field names are camelCase and timestamps are ISO-8601, which is the format the
//! snapshot cache stores on disk.

use crate::core::remote::RemoteInfo;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ISSUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\d+").expect("valid issue regex"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub full_hash: String,
    pub short_hash: String,
    pub subject: String,
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    pub fn new(
        full_hash: impl Into<String>,
        short_hash: impl Into<String>,
        subject: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            full_hash: full_hash.into(),
            short_hash: short_hash.into(),
            subject: subject.into(),
            timestamp,
        }
    }

    /// Commits are identified by their full hash
    pub fn id(&self) -> &str {
        &self.full_hash
    }

    /// First `#123` style token in the subject, including the `#`
    pub fn issue_number(&self) -> Option<&str> {
        ISSUE_PATTERN.find(&self.subject).map(|m| m.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLinePoint {
    pub full_hash: String,
    pub short_hash: String,
    pub subject: String,
    pub timestamp: DateTime<Utc>,
    /// Added minus deleted lines in recognized source files
    pub delta: i64,
    /// Running total after this commit, never below zero
    pub total_lines: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "remoteURL")]
    pub remote_url: Option<String>,
    pub current_branch: Option<String>,
    pub comparison_branch: Option<String>,
    pub base_ref: Option<String>,
    pub commits: Vec<Commit>,
    pub error_message: Option<String>,
}

impl Repository {
    /// A successfully loaded repository
    pub fn loaded(
        path: &Path,
        remote_url: Option<String>,
        current_branch: Option<String>,
        comparison_branch: Option<String>,
        base_ref: Option<String>,
        commits: Vec<Commit>,
    ) -> Self {
        let (id, name) = identity(path);
        Self {
            id: id.clone(),
            name,
            path: id,
            remote_url,
            current_branch,
            comparison_branch,
            base_ref,
            commits,
            error_message: None,
        }
    }

    /// A repository whose load failed; only identity and the message survive
    pub fn failed(path: &Path, message: impl Into<String>) -> Self {
        let (id, name) = identity(path);
        Self {
            id: id.clone(),
            name,
            path: id,
            remote_url: None,
            current_branch: None,
            comparison_branch: None,
            base_ref: None,
            commits: Vec::new(),
            error_message: Some(message.into()),
        }
    }

    pub fn ahead_count(&self) -> usize {
        self.commits.len()
    }

    pub fn is_failed(&self) -> bool {
        self.error_message.is_some()
    }

    /// The ref commits are counted against the base from
    pub fn compare_ref(&self) -> Option<&str> {
        self.comparison_branch
            .as_deref()
            .or(self.current_branch.as_deref())
    }

    /// Short `.../<folder>` form of the path
    pub fn display_path(&self) -> String {
        let trimmed = self.path.trim();
        match Path::new(trimmed).file_name() {
            Some(last) if !trimmed.is_empty() => format!(".../{}", last.to_string_lossy()),
            _ => self.path.clone(),
        }
    }

    pub fn remote_info(&self) -> Option<RemoteInfo> {
        self.remote_url.as_deref().and_then(RemoteInfo::parse)
    }

    /// Link opening a pull/merge request from the compare ref into the base ref
    pub fn pull_request_url(&self) -> Option<String> {
        let base = self.base_ref.as_deref()?;
        let head = self.compare_ref()?;
        if head == base {
            return None;
        }
        self.remote_info()?.pull_request_url(base, head)
    }

    pub fn issue_url(&self, commit: &Commit) -> Option<String> {
        let token = commit.issue_number()?;
        self.remote_info()?.issue_url(token)
    }
}

fn identity(path: &Path) -> (String, String) {
    let id = path.to_string_lossy().into_owned();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.clone());
    (id, name)
}
