//! Commits reachable from a compare ref but not from the base ref.
//!
//! The log is requested with control-character separators so subjects can contain
//! anything printable: fields are split on `U+001F`, records on `U+001E`.

use crate::core::{error::Result, git::GitClient, process::GitExecutor, repository::Commit};
use chrono::{DateTime, Utc};
use std::path::Path;

pub const FIELD_SEPARATOR: char = '\u{1f}';
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// Full hash, short hash, subject, committer epoch seconds; one record each.
fn commit_format() -> String {
    format!(
        "--pretty=format:%H{f}%h{f}%s{f}%ct{r}",
        f = FIELD_SEPARATOR,
        r = RECORD_SEPARATOR
    )
}

impl<E: GitExecutor> GitClient<E> {
    pub async fn commits_between(
        &self,
        base_ref: &str,
        compare_ref: &str,
        path: &Path,
    ) -> Result<Vec<Commit>> {
        let format = commit_format();
        let range = format!("{base_ref}..{compare_ref}");
        let output = self.run(&["log", &format, &range], path).await?;
        Ok(parse_commit_log(&output))
    }
}

/// Decode log output; records without exactly four fields are dropped.
pub fn parse_commit_log(output: &str) -> Vec<Commit> {
    if output.is_empty() {
        return Vec::new();
    }

    output
        .split(RECORD_SEPARATOR)
        .filter_map(|record| {
            let record = record.trim_matches(|c| c == '\n' || c == '\r');
            let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
            if fields.len() != 4 {
                return None;
            }
            Some(Commit::new(
                fields[0],
                fields[1],
                fields[2],
                epoch_timestamp(fields[3]),
            ))
        })
        .collect()
}

/// Epoch seconds, or the epoch itself when the field does not parse.
pub fn epoch_timestamp(field: &str) -> DateTime<Utc> {
    field
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_default()
}
