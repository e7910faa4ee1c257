//! Historical code size of a repository, one point per commit.
//!
//! `git log --reverse --numstat` yields every commit oldest first, each header
//! followed by `added<TAB>deleted<TAB>path` lines. Only lines whose path looks like
//! source code count: either a known extension or a known extensionless build file.
//! Binary files (`-` counts) are ignored. Renames are attributed to the new path.
//! Path quoting is switched off so non-ASCII file names arrive verbatim.

use crate::core::{
    commit_log::{epoch_timestamp, FIELD_SEPARATOR, RECORD_SEPARATOR},
    error::Result,
    git::GitClient,
    process::GitExecutor,
    repository::CodeLinePoint,
};
use std::path::Path;

const CODE_EXTENSIONS: &[&str] = &[
    "rs", "swift", "m", "mm", "h", "hh", "hpp", "c", "cc", "cpp", "cxx", "cs", "java", "kt",
    "kts", "scala", "groovy", "gradle", "go", "py", "rb", "php", "pl", "lua", "r", "dart",
    "ex", "exs", "erl", "hs", "clj", "elm", "js", "jsx", "mjs", "cjs", "ts", "tsx", "vue",
    "svelte", "html", "htm", "css", "scss", "sass", "less", "sh", "bash", "zsh", "fish",
    "ps1", "sql", "graphql", "proto", "json", "yaml", "yml", "toml", "xml", "plist", "ini",
    "cmake", "md", "tf", "nix", "zig",
];

const CODE_FILENAMES: &[&str] = &[
    "makefile",
    "dockerfile",
    "gemfile",
    "rakefile",
    "podfile",
    "cartfile",
    "brewfile",
    "procfile",
    "justfile",
    "vagrantfile",
    "jenkinsfile",
    "fastfile",
    "buck",
    "build",
    "workspace",
];

const RENAME_ARROW: &str = " => ";

fn history_format() -> String {
    format!(
        "--format={r}%H{f}%h{f}%ct{f}%s",
        f = FIELD_SEPARATOR,
        r = RECORD_SEPARATOR
    )
}

impl<E: GitExecutor> GitClient<E> {
    pub async fn code_line_history(&self, path: &Path) -> Result<Vec<CodeLinePoint>> {
        let format = history_format();
        let output = self
            .run(
                &[
                    "-c",
                    "core.quotePath=false",
                    "log",
                    "--reverse",
                    "--numstat",
                    &format,
                ],
                path,
            )
            .await?;
        Ok(parse_code_line_history(&output))
    }
}

pub fn parse_code_line_history(output: &str) -> Vec<CodeLinePoint> {
    let mut points = Vec::new();
    let mut total_lines: i64 = 0;

    for chunk in output.split(RECORD_SEPARATOR) {
        let mut lines = chunk.lines();
        let Some(header) = lines.next() else {
            continue;
        };
        let fields: Vec<&str> = header.splitn(4, FIELD_SEPARATOR).collect();
        if fields.len() != 4 {
            continue;
        }

        let delta: i64 = lines.filter_map(numstat_delta).sum();
        total_lines = (total_lines + delta).max(0);

        points.push(CodeLinePoint {
            full_hash: fields[0].trim().to_string(),
            short_hash: fields[1].to_string(),
            subject: fields[3].to_string(),
            timestamp: epoch_timestamp(fields[2]),
            delta,
            total_lines,
        });
    }

    points
}

/// Signed line change of one numstat line, `None` for binary or non-code files.
pub fn numstat_delta(line: &str) -> Option<i64> {
    let mut parts = line.splitn(3, '\t');
    let added: i64 = parts.next()?.trim().parse().ok()?;
    let deleted: i64 = parts.next()?.trim().parse().ok()?;
    let path = normalize_rename(parts.next()?.trim());

    is_code_path(&path).then_some(added - deleted)
}

/// Post-rename path of `prefix{old => new}suffix` or `old/path => new/path`.
pub fn normalize_rename(path: &str) -> String {
    if let (Some(open), Some(close)) = (path.find('{'), path.rfind('}')) {
        if open < close {
            let inner = &path[open + 1..close];
            if let Some((_, new)) = inner.rsplit_once(RENAME_ARROW) {
                let joined = format!("{}{}{}", &path[..open], new, &path[close + 1..]);
                return joined.replace("//", "/");
            }
        }
    }

    match path.rsplit_once(RENAME_ARROW) {
        Some((_, new)) => new.to_string(),
        None => path.to_string(),
    }
}

pub fn is_code_path(path: &str) -> bool {
    let path = Path::new(path);
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            CODE_EXTENSIONS.contains(&ext.as_str())
        }
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .is_some_and(|name| CODE_FILENAMES.contains(&name.as_str())),
    }
}
