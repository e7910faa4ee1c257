use crate::core::{
    error::{GitManagerError, Result},
    output::repository_line,
    print_info, print_section_header,
    process::GitExecutor,
    repo_service::{RepoService, ScanOutcome},
    repository::Repository,
};
use colored::*;
use std::path::{Path, PathBuf};

pub async fn execute_scan<E: GitExecutor>(
    service: &RepoService<E>,
    root: &Path,
    json: bool,
    use_cache: bool,
) -> Result<()> {
    let root = resolve_folder(root)?;

    // Show the previous result first; the fresh one replaces it below
    let cached = service.select_folder(Some(root.clone()), None);
    if use_cache && !json && !cached.is_empty() {
        let cached_at = service
            .cache()
            .load_snapshot(&root.to_string_lossy())
            .map(|snapshot| snapshot.cached_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default();
        print_section_header(&format!("Cached {cached_at}"));
        print_repositories(&cached);
    }

    match service.scan(&root).await? {
        ScanOutcome::Completed { repositories, .. } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&repositories)?);
            } else if repositories.is_empty() {
                print_info(&format!("No git repositories under {}", root.display()));
            } else {
                print_section_header(&format!("Repositories ({})", root.display()));
                print_repositories(&repositories);
                print_summary(&repositories);
            }
        }
        ScanOutcome::Superseded { generation } => {
            log::debug!("Scan {generation} was superseded, nothing to show");
        }
    }

    Ok(())
}

/// Absolute form of a folder argument, so cache keys do not depend on the cwd
pub fn resolve_folder(folder: &Path) -> Result<PathBuf> {
    if !folder.is_dir() {
        return Err(GitManagerError::folder_not_found(folder));
    }
    Ok(std::fs::canonicalize(folder)?)
}

pub fn print_repositories(repositories: &[Repository]) {
    for repo in repositories {
        println!("  {}", repository_line(repo));
    }
}

fn print_summary(repositories: &[Repository]) {
    let failed = repositories.iter().filter(|r| r.is_failed()).count();
    let ahead = repositories.iter().filter(|r| r.ahead_count() > 0).count();

    let mut summary = format!(
        "\n{} {}, {} {}",
        repositories.len().to_string().white(),
        "repositories".bright_black(),
        ahead.to_string().white(),
        "with unmerged work".bright_black()
    );
    if failed > 0 {
        summary.push_str(&format!(", {}", format!("{failed} failed").red()));
    }
    println!("{summary}\n");
}
