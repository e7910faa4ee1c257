use crate::commands::scan::resolve_folder;
use crate::core::{
    error::{GitManagerError, Result},
    print_info, print_section_header,
    process::GitExecutor,
    repo_service::RepoService,
};
use colored::*;
use std::path::Path;

/// Print the remote, pull request and issue links of one repository
pub async fn execute_links<E: GitExecutor>(service: &RepoService<E>, repo: &Path) -> Result<()> {
    let path = resolve_folder(repo)?;
    let repository = service.refresh_repository(&path).await;
    if let Some(message) = &repository.error_message {
        return Err(GitManagerError::command_failed(message.clone()));
    }

    let Some(remote) = repository.remote_info() else {
        print_info(&format!("{} has no usable remote", repository.name));
        return Ok(());
    };

    print_section_header(&format!("{} ({})", repository.name, repository.display_path()));
    println!("  {} {}", "remote".bright_black(), remote.web_base.blue());

    match repository.pull_request_url() {
        Some(url) => println!("  {} {}", "pull request".bright_black(), url.blue()),
        None => println!("  {} {}", "pull request".bright_black(), "-none-".bright_black()),
    }

    let issues: Vec<(String, String)> = repository
        .commits
        .iter()
        .filter_map(|commit| {
            repository
                .issue_url(commit)
                .map(|url| (commit.short_hash.clone(), url))
        })
        .collect();
    for (short_hash, url) in issues {
        println!("  {} {}", short_hash.bright_black(), url.blue());
    }
    println!();
    Ok(())
}
