use crate::commands::scan::resolve_folder;
use crate::core::{
    error::Result, output::code_line_row, print_info, print_section_header,
    process::GitExecutor, repo_service::RepoService,
};
use std::path::Path;

pub async fn execute_history<E: GitExecutor>(
    service: &RepoService<E>,
    repo: &Path,
    json: bool,
    limit: Option<usize>,
) -> Result<()> {
    let repo = resolve_folder(repo)?;
    let mut points = service.code_line_history(&repo).await?;

    // Keep the most recent points; totals are already cumulative from the start
    if let Some(limit) = limit {
        let skip = points.len().saturating_sub(limit);
        points.drain(..skip);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    if points.is_empty() {
        print_info("No commits touched code files");
        return Ok(());
    }

    print_section_header(&format!("Code lines ({})", repo.display()));
    for point in &points {
        println!("  {}", code_line_row(point));
    }
    println!();
    Ok(())
}
