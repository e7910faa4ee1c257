use crate::commands::scan::{print_repositories, resolve_folder};
use crate::core::{
    error::Result, print_info, print_section_header, process::GitExecutor,
    repo_service::RepoService,
};
use std::path::Path;

/// Print the stored result of the last scan of `root` without running git
pub fn execute_cached<E: GitExecutor>(
    service: &RepoService<E>,
    root: &Path,
    json: bool,
) -> Result<()> {
    let root = resolve_folder(root)?;
    let key = root.to_string_lossy();

    let Some(snapshot) = service.cache().load_snapshot(&key) else {
        if json {
            println!("[]");
        } else {
            print_info(&format!("No cached scan for {}", root.display()));
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.repositories)?);
        return Ok(());
    }

    print_section_header(&format!(
        "Cached {} ({})",
        root.display(),
        snapshot.cached_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    print_repositories(&snapshot.repositories);
    Ok(())
}
