use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

mod common;
use common::{assertions, fixtures::*, repository::*};

/// The binary with cache and config isolated inside the test workspace
fn git_manager(workspace: &TestWorkspace) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("git-manager")?;
    cmd.env("XDG_CACHE_HOME", workspace.side_dir("xdg-cache")?)
        .env("XDG_CONFIG_HOME", workspace.side_dir("xdg-config")?)
        .env("NO_COLOR", "1");
    Ok(cmd)
}

fn json_output(cmd: &mut Command, args: &[&str], dir: &Path) -> anyhow::Result<serde_json::Value> {
    let output = cmd.args(args).arg(dir).arg("--json").output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_scan_lists_repositories() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;
        create_feature_repo(&workspace, "widgets")?;
        create_master_only_repo(&workspace, "legacy")?;

        git_manager(&workspace)?
            .arg("scan")
            .arg(workspace.root())
            .assert()
            .success()
            .stdout(predicate::str::contains("widgets"))
            .stdout(predicate::str::contains("feature-x → main"))
            .stdout(predicate::str::contains("legacy"));
        Ok(())
    }

    #[test]
    fn test_scan_json_shape() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;
        create_feature_repo(&workspace, "widgets")?;

        let value = json_output(&mut git_manager(&workspace)?, &["scan"], workspace.root())?;
        let repo = &value[0];
        assert_eq!(repo["name"], "widgets");
        assert_eq!(repo["currentBranch"], "feature-x");
        assert_eq!(repo["baseRef"], "main");
        assert_eq!(repo["remoteURL"], "git@github.com:acme/widgets.git");
        assert_eq!(repo["commits"].as_array().map(Vec::len), Some(2));
        assert!(repo["errorMessage"].is_null());
        Ok(())
    }

    #[test]
    fn test_cached_after_scan() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;
        create_feature_repo(&workspace, "widgets")?;

        let scanned = json_output(&mut git_manager(&workspace)?, &["scan"], workspace.root())?;
        let cached = json_output(&mut git_manager(&workspace)?, &["cached"], workspace.root())?;
        assert_eq!(scanned, cached);
        Ok(())
    }

    #[test]
    fn test_cached_without_scan() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;

        git_manager(&workspace)?
            .arg("cached")
            .arg(workspace.root())
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached scan"));
        Ok(())
    }

    #[test]
    fn test_scan_missing_folder_fails() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;

        git_manager(&workspace)?
            .arg("scan")
            .arg(workspace.root().join("missing"))
            .assert()
            .failure()
            .stdout(assertions::has_error())
            .stdout(assertions::folder_not_found());
        Ok(())
    }

    #[test]
    fn test_links_for_github_remote() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;
        let repo = create_feature_repo(&workspace, "widgets")?;

        git_manager(&workspace)?
            .arg("links")
            .arg(&repo)
            .assert()
            .success()
            .stdout(predicate::str::contains("https://github.com/acme/widgets"))
            .stdout(predicate::str::contains(
                "https://github.com/acme/widgets/compare/main...feature-x?expand=1",
            ))
            .stdout(predicate::str::contains("https://github.com/acme/widgets/issues/12"));
        Ok(())
    }

    #[test]
    fn test_history_limit() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;
        let repo = create_feature_repo(&workspace, "widgets")?;

        let output = git_manager(&workspace)?
            .args(["history", "--json", "--limit", "1"])
            .arg(&repo)
            .output()?;
        assert!(output.status.success());

        let points: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let points = points.as_array().cloned().unwrap_or_default();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["subject"], "Fix typo");
        assert_eq!(points[0]["totalLines"], 2);
        Ok(())
    }

    #[test]
    fn test_config_shows_overrides() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;

        git_manager(&workspace)?
            .args(["--jobs", "3", "config"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"max_concurrent_loads\": 3"))
            .stdout(predicate::str::contains("git-manager"));
        Ok(())
    }

    #[test]
    fn test_config_write() -> anyhow::Result<()> {
        let workspace = TestWorkspace::new()?;

        git_manager(&workspace)?
            .args(["--timeout", "15", "config", "--write"])
            .assert()
            .success();

        let written = workspace
            .side_dir("xdg-config")?
            .join("git-manager/config.json");
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(written)?)?;
        assert_eq!(value["command_timeout_secs"], 15);
        Ok(())
    }
}
