use crate::core::{config::ManagerConfig, error::Result, print_success};
use colored::*;

/// Show the effective configuration, optionally writing it to the config file
pub fn execute_config(config: &ManagerConfig, write: bool) -> Result<()> {
    let path = ManagerConfig::default_path();
    println!("{} {}", "config file".bright_black(), path.display());
    println!("{}", serde_json::to_string_pretty(config)?);

    if write {
        config.save_to(&path)?;
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
