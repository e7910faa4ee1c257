use clap::{Parser, Subcommand};
use git_manager::commands::*;
use git_manager::core::{
    config::ManagerConfig, error::Result, print_error, repo_service::RepoService,
};
use env_logger::Env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-manager")]
#[command(about = "Scan a folder of git repositories and show their unmerged work")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Git executable to run (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    git: Option<String>,

    /// Repositories loaded at the same time
    #[arg(long, global = true, value_name = "N")]
    jobs: Option<usize>,

    /// Seconds before a single git command is abandoned
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find and load every repository under a folder
    Scan {
        /// Folder to scan
        root: PathBuf,
        /// Print repositories as JSON
        #[arg(long)]
        json: bool,
        /// Do not show the previous result while scanning
        #[arg(long)]
        no_cache: bool,
    },
    /// Show the stored result of the last scan of a folder
    Cached {
        /// Folder that was scanned
        root: PathBuf,
        /// Print repositories as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how the number of code lines changed commit by commit
    History {
        /// Repository working copy
        repo: PathBuf,
        /// Print points as JSON
        #[arg(long)]
        json: bool,
        /// Only the most recent N points
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Show remote, pull request and issue links for a repository
    Links {
        /// Repository working copy
        repo: PathBuf,
    },
    /// Show the effective configuration
    Config {
        /// Save it to the config file
        #[arg(long)]
        write: bool,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut ManagerConfig) {
        if let Some(git) = &self.git {
            config.git_binary = git.clone();
        }
        if let Some(jobs) = self.jobs {
            config.max_concurrent_loads = jobs;
        }
        if let Some(timeout) = self.timeout {
            config.command_timeout_secs = Some(timeout);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag; RUST_LOG still applies otherwise
    if cli.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    }

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ManagerConfig::load()?;
    cli.apply_overrides(&mut config);
    log::debug!("Effective config: {config:?}");

    let service = RepoService::from_config(&config);

    match cli.command {
        Commands::Scan {
            root,
            json,
            no_cache,
        } => execute_scan(&service, &root, json, !no_cache).await,
        Commands::Cached { root, json } => execute_cached(&service, &root, json),
        Commands::History { repo, json, limit } => {
            execute_history(&service, &repo, json, limit).await
        }
        Commands::Links { repo } => execute_links(&service, &repo).await,
        Commands::Config { write } => execute_config(&config, write),
    }
}
