//! Subprocess execution of the external `git` binary.
//!
//! [`GitExecutor`] is the seam between the repository logic and the operating
//! system: it takes an argv (without the binary name) and a working directory and
//! resolves to the trimmed stdout, or fails with
//! [`GitManagerError::CommandFailed`] carrying the trimmed stderr (falling back to
//! stdout when stderr is empty). [`SystemGit`] is the real implementation.

use crate::core::error::{GitManagerError, Result};
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

/// Environment overrides applied to every git invocation.
///
/// No credential prompts, no optional index lock, no system or global config.
#[cfg(not(windows))]
pub const GIT_ENVIRONMENT: [(&str, &str); 4] = [
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GIT_OPTIONAL_LOCKS", "0"),
    ("GIT_CONFIG_NOSYSTEM", "1"),
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
];

#[cfg(windows)]
pub const GIT_ENVIRONMENT: [(&str, &str); 4] = [
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GIT_OPTIONAL_LOCKS", "0"),
    ("GIT_CONFIG_NOSYSTEM", "1"),
    ("GIT_CONFIG_GLOBAL", "NUL"),
];

/// Runs one git command line in a directory.
pub trait GitExecutor: Send + Sync + 'static {
    fn execute(&self, args: &[&str], cwd: &Path) -> impl Future<Output = Result<String>> + Send;
}

/// Executes the configured git binary through `tokio::process`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    binary: String,
    timeout: Option<Duration>,
}

impl SystemGit {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Kill and fail any single invocation running longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitExecutor for SystemGit {
    async fn execute(&self, args: &[&str], cwd: &Path) -> Result<String> {
        log::debug!("{} {} (in {})", self.binary, args.join(" "), cwd.display());

        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.args(args)
            .current_dir(cwd)
            .envs(GIT_ENVIRONMENT)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(output) => output,
                Err(_) => {
                    return Err(GitManagerError::command_timed_out(
                        format!("{} {}", self.binary, args.join(" ")),
                        limit,
                    ))
                }
            },
            None => cmd.output().await,
        }
        .map_err(|e| GitManagerError::spawn(&self.binary, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitManagerError::command_failed(failure_message(
                &stderr, &stdout,
            )));
        }

        Ok(stdout.trim().to_string())
    }
}

/// Trimmed stderr, or trimmed stdout when stderr has nothing to say
pub fn failure_message(stderr: &str, stdout: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}
