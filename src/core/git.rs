//! Read-only git client built on a [`GitExecutor`].
//!
//! [`GitClient`] is the single entry point every resolver goes through. On top of
//! the raw executor it adds one piece of recovery: when git refuses to work in a
//! directory owned by another user ("dubious ownership"), the command is retried
//! exactly once with `-c safe.directory=*`. The recognizer is a plain function
//! pointer so other locales or git versions can plug in their own check.
//!
//! The resolver operations live next to their parsers and extend this type with
//! further `impl` blocks: [`crate::core::branches`], [`crate::core::remote`],
//! [`crate::core::commit_log`] and [`crate::core::code_lines`].

use crate::core::{
    error::{GitManagerError, Result},
    process::{GitExecutor, SystemGit},
};
use std::path::Path;

/// Substring git prints when `safe.directory` rejects a repository.
pub const DUBIOUS_OWNERSHIP_SIGNATURE: &str = "dubious ownership";

/// Arguments prepended on the ownership retry.
pub const SAFE_DIRECTORY_OVERRIDE: [&str; 2] = ["-c", "safe.directory=*"];

/// Default recognizer for the ownership rejection (case-insensitive).
pub fn is_dubious_ownership(message: &str) -> bool {
    message
        .to_lowercase()
        .contains(DUBIOUS_OWNERSHIP_SIGNATURE)
}

pub struct GitClient<E = SystemGit> {
    executor: E,
    retry_predicate: fn(&str) -> bool,
}

impl<E: GitExecutor> GitClient<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            retry_predicate: is_dubious_ownership,
        }
    }

    /// Replace the check deciding whether a failure gets the `safe.directory` retry
    pub fn with_retry_predicate(mut self, predicate: fn(&str) -> bool) -> Self {
        self.retry_predicate = predicate;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `git <args>` in `path`, returning trimmed stdout.
    pub async fn run(&self, args: &[&str], path: &Path) -> Result<String> {
        match self.executor.execute(args, path).await {
            Err(GitManagerError::CommandFailed(message)) if (self.retry_predicate)(&message) => {
                log::debug!(
                    "Retrying with safe.directory override in {}: {}",
                    path.display(),
                    message
                );
                let mut retry_args: Vec<&str> = SAFE_DIRECTORY_OVERRIDE.to_vec();
                retry_args.extend_from_slice(args);
                self.executor.execute(&retry_args, path).await
            }
            other => other,
        }
    }
}

impl Default for GitClient<SystemGit> {
    fn default() -> Self {
        Self::new(SystemGit::default())
    }
}
