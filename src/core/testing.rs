//! Scripted executor used by unit tests in place of a real git binary.

use crate::core::{
    error::{GitManagerError, Result},
    process::GitExecutor,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct Gate {
    path: PathBuf,
    started: Arc<Notify>,
    release: Arc<Notify>,
    used: AtomicBool,
}

/// Replies to `(directory, "arg arg ...")` pairs with canned output and records calls.
#[derive(Default)]
pub struct ScriptedGit {
    responses: HashMap<(PathBuf, String), std::result::Result<String, String>>,
    calls: Mutex<Vec<(PathBuf, String)>>,
    gate: Option<Gate>,
    panic_path: Option<PathBuf>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        mut self,
        path: &Path,
        args: &str,
        response: std::result::Result<&str, &str>,
    ) -> Self {
        self.responses.insert(
            (path.to_path_buf(), args.to_string()),
            response.map(str::to_string).map_err(str::to_string),
        );
        self
    }

    /// Hold the first call made in `path` until `release` is notified.
    pub fn gate(mut self, path: &Path, started: Arc<Notify>, release: Arc<Notify>) -> Self {
        self.gate = Some(Gate {
            path: path.to_path_buf(),
            started,
            release,
            used: AtomicBool::new(false),
        });
        self
    }

    /// Panic on any call made in `path`, as a crashing load would.
    pub fn panic_in(mut self, path: &Path) -> Self {
        self.panic_path = Some(path.to_path_buf());
        self
    }

    /// Argument lines of every call, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(_, args)| args.clone()).collect()
    }
}

impl GitExecutor for ScriptedGit {
    async fn execute(&self, args: &[&str], cwd: &Path) -> Result<String> {
        let line = args.join(" ");
        self.calls.lock().push((cwd.to_path_buf(), line.clone()));

        if self.panic_path.as_deref() == Some(cwd) {
            panic!("scripted panic in {}", cwd.display());
        }

        if let Some(gate) = &self.gate {
            if gate.path == cwd && !gate.used.swap(true, Ordering::SeqCst) {
                gate.started.notify_one();
                gate.release.notified().await;
            }
        }

        match self.responses.get(&(cwd.to_path_buf(), line.clone())) {
            Some(Ok(output)) => Ok(output.trim().to_string()),
            Some(Err(message)) => Err(GitManagerError::command_failed(message.trim())),
            None => Err(GitManagerError::command_failed(format!(
                "unexpected git call in {}: {}",
                cwd.display(),
                line
            ))),
        }
    }
}
