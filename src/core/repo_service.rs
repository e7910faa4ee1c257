//! Scan orchestration.
//!
//! [`RepoService`] is the object a front end talks to. It owns no global state:
//! callers ask it to select a folder, scan, or refresh, and get plain values back.
//!
//! # Loading
//! Every discovered repository is loaded on its own tokio task (bounded by a
//! semaphore). A load is all-or-nothing: any failure along the way, a panic
//! included, becomes a [`Repository::failed`] record for that path and never
//! touches its siblings.
//! Results are sorted by name, case-insensitively, so completion order never shows.
//!
//! # Supersession
//! Each `scan` takes a new generation number. When a scan finishes after a newer
//! one has started, its result is reported as [`ScanOutcome::Superseded`] and is
//! not written to the snapshot cache.

use crate::core::{
    cache::SnapshotCache,
    config::ManagerConfig,
    error::{GitManagerError, Result},
    git::GitClient,
    process::{GitExecutor, SystemGit},
    repository::{CodeLinePoint, Commit, Repository},
    scanner::find_repositories,
};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Opaque capability kept alive while its folder is selected (e.g. an OS
/// permission grant); dropped when another folder is selected.
pub type ScopedAccess = Box<dyn Any + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Completed {
        generation: u64,
        repositories: Vec<Repository>,
    },
    /// A newer scan started before this one finished
    Superseded { generation: u64 },
}

impl ScanOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Completed { generation, .. } | Self::Superseded { generation } => *generation,
        }
    }

    pub fn repositories(&self) -> Option<&[Repository]> {
        match self {
            Self::Completed { repositories, .. } => Some(repositories),
            Self::Superseded { .. } => None,
        }
    }
}

struct Selection {
    folder: PathBuf,
    _access: Option<ScopedAccess>,
}

pub struct RepoService<E = SystemGit> {
    client: Arc<GitClient<E>>,
    cache: SnapshotCache,
    max_concurrent: usize,
    generation: AtomicU64,
    selection: Mutex<Option<Selection>>,
}

impl RepoService<SystemGit> {
    pub fn from_config(config: &ManagerConfig) -> Self {
        let git = SystemGit::new(&config.git_binary).with_timeout(config.command_timeout());
        Self::new(
            GitClient::new(git),
            SnapshotCache::in_dir(config.snapshot_dir()),
            config.concurrency(),
        )
    }
}

impl<E: GitExecutor> RepoService<E> {
    pub fn new(client: GitClient<E>, cache: SnapshotCache, max_concurrent: usize) -> Self {
        Self {
            client: Arc::new(client),
            cache,
            max_concurrent: max_concurrent.max(1),
            generation: AtomicU64::new(0),
            selection: Mutex::new(None),
        }
    }

    pub fn client(&self) -> &GitClient<E> {
        &self.client
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn selected_folder(&self) -> Option<PathBuf> {
        self.selection.lock().as_ref().map(|s| s.folder.clone())
    }

    /// Make `folder` current and return its cached repositories (possibly none).
    /// Selecting `None` forgets the folder and its snapshot.
    pub fn select_folder(
        &self,
        folder: Option<PathBuf>,
        access: Option<ScopedAccess>,
    ) -> Vec<Repository> {
        let Some(folder) = folder else {
            *self.selection.lock() = None;
            if let Err(e) = self.cache.clear() {
                log::warn!("Failed to clear snapshot: {e}");
            }
            return Vec::new();
        };

        let cached = self.cache.load(&folder_key(&folder));
        log::debug!(
            "Selected {} with {} cached repositories",
            folder.display(),
            cached.len()
        );
        *self.selection.lock() = Some(Selection {
            folder,
            _access: access,
        });
        cached
    }

    /// Scan `root`, save the snapshot, and return the sorted repositories.
    pub async fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        if !root.is_dir() {
            return Err(GitManagerError::folder_not_found(root));
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Scan {generation} of {} started", root.display());

        let repositories = self.load_all(root).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Scan {generation} superseded, dropping its result");
            return Ok(ScanOutcome::Superseded { generation });
        }

        if let Err(e) = self.cache.save(&folder_key(root), &repositories) {
            log::warn!("Snapshot save failed: {e}");
        }

        Ok(ScanOutcome::Completed {
            generation,
            repositories,
        })
    }

    /// Rescan the selected folder
    pub async fn refresh(&self) -> Result<ScanOutcome> {
        let folder = self
            .selected_folder()
            .ok_or(GitManagerError::NoFolderSelected)?;
        self.scan(&folder).await
    }

    /// Reload a single repository; the result replaces the old record wholesale
    pub async fn refresh_repository(&self, path: &Path) -> Repository {
        load_repository(&self.client, path).await
    }

    pub async fn code_line_history(&self, path: &Path) -> Result<Vec<CodeLinePoint>> {
        self.client.code_line_history(path).await
    }

    /// Discover and load every repository under `root`, sorted by name.
    pub async fn load_all(&self, root: &Path) -> Vec<Repository> {
        let root = root.to_path_buf();
        let paths = tokio::task::spawn_blocking(move || find_repositories(&root))
            .await
            .unwrap_or_else(|e| {
                log::error!("Repository discovery task failed: {e}");
                Vec::new()
            });
        if paths.is_empty() {
            return Vec::new();
        }

        let permits = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();
        let mut task_paths = HashMap::with_capacity(paths.len());
        for path in paths {
            let client = Arc::clone(&self.client);
            let permits = Arc::clone(&permits);
            let task_path = path.clone();
            let handle = tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                load_repository(&client, &task_path).await
            });
            task_paths.insert(handle.id(), path);
        }

        let mut repositories = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, repository)) => repositories.push(repository),
                Err(e) => {
                    log::error!("Repository load task failed: {e}");
                    if let Some(path) = task_paths.remove(&e.id()) {
                        let message = format!("Loading failed: {e}");
                        repositories.push(Repository::failed(&path, message));
                    }
                }
            }
        }

        sort_by_name(&mut repositories);
        repositories
    }
}

/// Load one repository; failures are folded into the record.
pub async fn load_repository<E: GitExecutor>(client: &GitClient<E>, path: &Path) -> Repository {
    let (branches, remote_url) = tokio::join!(
        resolve_branches(client, path),
        client.preferred_remote_url(path)
    );

    match branches {
        Ok(branches) => Repository::loaded(
            path,
            remote_url,
            branches.current,
            branches.comparison,
            branches.base,
            branches.commits,
        ),
        Err(e) => {
            log::warn!("Failed to load {}: {e}", path.display());
            Repository::failed(path, e.to_string())
        }
    }
}

struct ResolvedBranches {
    current: Option<String>,
    base: Option<String>,
    comparison: Option<String>,
    commits: Vec<Commit>,
}

async fn resolve_branches<E: GitExecutor>(
    client: &GitClient<E>,
    path: &Path,
) -> Result<ResolvedBranches> {
    let current = client.current_branch(path).await?;
    let base = client.base_ref(path).await?;
    let comparison = client
        .latest_non_primary_branch(path, base.as_deref(), current.as_deref())
        .await?;

    let compare_ref = comparison.as_deref().or(current.as_deref());
    let commits = match (base.as_deref(), compare_ref) {
        (Some(base), Some(head)) if base != head => {
            client.commits_between(base, head, path).await?
        }
        _ => Vec::new(),
    };

    Ok(ResolvedBranches {
        current,
        base,
        comparison,
        commits,
    })
}

/// Case-insensitive by name; path breaks ties so equal names stay in a fixed order
pub fn sort_by_name(repositories: &mut [Repository]) {
    repositories.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.path.cmp(&b.path))
    });
}

fn folder_key(folder: &Path) -> String {
    folder.to_string_lossy().into_owned()
}
