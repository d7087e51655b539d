//! File-based workspace store: one JSON document on disk.
//!
//! Storage location: `~/.fieldwise/workspace.json`
//!
//! The document is loaded once on open and rewritten on every mutation,
//! through a temporary file renamed into place. A missing file starts an
//! empty workspace. Entries that fail to parse are skipped, and the damaged
//! file is copied to `workspace.json.bak` before anything can overwrite it.

use async_trait::async_trait;
use fieldwise_core::error::StoreError;
use fieldwise_core::project::Project;
use fieldwise_core::recent::RecentFields;
use fieldwise_core::store::WorkspaceStore;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// The on-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Workspace {
    projects: Vec<Project>,
    recent_fields: RecentFields,
}

/// A workspace read from disk, and whether any of it had to be dropped.
#[derive(Default)]
struct Loaded {
    workspace: Workspace,
    damaged: bool,
}

/// A workspace persisted as a single JSON file.
pub struct FileStore {
    path: PathBuf,
    workspace: Arc<RwLock<Workspace>>,
}

/// `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

impl FileStore {
    /// Open the store at `path`, loading whatever is already there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = Self::load_from_disk(&path);
        if loaded.damaged {
            Self::back_up(&path);
        }
        let workspace = loaded.workspace;
        debug!(
            path = %path.display(),
            projects = workspace.projects.len(),
            recent = workspace.recent_fields.len(),
            "Workspace loaded"
        );
        Self {
            path,
            workspace: Arc::new(RwLock::new(workspace)),
        }
    }

    /// Default path: `~/.fieldwise/workspace.json`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".fieldwise").join("workspace.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a damaged workspace file is preserved.
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, ".bak")
    }

    fn load_from_disk(path: &Path) -> Loaded {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Loaded::default(), // File doesn't exist yet
        };
        if content.trim().is_empty() {
            return Loaded::default();
        }

        let document: serde_json::Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Workspace file is not valid JSON");
                return Loaded {
                    workspace: Workspace::default(),
                    damaged: true,
                };
            }
        };

        let mut loaded = Loaded::default();

        match document.get("projects") {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::Array(entries)) => {
                for entry in entries {
                    match Project::deserialize(entry) {
                        Ok(project) => loaded.workspace.projects.push(project),
                        Err(e) => {
                            warn!(error = %e, "Skipping corrupted project");
                            loaded.damaged = true;
                        }
                    }
                }
            }
            Some(_) => {
                warn!("Ignoring workspace projects that are not a list");
                loaded.damaged = true;
            }
        }

        match document.get("recentFields") {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::Array(labels)) => {
                let kept: Vec<String> = labels
                    .iter()
                    .filter_map(|label| label.as_str().map(str::to_string))
                    .collect();
                loaded.damaged |= kept.len() < labels.len();
                loaded.workspace.recent_fields = RecentFields::from(kept);
            }
            Some(_) => {
                warn!("Ignoring recent fields that are not a list");
                loaded.damaged = true;
            }
        }

        loaded
    }

    /// Copy a damaged workspace file aside so later writes cannot lose it.
    fn back_up(path: &Path) {
        let backup = sibling(path, ".bak");
        match std::fs::copy(path, &backup) {
            Ok(_) => warn!(backup = %backup.display(), "Kept a copy of the damaged workspace file"),
            Err(e) => warn!(error = %e, "Failed to back up damaged workspace file"),
        }
    }

    /// Write the whole workspace to disk.
    async fn flush(&self) -> Result<(), StoreError> {
        let workspace = self.workspace.read().await;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Storage(format!("Failed to create workspace directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(&*workspace)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize workspace: {e}")))?;

        let staging = sibling(&self.path, ".tmp");
        std::fs::write(&staging, content)
            .map_err(|e| StoreError::Storage(format!("Failed to write workspace file: {e}")))?;
        std::fs::rename(&staging, &self.path)
            .map_err(|e| StoreError::Storage(format!("Failed to replace workspace file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl WorkspaceStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.workspace.read().await.projects.clone())
    }

    async fn save_projects(&self, projects: Vec<Project>) -> Result<(), StoreError> {
        self.workspace.write().await.projects = projects;
        self.flush().await
    }

    async fn recent_fields(&self) -> Result<RecentFields, StoreError> {
        Ok(self.workspace.read().await.recent_fields.clone())
    }

    async fn save_recent_fields(&self, recent: RecentFields) -> Result<(), StoreError> {
        self.workspace.write().await.recent_fields = recent;
        self.flush().await
    }
}
