//! In-memory backend: useful for testing and dry runs.

use async_trait::async_trait;
use fieldwise_core::error::StoreError;
use fieldwise_core::project::Project;
use fieldwise_core::recent::RecentFields;
use fieldwise_core::store::WorkspaceStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A store that keeps everything in memory and forgets it on drop.
#[derive(Default)]
pub struct InMemoryStore {
    projects: Arc<RwLock<Vec<Project>>>,
    recent: Arc<RwLock<RecentFields>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fixed project list.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Arc::new(RwLock::new(projects)),
            ..Self::default()
        }
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.projects.read().await.clone())
    }

    async fn save_projects(&self, projects: Vec<Project>) -> Result<(), StoreError> {
        *self.projects.write().await = projects;
        Ok(())
    }

    async fn recent_fields(&self) -> Result<RecentFields, StoreError> {
        Ok(self.recent.read().await.clone())
    }

    async fn save_recent_fields(&self, recent: RecentFields) -> Result<(), StoreError> {
        *self.recent.write().await = recent;
        Ok(())
    }
}
