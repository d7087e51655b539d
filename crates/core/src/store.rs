//! Workspace store trait: persisted projects and recent field labels.
//!
//! The store is the only shared mutable resource. Writes are whole-list
//! replacements with last-writer-wins semantics.

use async_trait::async_trait;
use crate::error::StoreError;
use crate::project::Project;
use crate::recent::RecentFields;

/// The core WorkspaceStore trait.
///
/// Implementations: in-memory (tests, dry runs) and a JSON file on disk.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// A human-readable name for this backend (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// All projects in display order.
    async fn projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Replace the project list.
    async fn save_projects(&self, projects: Vec<Project>) -> Result<(), StoreError>;

    /// Recently used field labels, most recent first.
    async fn recent_fields(&self) -> Result<RecentFields, StoreError>;

    /// Replace the recent field list.
    async fn save_recent_fields(&self, recent: RecentFields) -> Result<(), StoreError>;

    /// Move `label` to the front of the recent field list.
    async fn record_recent_field(&self, label: &str) -> Result<(), StoreError> {
        let mut recent = self.recent_fields().await?;
        if recent.record(label) {
            self.save_recent_fields(recent).await?;
        }
        Ok(())
    }
}
