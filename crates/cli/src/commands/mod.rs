//! Subcommand implementations.

pub mod config_cmd;
pub mod fill;
pub mod init;
pub mod inspect;
pub mod pick;
pub mod projects;
pub mod providers;
pub mod recent;

use fieldwise_config::Settings;
use fieldwise_core::project::Project;
use fieldwise_core::store::WorkspaceStore;
use fieldwise_store::{FileStore, find_project};

/// Load settings from the default location with env overrides applied.
pub(crate) fn load_settings() -> Result<Settings, Box<dyn std::error::Error>> {
    Ok(Settings::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Open the workspace at its default location.
pub(crate) fn open_store() -> FileStore {
    FileStore::open(FileStore::default_path())
}

/// Find a project by id or name, or fail with a readable message.
pub(crate) async fn require_project(
    store: &dyn WorkspaceStore,
    key: &str,
) -> Result<Project, Box<dyn std::error::Error>> {
    find_project(store, key)
        .await?
        .ok_or_else(|| format!("No project named '{key}'. Run `fieldwise projects list`.").into())
}

/// Shorten text to `max` characters for table display.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
