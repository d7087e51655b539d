//! `fieldwise projects`: Manage project contexts.

use fieldwise_core::store::WorkspaceStore;
use fieldwise_store::{add_project, move_project, remove_project, update_project};

use super::{load_settings, open_store, require_project, truncate};

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store();
    let projects = store.projects().await?;

    if projects.is_empty() {
        println!("No projects yet. Add one with `fieldwise projects add`.");
        return Ok(());
    }

    println!("📁 Projects ({})", projects.len());
    println!();
    for (i, project) in projects.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {}",
            i + 1,
            truncate(&project.name, 24),
            truncate(&project.description, 60)
        );
        println!("      id: {}", project.id);
    }

    Ok(())
}

pub async fn add(name: &str, description: &str) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    let store = open_store();
    let max = settings.description_limit_tier.max_chars();

    let project = add_project(&store, name, description, max).await?;
    println!("✅ Added project '{}' ({})", project.name, project.id);
    Ok(())
}

/// Edit a project; omitted fields keep their current value.
pub async fn edit(
    key: &str,
    name: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    let store = open_store();
    let max = settings.description_limit_tier.max_chars();

    let project = require_project(&store, key).await?;
    let name = name.unwrap_or(project.name);
    let description = description.unwrap_or(project.description);

    let updated = update_project(&store, &project.id, &name, &description, max).await?;
    println!("✅ Updated project '{}'", updated.name);
    Ok(())
}

pub async fn remove(key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store();
    let project = require_project(&store, key).await?;

    if remove_project(&store, &project.id).await? {
        println!("🗑️  Removed project '{}'", project.name);
    }
    Ok(())
}

pub async fn move_by(key: &str, direction: isize) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store();
    let project = require_project(&store, key).await?;

    if move_project(&store, &project.id, direction).await? {
        println!("✅ Moved '{}' {}", project.name, if direction < 0 { "up" } else { "down" });
    } else {
        println!("   '{}' is already at the edge of the list", project.name);
    }
    Ok(())
}
