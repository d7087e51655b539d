//! Project operations over any [`WorkspaceStore`].
//!
//! Each operation reads the full list, changes it and writes it back.

use chrono::Utc;
use fieldwise_core::error::StoreError;
use fieldwise_core::project::Project;
use fieldwise_core::store::WorkspaceStore;
use tracing::debug;

fn validated(
    name: &str,
    description: &str,
    max_description: usize,
) -> Result<(String, String), StoreError> {
    let name = name.trim();
    let description = description.trim();
    if name.is_empty() || description.is_empty() {
        return Err(StoreError::InvalidProject(
            "Name and description are required.".into(),
        ));
    }
    if description.chars().count() > max_description {
        return Err(StoreError::InvalidProject(format!(
            "Description exceeds the limit ({max_description})."
        )));
    }
    Ok((name.to_string(), description.to_string()))
}

/// Append a new project.
pub async fn add_project(
    store: &dyn WorkspaceStore,
    name: &str,
    description: &str,
    max_description: usize,
) -> Result<Project, StoreError> {
    let (name, description) = validated(name, description, max_description)?;
    let project = Project::new(name, description);

    let mut projects = store.projects().await?;
    projects.push(project.clone());
    store.save_projects(projects).await?;

    debug!(id = %project.id, name = %project.name, "Project added");
    Ok(project)
}

/// Replace a project's name and description.
pub async fn update_project(
    store: &dyn WorkspaceStore,
    id: &str,
    name: &str,
    description: &str,
    max_description: usize,
) -> Result<Project, StoreError> {
    let (name, description) = validated(name, description, max_description)?;

    let mut projects = store.projects().await?;
    let project = projects
        .iter_mut()
        .find(|project| project.id == id)
        .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))?;
    project.name = name;
    project.description = description;
    project.updated_at = Utc::now();
    let updated = project.clone();

    store.save_projects(projects).await?;
    Ok(updated)
}

/// Delete a project. Returns whether one was removed.
pub async fn remove_project(store: &dyn WorkspaceStore, id: &str) -> Result<bool, StoreError> {
    let mut projects = store.projects().await?;
    let len_before = projects.len();
    projects.retain(|project| project.id != id);
    let removed = projects.len() < len_before;
    if removed {
        store.save_projects(projects).await?;
    }
    Ok(removed)
}

/// Move a project one or more places up (negative) or down (positive).
///
/// Moves past either end are ignored. Returns whether the order changed.
pub async fn move_project(
    store: &dyn WorkspaceStore,
    id: &str,
    direction: isize,
) -> Result<bool, StoreError> {
    let mut projects = store.projects().await?;
    let Some(index) = projects.iter().position(|project| project.id == id) else {
        return Ok(false);
    };
    let Some(target) = index
        .checked_add_signed(direction)
        .filter(|target| *target < projects.len() && *target != index)
    else {
        return Ok(false);
    };

    let moved = projects.remove(index);
    projects.insert(target, moved);
    store.save_projects(projects).await?;
    Ok(true)
}

/// Cut every description down to `max_description` characters.
///
/// Used when the description tier is lowered. Returns how many projects changed.
pub async fn trim_descriptions(
    store: &dyn WorkspaceStore,
    max_description: usize,
) -> Result<usize, StoreError> {
    let mut projects = store.projects().await?;
    let mut trimmed = 0;
    for project in projects
        .iter_mut()
        .filter(|project| project.description.chars().count() > max_description)
    {
        project.description = project.description.chars().take(max_description).collect();
        trimmed += 1;
    }
    if trimmed > 0 {
        store.save_projects(projects).await?;
    }
    Ok(trimmed)
}

/// Look a project up by id, or by case-insensitive name.
pub async fn find_project(
    store: &dyn WorkspaceStore,
    key: &str,
) -> Result<Option<Project>, StoreError> {
    let key = key.trim();
    let projects = store.projects().await?;
    let found = projects
        .iter()
        .find(|project| project.id == key)
        .or_else(|| {
            projects
                .iter()
                .find(|project| project.name.eq_ignore_ascii_case(key))
        })
        .cloned();
    Ok(found)
}
