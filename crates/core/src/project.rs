//! Project context: the product a user is filling forms for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved project. Prompt synthesis only reads `name` and `description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique ID for this project
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project with a fresh id and timestamps.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_gets_id_and_timestamps() {
        let project = Project::new("Acme", "Rocket skates for coyotes");
        assert!(!project.id.is_empty());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn request_payload_needs_only_name_and_description() {
        let project: Project =
            serde_json::from_str(r#"{"name":"Acme","description":"Skates"}"#).unwrap();
        assert_eq!(project.name, "Acme");
        assert!(project.id.is_empty());
    }
}
