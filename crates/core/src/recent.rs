//! Recently used field labels: a bounded, most-recent-first queue.

use serde::{Deserialize, Serialize};

/// Maximum number of labels kept.
pub const MAX_RECENT_FIELDS: usize = 10;

/// Most-recent-first list of field labels, deduplicated case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentFields(Vec<String>);

impl RecentFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `label` to the front, dropping any case-insensitive duplicate and
    /// anything beyond the cap. Blank labels are ignored; returns whether the
    /// list changed.
    pub fn record(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        let normalized = label.to_lowercase();
        self.0.retain(|existing| existing.to_lowercase() != normalized);
        self.0.insert(0, label.to_string());
        self.0.truncate(MAX_RECENT_FIELDS);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for RecentFields {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}
