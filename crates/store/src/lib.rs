//! Workspace storage for Fieldwise.
//!
//! Implements the `fieldwise_core::WorkspaceStore` trait with two backends
//! and provides the project operations built on top of it.

pub mod file_backend;
pub mod in_memory;
pub mod projects;

pub use file_backend::FileStore;
pub use in_memory::InMemoryStore;
pub use projects::{
    add_project, find_project, move_project, remove_project, trim_descriptions, update_project,
};
