//! # Fieldwise Core
//!
//! Domain types, traits, and error definitions for the Fieldwise
//! form-filling engine. This crate has **zero framework dependencies**: it
//! defines the model every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every collaborator (text-generation providers, workspace storage) is a
//! trait here. Implementations live in their respective crates, so the
//! synthesis engine can be exercised with scripted stand-ins.

pub mod error;
pub mod field;
pub mod fill;
pub mod project;
pub mod provider;
pub mod recent;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, StoreError};
pub use field::{FieldMeta, FieldProfile, FieldSignals, FieldType, LabelSource, SourceKind};
pub use fill::{FillRequest, FillResponse};
pub use project::Project;
pub use provider::{Generation, GenerationRequest, Provider, ProviderId, Usage};
pub use recent::RecentFields;
pub use store::WorkspaceStore;
