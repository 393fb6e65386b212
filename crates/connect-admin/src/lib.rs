//! Collaborator contracts for the Connect admin panel.
//!
//! The admin panel reads object properties from the model viewer and keeps
//! records about projects, users, resources and model objects in a backing
//! database. This crate defines both collaborators as traits and provides
//! the glue between them and the [`ifc_guid`] codec:
//!
//! - [`PropertySource`] - object properties per model, parsed at the
//!   boundary into [`ObjectProperties`] whatever shape the viewer used
//! - [`resolve_guids`] - compact IFC GUIDs to canonical [`Guid`]s
//! - [`PropertyMappingsCache`] - explicit per-project cache of column mappings
//! - [`PersistenceStore`] - record CRUD, with [`MemoryStore`] in memory
//! - [`sync_model_objects`] - model-object records keyed by canonical GUID
//!
//! # Example
//!
//! ```rust
//! use connect_admin::{resolve_guids, sync_model_objects, JsonPropertySource, MemoryStore};
//!
//! let source = JsonPropertySource::from_json(
//!     r#"{ "model-1": [ { "id": 7, "ifcGuid": "1L3eG0ufj1rASMH6PLH000" } ] }"#,
//! ).unwrap();
//!
//! let resolution = resolve_guids(&source, "model-1", &[7]).unwrap();
//! assert_eq!(
//!     resolution.guid_for(7).unwrap().to_string(),
//!     "550e8400-e29b-41d4-a716-446655440000"
//! );
//!
//! let store = MemoryStore::new();
//! assert_eq!(sync_model_objects(&store, "model-1", &resolution).unwrap(), 1);
//! ```

pub mod cache;
pub mod error;
pub mod properties;
pub mod source;
pub mod store;

pub use cache::{PropertyMapping, PropertyMappings, PropertyMappingsCache};
pub use error::{SourceError, StoreError};
pub use properties::{ObjectProperties, Property, PropertySet, PropertyValue};
pub use source::{
    index_by_id, resolve_guids, GuidResolution, InvalidGuid, JsonPropertySource, ObjectId,
    PropertySource, ResolvedGuid,
};
pub use store::{
    sync_model_objects, Collection, Filter, MemoryStore, ModelObjectRecord, PersistenceStore,
    Record,
};

pub use ifc_guid::Guid;
