//! Schema object model for glTF 2.0 documents.
//!
//! This crate provides the types shared by every other trellis crate:
//! - [`Root`], the owner of all top-level entity arrays
//! - [`Id<T>`], a typed index resolved lazily against its root
//! - [`Property`], the extension/extras base carried by every entity
//! - The schema entities (meshes, accessors, materials, nodes, ...)
//! - Semantic-name helpers for indexed vertex attributes
//! - Error types
//!
//! Serialization is implemented here with `serde`, writing only fields that
//! differ from their schema defaults. Parsing lives in `trellis-parser`.

pub mod errors;
pub mod id;
pub mod property;
pub mod root;
pub mod schema;
pub mod semantic;

pub use errors::*;
pub use id::{Entity, EntityKind, Id, RootId};
pub use property::Property;
pub use root::Root;
pub use schema::*;
pub use semantic::{indexed_name, parse_indexed, parse_set_index, Semantic, SetKind};

/// Opaque JSON payload used for extensions, extras and unrecognized keys.
pub use serde_json::Value;
