//! Graph operations over glTF roots.
//!
//! - [`GraphCloner`] deep-copies entities from one root into another,
//!   rebinding every typed reference and rejecting structural cycles.
//! - [`validate_references`] reports references that do not resolve.

mod cloner;
mod validate;

pub use cloner::{clone_into, CloneEntity, GraphCloner};
pub use validate::validate_references;
