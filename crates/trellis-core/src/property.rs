//! Property base shared by every schema entity.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde_json::Value;

/// Extension, extras and unrecognized data carried by an entity.
///
/// Everything here is kept verbatim and re-emitted after the entity's own
/// fields when it is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    /// Contents of the `extensions` object, keyed by extension name.
    pub extensions: Option<IndexMap<String, Value>>,
    /// Contents of `extras`.
    pub extras: Option<Value>,
    /// Keys the schema does not define for this entity.
    pub unrecognized: IndexMap<String, Value>,
}

impl Property {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_none() && self.extras.is_none() && self.unrecognized.is_empty()
    }

    pub fn extension(&self, name: &str) -> Option<&Value> {
        self.extensions.as_ref().and_then(|e| e.get(name))
    }

    pub fn set_extension(&mut self, name: impl Into<String>, value: Value) {
        self.extensions
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value);
    }

    /// Write `extensions`, `extras` and the unrecognized keys into an open map.
    pub fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        if let Some(extensions) = &self.extensions {
            map.serialize_entry("extensions", extensions)?;
        }
        if let Some(extras) = &self.extras {
            map.serialize_entry("extras", extras)?;
        }
        for (key, value) in &self.unrecognized {
            map.serialize_entry(key, value)?;
        }
        Ok(())
    }
}
