//! Asset metadata.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::property::Property;

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub copyright: Option<String>,
    pub generator: Option<String>,
    pub version: String,
    pub min_version: Option<String>,
    pub base: Property,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            copyright: None,
            generator: None,
            version: "2.0".to_string(),
            min_version: None,
            base: Property::default(),
        }
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(copyright) = &self.copyright {
            map.serialize_entry("copyright", copyright)?;
        }
        if let Some(generator) = &self.generator {
            map.serialize_entry("generator", generator)?;
        }
        map.serialize_entry("version", &self.version)?;
        if let Some(min_version) = &self.min_version {
            map.serialize_entry("minVersion", min_version)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
