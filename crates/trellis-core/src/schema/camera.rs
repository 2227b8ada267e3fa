//! Cameras.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::property::Property;

#[derive(Debug, Clone, PartialEq)]
pub struct Perspective {
    pub aspect_ratio: Option<f32>,
    pub yfov: f32,
    pub zfar: Option<f32>,
    pub znear: f32,
    pub base: Property,
}

impl Serialize for Perspective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(aspect_ratio) = self.aspect_ratio {
            map.serialize_entry("aspectRatio", &aspect_ratio)?;
        }
        map.serialize_entry("yfov", &self.yfov)?;
        if let Some(zfar) = self.zfar {
            map.serialize_entry("zfar", &zfar)?;
        }
        map.serialize_entry("znear", &self.znear)?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Orthographic {
    pub xmag: f32,
    pub ymag: f32,
    pub zfar: f32,
    pub znear: f32,
    pub base: Property,
}

impl Serialize for Orthographic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("xmag", &self.xmag)?;
        map.serialize_entry("ymag", &self.ymag)?;
        map.serialize_entry("zfar", &self.zfar)?;
        map.serialize_entry("znear", &self.znear)?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// Camera projection; the variant decides the `type` property.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Perspective(Perspective),
    Orthographic(Orthographic),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Camera {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.projection {
            Projection::Perspective(perspective) => {
                map.serialize_entry("perspective", perspective)?;
                map.serialize_entry("type", "perspective")?;
            }
            Projection::Orthographic(orthographic) => {
                map.serialize_entry("orthographic", orthographic)?;
                map.serialize_entry("type", "orthographic")?;
            }
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
