//! Meshes and mesh primitives.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::Id;
use crate::property::Property;
use crate::semantic::Semantic;

use super::{Accessor, Material};

/// Attribute semantic to accessor. Keys are unique by construction.
pub type Attributes = IndexMap<Semantic, Id<Accessor>>;

/// A morph target: per-vertex deltas, in practice `POSITION`/`NORMAL`/`TANGENT`.
pub type MorphTarget = IndexMap<Semantic, Id<Accessor>>;

/// Primitive topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Mode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Mode::Points),
            1 => Some(Mode::Lines),
            2 => Some(Mode::LineLoop),
            3 => Some(Mode::LineStrip),
            4 => Some(Mode::Triangles),
            5 => Some(Mode::TriangleStrip),
            6 => Some(Mode::TriangleFan),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Mode::Points => 0,
            Mode::Lines => 1,
            Mode::LineLoop => 2,
            Mode::LineStrip => 3,
            Mode::Triangles => 4,
            Mode::TriangleStrip => 5,
            Mode::TriangleFan => 6,
        }
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

/// Geometry to be rendered with a single material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitive {
    pub attributes: Attributes,
    pub indices: Option<Id<Accessor>>,
    pub material: Option<Id<Material>>,
    pub mode: Mode,
    pub targets: Option<Vec<MorphTarget>>,
    pub base: Property,
}

impl Primitive {
    pub fn attribute(&self, semantic: &Semantic) -> Option<Id<Accessor>> {
        self.attributes.get(semantic).copied()
    }
}

impl Serialize for Primitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        // A primitive without attributes is malformed, so the map is always written.
        map.serialize_entry("attributes", &self.attributes)?;
        if let Some(indices) = &self.indices {
            map.serialize_entry("indices", indices)?;
        }
        if let Some(material) = &self.material {
            map.serialize_entry("material", material)?;
        }
        if self.mode != Mode::default() {
            map.serialize_entry("mode", &self.mode)?;
        }
        if let Some(targets) = &self.targets {
            map.serialize_entry("targets", targets)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// A set of primitives to be rendered together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    pub weights: Option<Vec<f32>>,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Mesh {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("primitives", &self.primitives)?;
        if let Some(weights) = &self.weights {
            map.serialize_entry("weights", weights)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
