//! Accessors: typed views over buffer view data.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::Id;
use crate::property::Property;

use super::BufferView;

/// Data type of an accessor's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentType {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            5120 => Some(ComponentType::I8),
            5121 => Some(ComponentType::U8),
            5122 => Some(ComponentType::I16),
            5123 => Some(ComponentType::U16),
            5125 => Some(ComponentType::U32),
            5126 => Some(ComponentType::F32),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            ComponentType::I8 => 5120,
            ComponentType::U8 => 5121,
            ComponentType::I16 => 5122,
            ComponentType::U16 => 5123,
            ComponentType::U32 => 5125,
            ComponentType::F32 => 5126,
        }
    }

    /// Size of one component in bytes.
    pub fn size(self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::U32 | ComponentType::F32 => 4,
        }
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

/// Shape of one accessor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SCALAR" => Some(ElementType::Scalar),
            "VEC2" => Some(ElementType::Vec2),
            "VEC3" => Some(ElementType::Vec3),
            "VEC4" => Some(ElementType::Vec4),
            "MAT2" => Some(ElementType::Mat2),
            "MAT3" => Some(ElementType::Mat3),
            "MAT4" => Some(ElementType::Mat4),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Scalar => "SCALAR",
            ElementType::Vec2 => "VEC2",
            ElementType::Vec3 => "VEC3",
            ElementType::Vec4 => "VEC4",
            ElementType::Mat2 => "MAT2",
            ElementType::Mat3 => "MAT3",
            ElementType::Mat4 => "MAT4",
        }
    }

    /// Number of components per element.
    pub fn components(self) -> usize {
        match self {
            ElementType::Scalar => 1,
            ElementType::Vec2 => 2,
            ElementType::Vec3 => 3,
            ElementType::Vec4 | ElementType::Mat2 => 4,
            ElementType::Mat3 => 9,
            ElementType::Mat4 => 16,
        }
    }
}

impl Serialize for ElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A typed view into a buffer view.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub buffer_view: Option<Id<BufferView>>,
    pub byte_offset: u64,
    pub component_type: ComponentType,
    pub normalized: bool,
    pub count: u32,
    pub element_type: ElementType,
    pub max: Option<Vec<f64>>,
    pub min: Option<Vec<f64>>,
    pub sparse: Option<Sparse>,
    pub name: Option<String>,
    pub base: Property,
}

impl Accessor {
    pub fn new(component_type: ComponentType, element_type: ElementType, count: u32) -> Self {
        Self {
            buffer_view: None,
            byte_offset: 0,
            component_type,
            normalized: false,
            count,
            element_type,
            max: None,
            min: None,
            sparse: None,
            name: None,
            base: Property::default(),
        }
    }

    /// Size of one element in bytes, without stride padding.
    pub fn element_size(&self) -> usize {
        self.component_type.size() * self.element_type.components()
    }
}

impl Serialize for Accessor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(view) = &self.buffer_view {
            map.serialize_entry("bufferView", view)?;
        }
        if self.byte_offset != 0 {
            map.serialize_entry("byteOffset", &self.byte_offset)?;
        }
        map.serialize_entry("componentType", &self.component_type)?;
        if self.normalized {
            map.serialize_entry("normalized", &true)?;
        }
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry("type", &self.element_type)?;
        if let Some(max) = &self.max {
            map.serialize_entry("max", max)?;
        }
        if let Some(min) = &self.min {
            map.serialize_entry("min", min)?;
        }
        if let Some(sparse) = &self.sparse {
            map.serialize_entry("sparse", sparse)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// Sparse storage of elements that deviate from the initialization value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparse {
    pub count: u32,
    pub indices: SparseIndices,
    pub values: SparseValues,
    pub base: Property,
}

impl Serialize for Sparse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry("indices", &self.indices)?;
        map.serialize_entry("values", &self.values)?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparseIndices {
    pub buffer_view: Id<BufferView>,
    pub byte_offset: u64,
    pub component_type: ComponentType,
    pub base: Property,
}

impl Serialize for SparseIndices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("bufferView", &self.buffer_view)?;
        if self.byte_offset != 0 {
            map.serialize_entry("byteOffset", &self.byte_offset)?;
        }
        map.serialize_entry("componentType", &self.component_type)?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparseValues {
    pub buffer_view: Id<BufferView>,
    pub byte_offset: u64,
    pub base: Property,
}

impl Serialize for SparseValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("bufferView", &self.buffer_view)?;
        if self.byte_offset != 0 {
            map.serialize_entry("byteOffset", &self.byte_offset)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
