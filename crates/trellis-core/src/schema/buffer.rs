//! Buffers and buffer views.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::Id;
use crate::property::Property;

/// A block of binary data. The bytes themselves are never loaded here; the
/// `uri` is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffer {
    pub byte_length: u64,
    pub uri: Option<String>,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Buffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("byteLength", &self.byte_length)?;
        if let Some(uri) = &self.uri {
            map.serialize_entry("uri", uri)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// GPU binding hint for a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    ArrayBuffer,
    ElementArrayBuffer,
}

impl BufferTarget {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            34962 => Some(BufferTarget::ArrayBuffer),
            34963 => Some(BufferTarget::ElementArrayBuffer),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            BufferTarget::ArrayBuffer => 34962,
            BufferTarget::ElementArrayBuffer => 34963,
        }
    }
}

impl Serialize for BufferTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

/// A contiguous byte range of a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferView {
    pub buffer: Id<Buffer>,
    pub byte_offset: u64,
    pub byte_length: u64,
    pub byte_stride: Option<u32>,
    pub target: Option<BufferTarget>,
    pub name: Option<String>,
    pub base: Property,
}

impl BufferView {
    pub fn new(buffer: Id<Buffer>, byte_length: u64) -> Self {
        Self {
            buffer,
            byte_offset: 0,
            byte_length,
            byte_stride: None,
            target: None,
            name: None,
            base: Property::default(),
        }
    }
}

impl Serialize for BufferView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("buffer", &self.buffer)?;
        if self.byte_offset != 0 {
            map.serialize_entry("byteOffset", &self.byte_offset)?;
        }
        map.serialize_entry("byteLength", &self.byte_length)?;
        if let Some(stride) = self.byte_stride {
            map.serialize_entry("byteStride", &stride)?;
        }
        if let Some(target) = &self.target {
            map.serialize_entry("target", target)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
