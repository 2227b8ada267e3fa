//! Textures, images and samplers.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::Id;
use crate::property::Property;

use super::BufferView;

/// An image and the sampler used with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    pub sampler: Option<Id<Sampler>>,
    pub source: Option<Id<Image>>,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Texture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(sampler) = &self.sampler {
            map.serialize_entry("sampler", sampler)?;
        }
        if let Some(source) = &self.source {
            map.serialize_entry("source", source)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// Image data by URI or buffer view. Never decoded here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<Id<BufferView>>,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Image {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(uri) = &self.uri {
            map.serialize_entry("uri", uri)?;
        }
        if let Some(mime_type) = &self.mime_type {
            map.serialize_entry("mimeType", mime_type)?;
        }
        if let Some(view) = &self.buffer_view {
            map.serialize_entry("bufferView", view)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagFilter {
    Nearest,
    Linear,
}

impl MagFilter {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            9728 => Some(MagFilter::Nearest),
            9729 => Some(MagFilter::Linear),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            MagFilter::Nearest => 9728,
            MagFilter::Linear => 9729,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl MinFilter {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            9728 => Some(MinFilter::Nearest),
            9729 => Some(MinFilter::Linear),
            9984 => Some(MinFilter::NearestMipmapNearest),
            9985 => Some(MinFilter::LinearMipmapNearest),
            9986 => Some(MinFilter::NearestMipmapLinear),
            9987 => Some(MinFilter::LinearMipmapLinear),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            MinFilter::Nearest => 9728,
            MinFilter::Linear => 9729,
            MinFilter::NearestMipmapNearest => 9984,
            MinFilter::LinearMipmapNearest => 9985,
            MinFilter::NearestMipmapLinear => 9986,
            MinFilter::LinearMipmapLinear => 9987,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    ClampToEdge,
    MirroredRepeat,
    #[default]
    Repeat,
}

impl WrapMode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            33071 => Some(WrapMode::ClampToEdge),
            33648 => Some(WrapMode::MirroredRepeat),
            10497 => Some(WrapMode::Repeat),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            WrapMode::ClampToEdge => 33071,
            WrapMode::MirroredRepeat => 33648,
            WrapMode::Repeat => 10497,
        }
    }
}

/// Texture filtering and wrapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sampler {
    pub mag_filter: Option<MagFilter>,
    pub min_filter: Option<MinFilter>,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Sampler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(filter) = self.mag_filter {
            map.serialize_entry("magFilter", &filter.code())?;
        }
        if let Some(filter) = self.min_filter {
            map.serialize_entry("minFilter", &filter.code())?;
        }
        if self.wrap_s != WrapMode::default() {
            map.serialize_entry("wrapS", &self.wrap_s.code())?;
        }
        if self.wrap_t != WrapMode::default() {
            map.serialize_entry("wrapT", &self.wrap_t.code())?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
