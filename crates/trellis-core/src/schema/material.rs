//! Materials and texture bindings.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::Id;
use crate::property::Property;

use super::Texture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

impl AlphaMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OPAQUE" => Some(AlphaMode::Opaque),
            "MASK" => Some(AlphaMode::Mask),
            "BLEND" => Some(AlphaMode::Blend),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlphaMode::Opaque => "OPAQUE",
            AlphaMode::Mask => "MASK",
            AlphaMode::Blend => "BLEND",
        }
    }
}

impl Serialize for AlphaMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

pub const DEFAULT_ALPHA_CUTOFF: f32 = 0.5;

/// Reference to a texture and the texcoord set it samples with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub index: Id<Texture>,
    pub tex_coord: u32,
    pub base: Property,
}

impl TextureInfo {
    pub fn new(index: Id<Texture>) -> Self {
        Self {
            index,
            tex_coord: 0,
            base: Property::default(),
        }
    }
}

impl Serialize for TextureInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("index", &self.index)?;
        if self.tex_coord != 0 {
            map.serialize_entry("texCoord", &self.tex_coord)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalTextureInfo {
    pub index: Id<Texture>,
    pub tex_coord: u32,
    pub scale: f32,
    pub base: Property,
}

impl Serialize for NormalTextureInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("index", &self.index)?;
        if self.tex_coord != 0 {
            map.serialize_entry("texCoord", &self.tex_coord)?;
        }
        if self.scale != 1.0 {
            map.serialize_entry("scale", &self.scale)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OcclusionTextureInfo {
    pub index: Id<Texture>,
    pub tex_coord: u32,
    pub strength: f32,
    pub base: Property,
}

impl Serialize for OcclusionTextureInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("index", &self.index)?;
        if self.tex_coord != 0 {
            map.serialize_entry("texCoord", &self.tex_coord)?;
        }
        if self.strength != 1.0 {
            map.serialize_entry("strength", &self.strength)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// Metallic-roughness parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PbrMetallicRoughness {
    pub base_color_factor: [f32; 4],
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub metallic_roughness_texture: Option<TextureInfo>,
    pub base: Property,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: [1.0; 4],
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
            base: Property::default(),
        }
    }
}

impl PbrMetallicRoughness {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Serialize for PbrMetallicRoughness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.base_color_factor != [1.0; 4] {
            map.serialize_entry("baseColorFactor", &self.base_color_factor)?;
        }
        if let Some(texture) = &self.base_color_texture {
            map.serialize_entry("baseColorTexture", texture)?;
        }
        if self.metallic_factor != 1.0 {
            map.serialize_entry("metallicFactor", &self.metallic_factor)?;
        }
        if self.roughness_factor != 1.0 {
            map.serialize_entry("roughnessFactor", &self.roughness_factor)?;
        }
        if let Some(texture) = &self.metallic_roughness_texture {
            map.serialize_entry("metallicRoughnessTexture", texture)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// Surface appearance of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub pbr_metallic_roughness: PbrMetallicRoughness,
    pub normal_texture: Option<NormalTextureInfo>,
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    pub emissive_texture: Option<TextureInfo>,
    pub emissive_factor: [f32; 3],
    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    pub name: Option<String>,
    pub base: Property,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pbr_metallic_roughness: PbrMetallicRoughness::default(),
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: [0.0; 3],
            alpha_mode: AlphaMode::default(),
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
            double_sided: false,
            name: None,
            base: Property::default(),
        }
    }
}

impl Serialize for Material {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        if !self.pbr_metallic_roughness.is_default() {
            map.serialize_entry("pbrMetallicRoughness", &self.pbr_metallic_roughness)?;
        }
        if let Some(texture) = &self.normal_texture {
            map.serialize_entry("normalTexture", texture)?;
        }
        if let Some(texture) = &self.occlusion_texture {
            map.serialize_entry("occlusionTexture", texture)?;
        }
        if let Some(texture) = &self.emissive_texture {
            map.serialize_entry("emissiveTexture", texture)?;
        }
        if self.emissive_factor != [0.0; 3] {
            map.serialize_entry("emissiveFactor", &self.emissive_factor)?;
        }
        if self.alpha_mode != AlphaMode::default() {
            map.serialize_entry("alphaMode", &self.alpha_mode)?;
        }
        if self.alpha_cutoff != DEFAULT_ALPHA_CUTOFF {
            map.serialize_entry("alphaCutoff", &self.alpha_cutoff)?;
        }
        if self.double_sided {
            map.serialize_entry("doubleSided", &true)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_is_empty_object() {
        assert_eq!(serde_json::to_string(&Material::default()).unwrap(), "{}");
    }

    #[test]
    fn test_non_default_factors_written() {
        let material = Material {
            alpha_mode: AlphaMode::Mask,
            double_sided: true,
            pbr_metallic_roughness: PbrMetallicRoughness {
                roughness_factor: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&material).unwrap();
        assert_eq!(
            json,
            r#"{"pbrMetallicRoughness":{"roughnessFactor":0.5},"alphaMode":"MASK","doubleSided":true}"#
        );
    }
}
