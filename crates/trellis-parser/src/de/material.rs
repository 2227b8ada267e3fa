use trellis_core::{
    AlphaMode, Material, NormalTextureInfo, OcclusionTextureInfo, ParseError, PbrMetallicRoughness,
    Property, RootId, TextureInfo,
};

use super::{read_name, read_object, required, FromJson};
use crate::reader::JsonReader;

impl FromJson for TextureInfo {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut index = None;
        let mut tex_coord = 0;

        read_object(r, "textureInfo", &mut base, |r, key| {
            match key {
                "index" => index = Some(r.read_index(root)?),
                "texCoord" => tex_coord = r.read_u32()?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(TextureInfo {
            index: required(index, "textureInfo", "index")?,
            tex_coord,
            base,
        })
    }
}

impl FromJson for NormalTextureInfo {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut index = None;
        let mut tex_coord = 0;
        let mut scale = 1.0;

        read_object(r, "normalTextureInfo", &mut base, |r, key| {
            match key {
                "index" => index = Some(r.read_index(root)?),
                "texCoord" => tex_coord = r.read_u32()?,
                "scale" => scale = r.read_f32()?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(NormalTextureInfo {
            index: required(index, "normalTextureInfo", "index")?,
            tex_coord,
            scale,
            base,
        })
    }
}

impl FromJson for OcclusionTextureInfo {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut base = Property::default();
        let mut index = None;
        let mut tex_coord = 0;
        let mut strength = 1.0;

        read_object(r, "occlusionTextureInfo", &mut base, |r, key| {
            match key {
                "index" => index = Some(r.read_index(root)?),
                "texCoord" => tex_coord = r.read_u32()?,
                "strength" => strength = r.read_f32()?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(OcclusionTextureInfo {
            index: required(index, "occlusionTextureInfo", "index")?,
            tex_coord,
            strength,
            base,
        })
    }
}

impl FromJson for PbrMetallicRoughness {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut pbr = PbrMetallicRoughness::default();
        read_object(r, "pbrMetallicRoughness", &mut pbr.base, |r, key| {
            match key {
                "baseColorFactor" => pbr.base_color_factor = r.read_f32_array()?,
                "baseColorTexture" => pbr.base_color_texture = Some(TextureInfo::read(r, root)?),
                "metallicFactor" => pbr.metallic_factor = r.read_f32()?,
                "roughnessFactor" => pbr.roughness_factor = r.read_f32()?,
                "metallicRoughnessTexture" => {
                    pbr.metallic_roughness_texture = Some(TextureInfo::read(r, root)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(pbr)
    }
}

impl FromJson for Material {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut material = Material::default();
        read_object(r, "material", &mut material.base, |r, key| {
            match key {
                "pbrMetallicRoughness" => {
                    material.pbr_metallic_roughness = PbrMetallicRoughness::read(r, root)?
                }
                "normalTexture" => {
                    material.normal_texture = Some(NormalTextureInfo::read(r, root)?)
                }
                "occlusionTexture" => {
                    material.occlusion_texture = Some(OcclusionTextureInfo::read(r, root)?)
                }
                "emissiveTexture" => material.emissive_texture = Some(TextureInfo::read(r, root)?),
                "emissiveFactor" => material.emissive_factor = r.read_f32_array()?,
                "alphaMode" => {
                    material.alpha_mode = read_name(r, "alpha mode", AlphaMode::from_name)?
                }
                "alphaCutoff" => material.alpha_cutoff = r.read_f32()?,
                "doubleSided" => material.double_sided = r.read_bool()?,
                "name" => material.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de::tests::read_one;

    #[test]
    fn test_material_defaults() {
        let material = read_one::<Material>("{}").unwrap();
        assert_eq!(material, Material::default());
        assert!(material.pbr_metallic_roughness.is_default());
    }

    #[test]
    fn test_material_fields() {
        let material = read_one::<Material>(
            r#"{
                "name": "red",
                "pbrMetallicRoughness": {
                    "baseColorFactor": [0.8, 0.0, 0.0, 1.0],
                    "metallicFactor": 0.0,
                    "baseColorTexture": {"index": 2, "texCoord": 1}
                },
                "normalTexture": {"index": 0, "scale": 0.5},
                "alphaMode": "MASK",
                "alphaCutoff": 0.25,
                "doubleSided": true
            }"#,
        )
        .unwrap();
        let pbr = &material.pbr_metallic_roughness;
        assert_eq!(pbr.base_color_factor, [0.8, 0.0, 0.0, 1.0]);
        assert_eq!(pbr.metallic_factor, 0.0);
        assert_eq!(pbr.roughness_factor, 1.0);
        let texture = pbr.base_color_texture.as_ref().unwrap();
        assert_eq!((texture.index.index(), texture.tex_coord), (2, 1));
        assert_eq!(material.normal_texture.as_ref().unwrap().scale, 0.5);
        assert_eq!(material.alpha_mode, AlphaMode::Mask);
        assert_eq!(material.alpha_cutoff, 0.25);
        assert!(material.double_sided);
    }

    #[test]
    fn test_wrong_factor_length() {
        let err = read_one::<Material>(r#"{"emissiveFactor": [1, 1]}"#).unwrap_err();
        assert_eq!(err.context(), Some(("material", "emissiveFactor")));
        assert!(matches!(
            err.root_cause(),
            ParseError::WrongLength {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_unknown_alpha_mode() {
        let err = read_one::<Material>(r#"{"alphaMode": "HIDDEN"}"#).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            ParseError::InvalidEnum { value, .. } if value == "HIDDEN"
        ));
    }

    #[test]
    fn test_texture_info_requires_index() {
        let err = read_one::<Material>(r#"{"emissiveTexture": {"texCoord": 1}}"#).unwrap_err();
        assert_eq!(err.context(), Some(("textureInfo", "index")));
    }
}
