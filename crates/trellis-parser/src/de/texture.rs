use trellis_core::{Image, MagFilter, MinFilter, ParseError, RootId, Sampler, Texture, WrapMode};

use super::{read_code, read_object, FromJson};
use crate::reader::JsonReader;

impl FromJson for Texture {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut texture = Texture::default();
        read_object(r, "texture", &mut texture.base, |r, key| {
            match key {
                "sampler" => texture.sampler = Some(r.read_index(root)?),
                "source" => texture.source = Some(r.read_index(root)?),
                "name" => texture.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(texture)
    }
}

impl FromJson for Image {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut image = Image::default();
        read_object(r, "image", &mut image.base, |r, key| {
            match key {
                "uri" => image.uri = Some(r.read_string()?),
                "mimeType" => image.mime_type = Some(r.read_string()?),
                "bufferView" => image.buffer_view = Some(r.read_index(root)?),
                "name" => image.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(image)
    }
}

impl FromJson for Sampler {
    fn read(r: &mut JsonReader<'_>, _root: RootId) -> Result<Self, ParseError> {
        let mut sampler = Sampler::default();
        read_object(r, "sampler", &mut sampler.base, |r, key| {
            match key {
                "magFilter" => {
                    sampler.mag_filter = Some(read_code(r, "mag filter", MagFilter::from_code)?)
                }
                "minFilter" => {
                    sampler.min_filter = Some(read_code(r, "min filter", MinFilter::from_code)?)
                }
                "wrapS" => sampler.wrap_s = read_code(r, "wrap mode", WrapMode::from_code)?,
                "wrapT" => sampler.wrap_t = read_code(r, "wrap mode", WrapMode::from_code)?,
                "name" => sampler.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(sampler)
    }
}
