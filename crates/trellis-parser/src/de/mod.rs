//! Per-entity readers.
//!
//! Every schema type reads itself from an object by dispatching on the
//! property name. Keys it does not know go to its [`Property`] base.

mod accessor;
mod animation;
mod buffer;
mod camera;
mod material;
mod mesh;
mod scene;
mod texture;

use indexmap::IndexMap;
use trellis_core::{Asset, ParseError, Property, Root, RootId};

use crate::reader::JsonReader;

type Result<T> = std::result::Result<T, ParseError>;

/// A schema type that can be read from a JSON object.
pub(crate) trait FromJson: Sized {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self>;
}

/// Read an object, handing each member to `field`.
///
/// `field` returns `false` for keys it does not handle; those are stored on
/// `base`. Any error is tagged with `entity` and the key being read.
pub(crate) fn read_object<'a, F>(
    r: &mut JsonReader<'a>,
    entity: &'static str,
    base: &mut Property,
    mut field: F,
) -> Result<()>
where
    F: FnMut(&mut JsonReader<'a>, &str) -> Result<bool>,
{
    r.begin_object()?;
    while let Some(key) = r.next_key()? {
        let handled = field(r, &key).map_err(|e| e.within(entity, &key))?;
        if !handled {
            read_base_member(r, base, &key).map_err(|e| e.within(entity, &key))?;
        }
    }
    Ok(())
}

fn read_base_member(r: &mut JsonReader<'_>, base: &mut Property, key: &str) -> Result<()> {
    match key {
        "extensions" => {
            let mut extensions = IndexMap::new();
            r.begin_object()?;
            while let Some(name) = r.next_key()? {
                let value = r.read_value()?;
                extensions.insert(name.into_owned(), value);
            }
            base.extensions = Some(extensions);
        }
        "extras" => base.extras = Some(r.read_value()?),
        _ => {
            log::trace!("preserving unrecognized property '{}'", key);
            let value = r.read_value()?;
            base.unrecognized.insert(key.to_string(), value);
        }
    }
    Ok(())
}

pub(crate) fn required<T>(
    value: Option<T>,
    entity: &'static str,
    property: &'static str,
) -> Result<T> {
    value.ok_or(ParseError::MissingProperty { entity, property })
}

/// Read an enum stored as a numeric code.
pub(crate) fn read_code<E>(
    r: &mut JsonReader<'_>,
    what: &'static str,
    from_code: fn(u32) -> Option<E>,
) -> Result<E> {
    let code = r.read_u32()?;
    from_code(code).ok_or_else(|| ParseError::InvalidEnum {
        what,
        value: code.to_string(),
    })
}

/// Read an enum stored as a string.
pub(crate) fn read_name<E>(
    r: &mut JsonReader<'_>,
    what: &'static str,
    from_name: fn(&str) -> Option<E>,
) -> Result<E> {
    let name = r.read_string()?;
    from_name(&name).ok_or(ParseError::InvalidEnum { what, value: name })
}

pub(crate) fn read_entities<T: FromJson>(r: &mut JsonReader<'_>, root: RootId) -> Result<Vec<T>> {
    r.read_array(|r| T::read(r, root))
}

impl FromJson for Asset {
    fn read(r: &mut JsonReader<'_>, _root: RootId) -> Result<Self> {
        let mut asset = Asset::default();
        let mut version = None;
        read_object(r, "asset", &mut asset.base, |r, key| {
            match key {
                "version" => version = Some(r.read_string()?),
                "minVersion" => asset.min_version = Some(r.read_string()?),
                "generator" => asset.generator = Some(r.read_string()?),
                "copyright" => asset.copyright = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        asset.version = required(version, "asset", "version")?;
        Ok(asset)
    }
}

/// Read a complete document into a new root.
pub(crate) fn read_root(r: &mut JsonReader<'_>) -> Result<Root> {
    let mut root = Root::new();
    let id = root.id();
    let mut asset = None;
    let mut base = Property::default();

    read_object(r, "glTF", &mut base, |r, key| {
        match key {
            "asset" => asset = Some(Asset::read(r, id)?),
            "scene" => root.scene = Some(r.read_index(id)?),
            "extensionsUsed" => root.extensions_used = r.read_string_array()?,
            "extensionsRequired" => root.extensions_required = r.read_string_array()?,
            "accessors" => root.accessors = read_entities(r, id)?,
            "animations" => root.animations = read_entities(r, id)?,
            "buffers" => root.buffers = read_entities(r, id)?,
            "bufferViews" => root.buffer_views = read_entities(r, id)?,
            "cameras" => root.cameras = read_entities(r, id)?,
            "images" => root.images = read_entities(r, id)?,
            "materials" => root.materials = read_entities(r, id)?,
            "meshes" => root.meshes = read_entities(r, id)?,
            "nodes" => root.nodes = read_entities(r, id)?,
            "samplers" => root.samplers = read_entities(r, id)?,
            "scenes" => root.scenes = read_entities(r, id)?,
            "skins" => root.skins = read_entities(r, id)?,
            "textures" => root.textures = read_entities(r, id)?,
            _ => return Ok(false),
        }
        Ok(true)
    })?;

    root.asset = required(asset, "glTF", "asset")?;
    root.base = base;
    Ok(root)
}
