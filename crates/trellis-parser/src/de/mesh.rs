use trellis_core::{
    Attributes, Mesh, Mode, MorphTarget, ParseError, Primitive, RootId, Semantic,
};

use super::{read_code, read_entities, read_object, required, FromJson};
use crate::reader::JsonReader;

/// Read a semantic-to-accessor map. Two keys naming the same semantic are
/// rejected.
fn read_attributes(r: &mut JsonReader<'_>, root: RootId) -> Result<Attributes, ParseError> {
    let mut attributes = Attributes::new();
    r.begin_object()?;
    while let Some(key) = r.next_key()? {
        let accessor = r
            .read_index(root)
            .map_err(|e| e.within("attributes", &key))?;
        if attributes.insert(Semantic::from(&*key), accessor).is_some() {
            return Err(ParseError::DuplicateKey {
                key: key.into_owned(),
            });
        }
    }
    Ok(attributes)
}

impl FromJson for Primitive {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut primitive = Primitive::default();
        let mut attributes = None;

        read_object(r, "primitive", &mut primitive.base, |r, key| {
            match key {
                "attributes" => attributes = Some(read_attributes(r, root)?),
                "indices" => primitive.indices = Some(r.read_index(root)?),
                "material" => primitive.material = Some(r.read_index(root)?),
                "mode" => primitive.mode = read_code(r, "primitive mode", Mode::from_code)?,
                "targets" => {
                    let targets: Vec<MorphTarget> =
                        r.read_array(|r| read_attributes(r, root))?;
                    primitive.targets = Some(targets);
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        primitive.attributes = required(attributes, "primitive", "attributes")?;
        Ok(primitive)
    }
}

impl FromJson for Mesh {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut mesh = Mesh::default();
        let mut primitives = None;

        read_object(r, "mesh", &mut mesh.base, |r, key| {
            match key {
                "primitives" => primitives = Some(read_entities(r, root)?),
                "weights" => mesh.weights = Some(r.read_array(|r| r.read_f32())?),
                "name" => mesh.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        mesh.primitives = required(primitives, "mesh", "primitives")?;
        Ok(mesh)
    }
}
