use trellis_core::{Node, ParseError, RootId, Scene, Skin};

use super::{read_object, required, FromJson};
use crate::reader::JsonReader;

impl FromJson for Node {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut node = Node::default();
        read_object(r, "node", &mut node.base, |r, key| {
            match key {
                "camera" => node.camera = Some(r.read_index(root)?),
                "children" => node.children = r.read_index_array(root)?,
                "skin" => node.skin = Some(r.read_index(root)?),
                "matrix" => node.matrix = Some(r.read_f32_array()?),
                "mesh" => node.mesh = Some(r.read_index(root)?),
                "rotation" => node.rotation = r.read_f32_array()?,
                "scale" => node.scale = r.read_f32_array()?,
                "translation" => node.translation = r.read_f32_array()?,
                "weights" => node.weights = Some(r.read_array(|r| r.read_f32())?),
                "name" => node.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(node)
    }
}

impl FromJson for Scene {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut scene = Scene::default();
        read_object(r, "scene", &mut scene.base, |r, key| {
            match key {
                "nodes" => scene.nodes = r.read_index_array(root)?,
                "name" => scene.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(scene)
    }
}

impl FromJson for Skin {
    fn read(r: &mut JsonReader<'_>, root: RootId) -> Result<Self, ParseError> {
        let mut skin = Skin::default();
        let mut joints = None;
        read_object(r, "skin", &mut skin.base, |r, key| {
            match key {
                "inverseBindMatrices" => skin.inverse_bind_matrices = Some(r.read_index(root)?),
                "skeleton" => skin.skeleton = Some(r.read_index(root)?),
                "joints" => joints = Some(r.read_index_array(root)?),
                "name" => skin.name = Some(r.read_string()?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        skin.joints = required(joints, "skin", "joints")?;
        Ok(skin)
    }
}
