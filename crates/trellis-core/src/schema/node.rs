//! Nodes, scenes and skins.

use glam::{Mat4, Quat, Vec3};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::Id;
use crate::property::Property;

use super::{Accessor, Camera, Mesh};

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// A node in the scene hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub camera: Option<Id<Camera>>,
    pub children: Vec<Id<Node>>,
    pub skin: Option<Id<Skin>>,
    /// Column-major local transform. Mutually exclusive with TRS.
    pub matrix: Option<[f32; 16]>,
    pub mesh: Option<Id<Mesh>>,
    /// Unit quaternion, `[x, y, z, w]`.
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub translation: [f32; 3],
    pub weights: Option<Vec<f32>>,
    pub name: Option<String>,
    pub base: Property,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            camera: None,
            children: Vec::new(),
            skin: None,
            matrix: None,
            mesh: None,
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
            translation: [0.0; 3],
            weights: None,
            name: None,
            base: Property::default(),
        }
    }
}

impl Node {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Local transform in the document's own coordinate space.
    pub fn transform(&self) -> Mat4 {
        match &self.matrix {
            Some(matrix) => Mat4::from_cols_array(matrix),
            None => Mat4::from_scale_rotation_translation(
                Vec3::from_array(self.scale),
                Quat::from_array(self.rotation),
                Vec3::from_array(self.translation),
            ),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(camera) = &self.camera {
            map.serialize_entry("camera", camera)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry("children", &self.children)?;
        }
        if let Some(skin) = &self.skin {
            map.serialize_entry("skin", skin)?;
        }
        if let Some(matrix) = self.matrix.as_ref().filter(|m| **m != IDENTITY) {
            map.serialize_entry("matrix", matrix)?;
        }
        if let Some(mesh) = &self.mesh {
            map.serialize_entry("mesh", mesh)?;
        }
        if self.rotation != [0.0, 0.0, 0.0, 1.0] {
            map.serialize_entry("rotation", &self.rotation)?;
        }
        if self.scale != [1.0; 3] {
            map.serialize_entry("scale", &self.scale)?;
        }
        if self.translation != [0.0; 3] {
            map.serialize_entry("translation", &self.translation)?;
        }
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

/// A set of root nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<Id<Node>>,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Scene {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.nodes.is_empty() {
            map.serialize_entry("nodes", &self.nodes)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

/// Joints and inverse bind matrices for vertex skinning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    pub inverse_bind_matrices: Option<Id<Accessor>>,
    pub skeleton: Option<Id<Node>>,
    pub joints: Vec<Id<Node>>,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Skin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(matrices) = &self.inverse_bind_matrices {
            map.serialize_entry("inverseBindMatrices", matrices)?;
        }
        if let Some(skeleton) = &self.skeleton {
            map.serialize_entry("skeleton", skeleton)?;
        }
        map.serialize_entry("joints", &self.joints)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
