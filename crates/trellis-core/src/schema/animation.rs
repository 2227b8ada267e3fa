//! Keyframe animations.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::Id;
use crate::property::Property;

use super::{Accessor, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    Weights,
}

impl TargetPath {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "translation" => Some(TargetPath::Translation),
            "rotation" => Some(TargetPath::Rotation),
            "scale" => Some(TargetPath::Scale),
            "weights" => Some(TargetPath::Weights),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetPath::Translation => "translation",
            TargetPath::Rotation => "rotation",
            TargetPath::Scale => "scale",
            TargetPath::Weights => "weights",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

impl Interpolation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "LINEAR" => Some(Interpolation::Linear),
            "STEP" => Some(Interpolation::Step),
            "CUBICSPLINE" => Some(Interpolation::CubicSpline),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Interpolation::Linear => "LINEAR",
            Interpolation::Step => "STEP",
            Interpolation::CubicSpline => "CUBICSPLINE",
        }
    }
}

/// The node property a channel drives.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub node: Option<Id<Node>>,
    pub path: TargetPath,
    pub base: Property,
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(node) = &self.node {
            map.serialize_entry("node", node)?;
        }
        map.serialize_entry("path", self.path.as_str())?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Index into the owning animation's `samplers`, not a root array.
    pub sampler: u32,
    pub target: Target,
    pub base: Property,
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("sampler", &self.sampler)?;
        map.serialize_entry("target", &self.target)?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSampler {
    pub input: Id<Accessor>,
    pub interpolation: Interpolation,
    pub output: Id<Accessor>,
    pub base: Property,
}

impl Serialize for AnimationSampler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("input", &self.input)?;
        if self.interpolation != Interpolation::default() {
            map.serialize_entry("interpolation", self.interpolation.as_str())?;
        }
        map.serialize_entry("output", &self.output)?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    pub channels: Vec<Channel>,
    pub samplers: Vec<AnimationSampler>,
    pub name: Option<String>,
    pub base: Property,
}

impl Serialize for Animation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("channels", &self.channels)?;
        map.serialize_entry("samplers", &self.samplers)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}
