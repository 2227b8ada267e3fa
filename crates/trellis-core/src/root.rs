//! The root document.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::ReferenceError;
use crate::id::{Entity, EntityKind, Id, RootId};
use crate::property::Property;
use crate::schema::*;

/// Owner of every top-level entity array and the resolution context for
/// every [`Id`] created against it.
///
/// Array position is the canonical index; entities never store their own.
/// `Root` is not `Clone`: a copy would share this root's identity. Use the
/// graph cloner to copy entities into another root.
#[derive(Debug)]
pub struct Root {
    id: RootId,
    pub asset: Asset,
    pub scene: Option<Id<Scene>>,
    pub extensions_used: Vec<String>,
    pub extensions_required: Vec<String>,
    pub accessors: Vec<Accessor>,
    pub animations: Vec<Animation>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub cameras: Vec<Camera>,
    pub images: Vec<Image>,
    pub materials: Vec<Material>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub samplers: Vec<Sampler>,
    pub scenes: Vec<Scene>,
    pub skins: Vec<Skin>,
    pub textures: Vec<Texture>,
    pub base: Property,
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}

impl Root {
    /// An empty document with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: RootId::next(),
            asset: Asset::default(),
            scene: None,
            extensions_used: Vec::new(),
            extensions_required: Vec::new(),
            accessors: Vec::new(),
            animations: Vec::new(),
            buffers: Vec::new(),
            buffer_views: Vec::new(),
            cameras: Vec::new(),
            images: Vec::new(),
            materials: Vec::new(),
            meshes: Vec::new(),
            nodes: Vec::new(),
            samplers: Vec::new(),
            scenes: Vec::new(),
            skins: Vec::new(),
            textures: Vec::new(),
            base: Property::default(),
        }
    }

    pub fn id(&self) -> RootId {
        self.id
    }

    /// Append an entity and return a reference to it.
    pub fn push<T: Entity>(&mut self, value: T) -> Id<T> {
        let array = T::array_mut(self);
        let index = array.len() as u32;
        array.push(value);
        Id::new(index, self.id)
    }

    /// A reference to `index` in this root. Not validated until resolved.
    pub fn reference<T: Entity>(&self, index: u32) -> Id<T> {
        Id::new(index, self.id)
    }

    pub fn get<T: Entity>(&self, id: Id<T>) -> Result<&T, ReferenceError> {
        id.get(self)
    }

    pub fn get_mut<T: Entity>(&mut self, id: Id<T>) -> Result<&mut T, ReferenceError> {
        id.get_mut(self)
    }

    pub fn len<T: Entity>(&self) -> usize {
        T::array(self).len()
    }

    /// Number of entities of the given kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Accessor => self.accessors.len(),
            EntityKind::Animation => self.animations.len(),
            EntityKind::Buffer => self.buffers.len(),
            EntityKind::BufferView => self.buffer_views.len(),
            EntityKind::Camera => self.cameras.len(),
            EntityKind::Image => self.images.len(),
            EntityKind::Material => self.materials.len(),
            EntityKind::Mesh => self.meshes.len(),
            EntityKind::Node => self.nodes.len(),
            EntityKind::Sampler => self.samplers.len(),
            EntityKind::Scene => self.scenes.len(),
            EntityKind::Skin => self.skins.len(),
            EntityKind::Texture => self.textures.len(),
        }
    }

    /// Drop entities of the given kind past `len`.
    pub fn truncate(&mut self, kind: EntityKind, len: usize) {
        match kind {
            EntityKind::Accessor => self.accessors.truncate(len),
            EntityKind::Animation => self.animations.truncate(len),
            EntityKind::Buffer => self.buffers.truncate(len),
            EntityKind::BufferView => self.buffer_views.truncate(len),
            EntityKind::Camera => self.cameras.truncate(len),
            EntityKind::Image => self.images.truncate(len),
            EntityKind::Material => self.materials.truncate(len),
            EntityKind::Mesh => self.meshes.truncate(len),
            EntityKind::Node => self.nodes.truncate(len),
            EntityKind::Sampler => self.samplers.truncate(len),
            EntityKind::Scene => self.scenes.truncate(len),
            EntityKind::Skin => self.skins.truncate(len),
            EntityKind::Texture => self.textures.truncate(len),
        }
    }

    /// Iterate entities of one kind together with their references.
    pub fn iter<'a, T: Entity + 'a>(&'a self) -> impl Iterator<Item = (Id<T>, &'a T)> + 'a {
        let id = self.id;
        T::array(self)
            .iter()
            .enumerate()
            .map(move |(i, value)| (Id::new(i as u32, id), value))
    }

    /// The scene to display by default.
    pub fn default_scene(&self) -> Option<&Scene> {
        self.scene.and_then(|id| id.get(self).ok())
    }

    /// Record an extension as used, and optionally required.
    pub fn use_extension(&mut self, name: &str, required: bool) {
        if !self.extensions_used.iter().any(|e| e == name) {
            self.extensions_used.push(name.to_string());
        }
        if required && !self.extensions_required.iter().any(|e| e == name) {
            self.extensions_required.push(name.to_string());
        }
    }
}

macro_rules! impl_entity {
    ($($ty:ty => $kind:ident, $field:ident;)*) => {
        $(
            impl Entity for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn array(root: &Root) -> &Vec<Self> {
                    &root.$field
                }

                fn array_mut(root: &mut Root) -> &mut Vec<Self> {
                    &mut root.$field
                }
            }
        )*
    };
}

impl_entity! {
    Accessor => Accessor, accessors;
    Animation => Animation, animations;
    Buffer => Buffer, buffers;
    BufferView => BufferView, buffer_views;
    Camera => Camera, cameras;
    Image => Image, images;
    Material => Material, materials;
    Mesh => Mesh, meshes;
    Node => Node, nodes;
    Sampler => Sampler, samplers;
    Scene => Scene, scenes;
    Skin => Skin, skins;
    Texture => Texture, textures;
}

fn entry_if_any<M: SerializeMap, T: Serialize>(
    map: &mut M,
    key: &'static str,
    values: &[T],
) -> Result<(), M::Error> {
    if values.is_empty() {
        Ok(())
    } else {
        map.serialize_entry(key, values)
    }
}

impl Serialize for Root {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("asset", &self.asset)?;
        entry_if_any(&mut map, "extensionsUsed", &self.extensions_used)?;
        entry_if_any(&mut map, "extensionsRequired", &self.extensions_required)?;
        if let Some(scene) = &self.scene {
            map.serialize_entry("scene", scene)?;
        }
        entry_if_any(&mut map, "scenes", &self.scenes)?;
        entry_if_any(&mut map, "nodes", &self.nodes)?;
        entry_if_any(&mut map, "meshes", &self.meshes)?;
        entry_if_any(&mut map, "accessors", &self.accessors)?;
        entry_if_any(&mut map, "bufferViews", &self.buffer_views)?;
        entry_if_any(&mut map, "buffers", &self.buffers)?;
        entry_if_any(&mut map, "materials", &self.materials)?;
        entry_if_any(&mut map, "textures", &self.textures)?;
        entry_if_any(&mut map, "images", &self.images)?;
        entry_if_any(&mut map, "samplers", &self.samplers)?;
        entry_if_any(&mut map, "animations", &self.animations)?;
        entry_if_any(&mut map, "skins", &self.skins)?;
        entry_if_any(&mut map, "cameras", &self.cameras)?;
        self.base.serialize_entries(&mut map)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_sequential_ids() {
        let mut root = Root::new();
        let a = root.push(Node::named("a"));
        let b = root.push(Node::named("b"));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(root.get(b).unwrap().name.as_deref(), Some("b"));
        assert_eq!(root.len::<Node>(), 2);
    }

    #[test]
    fn test_roots_have_distinct_ids() {
        assert_ne!(Root::new().id(), Root::new().id());
    }

    #[test]
    fn test_iter_yields_ids() {
        let mut root = Root::new();
        root.push(Scene::default());
        root.push(Scene::default());
        let ids: Vec<u32> = root.iter::<Scene>().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_truncate_by_kind() {
        let mut root = Root::new();
        root.push(Buffer::default());
        root.push(Buffer::default());
        root.truncate(EntityKind::Buffer, 1);
        assert_eq!(root.count(EntityKind::Buffer), 1);
    }

    #[test]
    fn test_empty_root_serializes_asset_only() {
        let root = Root::new();
        assert_eq!(
            serde_json::to_string(&root).unwrap(),
            r#"{"asset":{"version":"2.0"}}"#
        );
    }

    #[test]
    fn test_use_extension_dedupes() {
        let mut root = Root::new();
        root.use_extension("KHR_materials_unlit", false);
        root.use_extension("KHR_materials_unlit", true);
        assert_eq!(root.extensions_used, vec!["KHR_materials_unlit"]);
        assert_eq!(root.extensions_required, vec!["KHR_materials_unlit"]);
    }
}
