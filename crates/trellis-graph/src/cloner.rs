//! Deep copy of entity graphs between roots.
//!
//! Copying an entity copies everything it references, rewrites every
//! reference to point into the target root, and records each copy in a remap
//! table so an entity reached twice is copied once.

use std::collections::{HashMap, HashSet};

use trellis_core::*;

type Result<T> = std::result::Result<T, CloneError>;

type Key = (EntityKind, u32);

/// An entity that knows how to copy itself and its references.
///
/// Implemented for every schema entity in this crate. Only
/// [`GraphCloner::clone_entity`] drives the copy, so a failed copy never
/// leaves partial state behind.
pub trait CloneEntity: Entity + Clone {
    /// Copy `self`, rebinding every reference through `cloner`.
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self>;

    /// A value to occupy the entity's slot while its references are copied.
    ///
    /// Kinds that can be reached back through non-owning links (nodes, via
    /// skins and animation targets) reserve their slot up front so those
    /// links bind to it.
    fn placeholder() -> Option<Self> {
        None
    }
}

/// Copies entities from `source` into `target`.
///
/// The remap table lives as long as the cloner, so cloning several entities
/// through one cloner shares the dependencies they have in common.
pub struct GraphCloner<'a> {
    source: &'a Root,
    target: &'a mut Root,
    remap: HashMap<Key, u32>,
    active: HashSet<Key>,
    /// Slots reserved by a back-link whose contents are not copied yet.
    pending: Vec<Key>,
}

impl<'a> GraphCloner<'a> {
    pub fn new(source: &'a Root, target: &'a mut Root) -> Self {
        Self {
            source,
            target,
            remap: HashMap::new(),
            active: HashSet::new(),
            pending: Vec::new(),
        }
    }

    pub fn source(&self) -> &Root {
        self.source
    }

    pub fn target(&self) -> &Root {
        &*self.target
    }

    /// Where `id` was copied to, if it has been.
    pub fn mapped<T: Entity>(&self, id: Id<T>) -> Option<Id<T>> {
        self.remap
            .get(&(T::KIND, id.index()))
            .map(|&index| self.target.reference(index))
    }

    /// Copy one entity and its dependencies.
    ///
    /// On error the target is left exactly as it was before the call.
    pub fn clone_entity<T: CloneEntity>(&mut self, id: Id<T>) -> Result<Id<T>> {
        let snapshot: Vec<(EntityKind, usize)> = EntityKind::ALL
            .iter()
            .map(|&kind| (kind, self.target.count(kind)))
            .collect();

        match self.copy_with_links(id) {
            Ok(new) => {
                self.merge_extensions();
                let appended: usize = snapshot
                    .iter()
                    .map(|&(kind, len)| self.target.count(kind) - len)
                    .sum();
                log::debug!(
                    "cloned {}[{}] to index {} ({} entities appended)",
                    T::KIND,
                    id.index(),
                    new.index(),
                    appended
                );
                Ok(new)
            }
            Err(err) => {
                for &(kind, len) in &snapshot {
                    self.target.truncate(kind, len);
                }
                self.remap.retain(|(kind, _), new| {
                    snapshot
                        .iter()
                        .find(|(k, _)| k == kind)
                        .map_or(false, |&(_, len)| (*new as usize) < len)
                });
                self.active.clear();
                self.pending.clear();
                log::warn!("rolled back clone of {}[{}]: {}", T::KIND, id.index(), err);
                Err(err)
            }
        }
    }

    /// Copy `id`, then fill every slot reserved by a back-link on the way.
    fn copy_with_links<T: CloneEntity>(&mut self, id: Id<T>) -> Result<Id<T>> {
        let new = self.copy(id)?;
        while let Some(&(_, index)) = self.pending.last() {
            let node: Id<Node> = self.source.reference(index);
            self.copy(node)?;
        }
        Ok(new)
    }

    /// Follow an owning reference: copy the entity unless it already has
    /// been. Reaching an entity that is still being copied is a cycle.
    pub(crate) fn copy<T: CloneEntity>(&mut self, id: Id<T>) -> Result<Id<T>> {
        let source = self.source;
        let value = id.get(source)?;
        let key = (T::KIND, id.index());

        if self.active.contains(&key) {
            return Err(CloneError::Cycle {
                kind: T::KIND,
                index: id.index(),
            });
        }
        if let Some(&index) = self.remap.get(&key) {
            let slot = self.target.reference(index);
            // A slot reserved by a back-link is filled by the first owning
            // walk that reaches it.
            if !self.take_pending(key) {
                return Ok(slot);
            }
            return self.fill(key, value, slot);
        }

        match T::placeholder() {
            Some(placeholder) => {
                let slot = self.reserve(key, placeholder);
                self.fill(key, value, slot)
            }
            None => {
                self.active.insert(key);
                let result = value.clone_with(self);
                self.active.remove(&key);
                let new = self.target.push(result?);
                self.remap.insert(key, new.index());
                Ok(new)
            }
        }
    }

    /// Follow a non-owning link into the node hierarchy. A node that has
    /// not been copied gets its slot now and its contents once the current
    /// walk is done.
    pub(crate) fn link(&mut self, id: Id<Node>) -> Result<Id<Node>> {
        id.get(self.source)?;
        let key = (EntityKind::Node, id.index());
        if let Some(&index) = self.remap.get(&key) {
            return Ok(self.target.reference(index));
        }
        let slot = self.reserve(key, Node::default());
        self.pending.push(key);
        Ok(slot)
    }

    pub(crate) fn copy_opt<T: CloneEntity>(
        &mut self,
        id: Option<Id<T>>,
    ) -> Result<Option<Id<T>>> {
        id.map(|id| self.copy(id)).transpose()
    }

    pub(crate) fn copy_all<T: CloneEntity>(&mut self, ids: &[Id<T>]) -> Result<Vec<Id<T>>> {
        ids.iter().map(|&id| self.copy(id)).collect()
    }

    fn reserve<T: Entity>(&mut self, key: Key, placeholder: T) -> Id<T> {
        let slot = self.target.push(placeholder);
        self.remap.insert(key, slot.index());
        slot
    }

    fn fill<T: CloneEntity>(&mut self, key: Key, value: &T, slot: Id<T>) -> Result<Id<T>> {
        self.active.insert(key);
        let result = value.clone_with(self);
        self.active.remove(&key);
        *slot.get_mut(self.target)? = result?;
        Ok(slot)
    }

    fn take_pending(&mut self, key: Key) -> bool {
        match self.pending.iter().position(|&k| k == key) {
            Some(pos) => {
                self.pending.remove(pos);
                true
            }
            None => false,
        }
    }

    fn merge_extensions(&mut self) {
        let source = self.source;
        for name in &source.extensions_used {
            let required = source.extensions_required.contains(name);
            self.target.use_extension(name, required);
        }
        for name in &source.extensions_required {
            self.target.use_extension(name, true);
        }
    }
}

/// Copy `id` and everything it references from `source` into `target`.
pub fn clone_into<T: CloneEntity>(source: &Root, id: Id<T>, target: &mut Root) -> Result<Id<T>> {
    GraphCloner::new(source, target).clone_entity(id)
}

impl CloneEntity for Buffer {
    fn clone_with(&self, _cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(self.clone())
    }
}

impl CloneEntity for BufferView {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(BufferView {
            buffer: cloner.copy(self.buffer)?,
            ..self.clone()
        })
    }
}

impl CloneEntity for Accessor {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        let sparse = match &self.sparse {
            Some(sparse) => Some(Sparse {
                indices: SparseIndices {
                    buffer_view: cloner.copy(sparse.indices.buffer_view)?,
                    ..sparse.indices.clone()
                },
                values: SparseValues {
                    buffer_view: cloner.copy(sparse.values.buffer_view)?,
                    ..sparse.values.clone()
                },
                ..sparse.clone()
            }),
            None => None,
        };
        Ok(Accessor {
            buffer_view: cloner.copy_opt(self.buffer_view)?,
            sparse,
            ..self.clone()
        })
    }
}

impl CloneEntity for Image {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(Image {
            buffer_view: cloner.copy_opt(self.buffer_view)?,
            ..self.clone()
        })
    }
}

impl CloneEntity for Sampler {
    fn clone_with(&self, _cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(self.clone())
    }
}

impl CloneEntity for Texture {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(Texture {
            sampler: cloner.copy_opt(self.sampler)?,
            source: cloner.copy_opt(self.source)?,
            ..self.clone()
        })
    }
}

fn texture_info(
    info: &Option<TextureInfo>,
    cloner: &mut GraphCloner<'_>,
) -> Result<Option<TextureInfo>> {
    match info {
        Some(info) => Ok(Some(TextureInfo {
            index: cloner.copy(info.index)?,
            ..info.clone()
        })),
        None => Ok(None),
    }
}

impl CloneEntity for Material {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        let pbr = &self.pbr_metallic_roughness;
        let pbr_metallic_roughness = PbrMetallicRoughness {
            base_color_texture: texture_info(&pbr.base_color_texture, cloner)?,
            metallic_roughness_texture: texture_info(&pbr.metallic_roughness_texture, cloner)?,
            ..pbr.clone()
        };
        let normal_texture = match &self.normal_texture {
            Some(info) => Some(NormalTextureInfo {
                index: cloner.copy(info.index)?,
                ..info.clone()
            }),
            None => None,
        };
        let occlusion_texture = match &self.occlusion_texture {
            Some(info) => Some(OcclusionTextureInfo {
                index: cloner.copy(info.index)?,
                ..info.clone()
            }),
            None => None,
        };
        Ok(Material {
            pbr_metallic_roughness,
            normal_texture,
            occlusion_texture,
            emissive_texture: texture_info(&self.emissive_texture, cloner)?,
            ..self.clone()
        })
    }
}

fn attributes(map: &Attributes, cloner: &mut GraphCloner<'_>) -> Result<Attributes> {
    map.iter()
        .map(|(semantic, &accessor)| cloner.copy(accessor).map(|id| (semantic.clone(), id)))
        .collect()
}

impl CloneEntity for Mesh {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        let mut primitives = Vec::with_capacity(self.primitives.len());
        for primitive in &self.primitives {
            let targets = match &primitive.targets {
                Some(targets) => Some(
                    targets
                        .iter()
                        .map(|target| attributes(target, cloner))
                        .collect::<Result<Vec<_>>>()?,
                ),
                None => None,
            };
            primitives.push(Primitive {
                attributes: attributes(&primitive.attributes, cloner)?,
                indices: cloner.copy_opt(primitive.indices)?,
                material: cloner.copy_opt(primitive.material)?,
                mode: primitive.mode,
                targets,
                base: primitive.base.clone(),
            });
        }
        Ok(Mesh {
            primitives,
            ..self.clone()
        })
    }
}

impl CloneEntity for Camera {
    fn clone_with(&self, _cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(self.clone())
    }
}

impl CloneEntity for Skin {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        let skeleton = match self.skeleton {
            Some(skeleton) => Some(cloner.link(skeleton)?),
            None => None,
        };
        let joints = self
            .joints
            .iter()
            .map(|&joint| cloner.link(joint))
            .collect::<Result<Vec<_>>>()?;
        Ok(Skin {
            inverse_bind_matrices: cloner.copy_opt(self.inverse_bind_matrices)?,
            skeleton,
            joints,
            ..self.clone()
        })
    }
}

impl CloneEntity for Node {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(Node {
            camera: cloner.copy_opt(self.camera)?,
            children: cloner.copy_all(&self.children)?,
            skin: cloner.copy_opt(self.skin)?,
            mesh: cloner.copy_opt(self.mesh)?,
            ..self.clone()
        })
    }

    fn placeholder() -> Option<Self> {
        Some(Node::default())
    }
}

impl CloneEntity for Scene {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        Ok(Scene {
            nodes: cloner.copy_all(&self.nodes)?,
            ..self.clone()
        })
    }
}

impl CloneEntity for Animation {
    fn clone_with(&self, cloner: &mut GraphCloner<'_>) -> Result<Self> {
        let mut samplers = Vec::with_capacity(self.samplers.len());
        for sampler in &self.samplers {
            samplers.push(AnimationSampler {
                input: cloner.copy(sampler.input)?,
                output: cloner.copy(sampler.output)?,
                ..sampler.clone()
            });
        }
        let mut channels = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            let node = match channel.target.node {
                Some(node) => Some(cloner.link(node)?),
                None => None,
            };
            channels.push(Channel {
                target: Target {
                    node,
                    ..channel.target.clone()
                },
                ..channel.clone()
            });
        }
        Ok(Animation {
            channels,
            samplers,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(root: &mut Root) -> Id<Accessor> {
        let buffer = root.push(Buffer {
            byte_length: 36,
            ..Default::default()
        });
        let view = root.push(BufferView::new(buffer, 36));
        let mut accessor = Accessor::new(ComponentType::F32, ElementType::Vec3, 3);
        accessor.buffer_view = Some(view);
        root.push(accessor)
    }

    fn triangle_mesh(root: &mut Root, position: Id<Accessor>) -> Id<Mesh> {
        let mut primitive = Primitive::default();
        primitive.attributes.insert(Semantic::Position, position);
        root.push(Mesh {
            primitives: vec![primitive],
            ..Default::default()
        })
    }

    #[test]
    fn test_clone_mesh_copies_dependencies() {
        let mut source = Root::new();
        let position = positions(&mut source);
        let mesh = triangle_mesh(&mut source, position);

        let mut target = Root::new();
        target.push(Buffer::default());
        let copy = clone_into(&source, mesh, &mut target).unwrap();

        assert_eq!(copy.root(), target.id());
        assert_eq!(target.buffers.len(), 2);
        assert_eq!(target.buffer_views.len(), 1);
        assert_eq!(target.buffer_views[0].buffer.index(), 1);

        let accessor = target.get(copy).unwrap().primitives[0]
            .attribute(&Semantic::Position)
            .unwrap();
        assert_eq!(accessor.root(), target.id());
        assert_eq!(target.get(accessor).unwrap().count, 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut source = Root::new();
        let node = source.push(Node::named("original"));

        let mut target = Root::new();
        let copy = clone_into(&source, node, &mut target).unwrap();
        target.get_mut(copy).unwrap().name = Some("renamed".to_string());

        assert_eq!(source.nodes[0].name.as_deref(), Some("original"));
        assert_eq!(target.nodes[0].name.as_deref(), Some("renamed"));
    }

    #[test]
    fn test_shared_dependency_copied_once() {
        let mut source = Root::new();
        let position = positions(&mut source);
        let a = triangle_mesh(&mut source, position);
        let b = triangle_mesh(&mut source, position);

        let mut target = Root::new();
        let mut cloner = GraphCloner::new(&source, &mut target);
        let a2 = cloner.clone_entity(a).unwrap();
        let b2 = cloner.clone_entity(b).unwrap();
        assert_ne!(a2, b2);
        assert_eq!(cloner.target().accessors.len(), 1);
        assert_eq!(cloner.mapped(position).map(|id| id.index()), Some(0));
    }

    #[test]
    fn test_child_cycle_is_rejected_and_rolled_back() {
        let mut source = Root::new();
        let a = source.push(Node::named("a"));
        let b = source.push(Node::named("b"));
        let mesh_accessor = positions(&mut source);
        let mesh = triangle_mesh(&mut source, mesh_accessor);
        source.nodes[0].children.push(b);
        source.nodes[0].mesh = Some(mesh);
        source.nodes[1].children.push(a);

        let mut target = Root::new();
        target.push(Node::named("existing"));
        let err = clone_into(&source, a, &mut target).unwrap_err();

        assert!(matches!(
            err,
            CloneError::Cycle {
                kind: EntityKind::Node,
                ..
            }
        ));
        assert_eq!(target.nodes.len(), 1);
        assert!(target.meshes.is_empty());
        assert!(target.accessors.is_empty());
        assert!(target.buffers.is_empty());
    }

    #[test]
    fn test_rollback_forgets_remap_entries() {
        let mut source = Root::new();
        let position = positions(&mut source);
        let a = source.push(Node::named("a"));
        source.nodes[0].children.push(a);

        let mut target = Root::new();
        let mut cloner = GraphCloner::new(&source, &mut target);
        assert!(cloner.clone_entity(a).is_err());
        assert!(cloner.mapped(a).is_none());

        let copied = cloner.clone_entity(position).unwrap();
        assert_eq!(copied.index(), 0);
    }

    #[test]
    fn test_skin_skeleton_back_reference() {
        let mut source = Root::new();
        let root_node = source.push(Node::named("armature"));
        let joint = source.push(Node::named("joint"));
        let skin = source.push(Skin {
            skeleton: Some(root_node),
            joints: vec![root_node, joint],
            ..Default::default()
        });
        source.nodes[0].children.push(joint);
        source.nodes[0].skin = Some(skin);

        let mut target = Root::new();
        let copy = clone_into(&source, root_node, &mut target).unwrap();

        assert_eq!(target.nodes.len(), 2);
        let skin = target.get(target.get(copy).unwrap().skin.unwrap()).unwrap();
        assert_eq!(skin.skeleton, Some(copy));
        assert_eq!(skin.joints[0], copy);
        assert_eq!(target.get(copy).unwrap().children, vec![skin.joints[1]]);
        assert_eq!(target.nodes[0].name.as_deref(), Some("armature"));
    }

    #[test]
    fn test_skinned_child_with_ancestor_skeleton() {
        let mut source = Root::new();
        let parent = source.push(Node::named("p"));
        let child = source.push(Node::named("c"));
        let skin = source.push(Skin {
            skeleton: Some(parent),
            joints: vec![parent],
            ..Default::default()
        });
        source.nodes[0].children.push(child);
        source.nodes[1].skin = Some(skin);

        let mut target = Root::new();
        let copy = clone_into(&source, child, &mut target).unwrap();

        assert_eq!(copy.index(), 0);
        assert_eq!(target.nodes.len(), 2);
        let skin = target.get(target.get(copy).unwrap().skin.unwrap()).unwrap();
        let parent_copy = skin.skeleton.unwrap();
        assert_eq!(skin.joints, vec![parent_copy]);

        let parent_node = target.get(parent_copy).unwrap();
        assert_eq!(parent_node.name.as_deref(), Some("p"));
        assert_eq!(parent_node.children, vec![copy]);
        assert!(crate::validate_references(&target).is_empty());
    }

    #[test]
    fn test_cycle_through_linked_nodes_is_rejected() {
        let mut source = Root::new();
        let a = source.push(Node::named("a"));
        let b = source.push(Node::named("b"));
        let skin = source.push(Skin {
            joints: vec![a],
            ..Default::default()
        });
        let holder = source.push(Node::named("holder"));
        source.nodes[0].children.push(b);
        source.nodes[1].children.push(a);
        source.nodes[2].skin = Some(skin);

        let mut target = Root::new();
        let err = clone_into(&source, holder, &mut target).unwrap_err();
        assert!(matches!(err, CloneError::Cycle { kind: EntityKind::Node, .. }));
        assert!(target.nodes.is_empty());
        assert!(target.skins.is_empty());
    }

    #[test]
    fn test_clone_material_reference_is_independent() {
        let mut source = Root::new();
        let position = positions(&mut source);
        let mesh = triangle_mesh(&mut source, position);
        let material = source.push(Material::default());
        source.meshes[0].primitives[0].material = Some(material);

        let mut target = Root::new();
        let copy = clone_into(&source, mesh, &mut target).unwrap();
        let copied_material = target.get(copy).unwrap().primitives[0].material.unwrap();
        assert_eq!(copied_material.root(), target.id());
        assert!(copied_material.get(&source).is_err());

        let other = target.push(Material::default());
        target.get_mut(copy).unwrap().primitives[0].material = Some(other);

        assert_eq!(source.meshes[0].primitives[0].material, Some(material));
        assert!(material.get(&source).is_ok());
        assert_eq!(target.materials.len(), 2);
    }

    #[test]
    fn test_clones_into_separate_roots() {
        let mut source = Root::new();
        let position = positions(&mut source);
        let mesh = triangle_mesh(&mut source, position);

        let mut first = Root::new();
        let mut second = Root::new();
        let a = clone_into(&source, mesh, &mut first).unwrap();
        let b = clone_into(&source, mesh, &mut second).unwrap();

        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(matches!(
            a.get(&second),
            Err(ReferenceError::ForeignRoot { kind: EntityKind::Mesh, .. })
        ));
        assert!(b.get(&first).is_err());

        let accessor = first.get(a).unwrap().primitives[0]
            .attribute(&Semantic::Position)
            .unwrap();
        first.get_mut(accessor).unwrap().count = 99;

        let other = second.get(b).unwrap().primitives[0]
            .attribute(&Semantic::Position)
            .unwrap();
        assert_eq!(second.get(other).unwrap().count, 3);
        assert_eq!(source.accessors[0].count, 3);
        assert!(accessor.get(&second).is_err());
    }

    #[test]
    fn test_dangling_reference_fails() {
        let mut source = Root::new();
        let node = source.push(Node {
            mesh: Some(source.reference(5)),
            ..Default::default()
        });

        let mut target = Root::new();
        let err = clone_into(&source, node, &mut target).unwrap_err();
        assert!(matches!(
            err,
            CloneError::Reference(ReferenceError::OutOfRange {
                kind: EntityKind::Mesh,
                index: 5,
                ..
            })
        ));
        assert!(target.nodes.is_empty());
    }

    #[test]
    fn test_extensions_merged() {
        let mut source = Root::new();
        source.use_extension("KHR_materials_unlit", true);
        let material = source.push(Material::default());

        let mut target = Root::new();
        clone_into(&source, material, &mut target).unwrap();
        assert_eq!(target.extensions_used, vec!["KHR_materials_unlit"]);
        assert_eq!(target.extensions_required, vec!["KHR_materials_unlit"]);
    }

    #[test]
    fn test_animation_target_links_to_copied_node() {
        let mut source = Root::new();
        let input = positions(&mut source);
        let node = source.push(Node::named("spinner"));
        let animation = source.push(Animation {
            channels: vec![Channel {
                sampler: 0,
                target: Target {
                    node: Some(node),
                    path: TargetPath::Rotation,
                    base: Property::default(),
                },
                base: Property::default(),
            }],
            samplers: vec![AnimationSampler {
                input,
                interpolation: Interpolation::Step,
                output: input,
                base: Property::default(),
            }],
            ..Default::default()
        });

        let mut target = Root::new();
        let mut cloner = GraphCloner::new(&source, &mut target);
        let node2 = cloner.clone_entity(node).unwrap();
        let anim2 = cloner.clone_entity(animation).unwrap();

        let copied = cloner.target().get(anim2).unwrap();
        assert_eq!(copied.channels[0].target.node, Some(node2));
        assert_eq!(copied.samplers[0].interpolation, Interpolation::Step);
        assert_eq!(cloner.target().nodes.len(), 1);
    }
}
