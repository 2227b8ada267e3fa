//! Reference validation.

use trellis_core::*;

struct Walker<'a> {
    root: &'a Root,
    errors: Vec<ReferenceError>,
}

impl Walker<'_> {
    fn check<T: Entity>(&mut self, id: Id<T>) {
        if let Err(err) = id.get(self.root) {
            self.errors.push(err);
        }
    }

    fn check_opt<T: Entity>(&mut self, id: Option<Id<T>>) {
        if let Some(id) = id {
            self.check(id);
        }
    }

    fn check_all<T: Entity>(&mut self, ids: &[Id<T>]) {
        for &id in ids {
            self.check(id);
        }
    }

    fn check_attributes(&mut self, attributes: &Attributes) {
        for &accessor in attributes.values() {
            self.check(accessor);
        }
    }
}

/// Every reference in `root` that does not resolve, in document order.
pub fn validate_references(root: &Root) -> Vec<ReferenceError> {
    let mut w = Walker {
        root,
        errors: Vec::new(),
    };

    w.check_opt(root.scene);
    for scene in &root.scenes {
        w.check_all(&scene.nodes);
    }
    for node in &root.nodes {
        w.check_opt(node.camera);
        w.check_all(&node.children);
        w.check_opt(node.skin);
        w.check_opt(node.mesh);
    }
    for mesh in &root.meshes {
        for primitive in &mesh.primitives {
            w.check_attributes(&primitive.attributes);
            w.check_opt(primitive.indices);
            w.check_opt(primitive.material);
            for target in primitive.targets.iter().flatten() {
                w.check_attributes(target);
            }
        }
    }
    for accessor in &root.accessors {
        w.check_opt(accessor.buffer_view);
        if let Some(sparse) = &accessor.sparse {
            w.check(sparse.indices.buffer_view);
            w.check(sparse.values.buffer_view);
        }
    }
    for view in &root.buffer_views {
        w.check(view.buffer);
    }
    for material in &root.materials {
        let pbr = &material.pbr_metallic_roughness;
        w.check_opt(pbr.base_color_texture.as_ref().map(|t| t.index));
        w.check_opt(pbr.metallic_roughness_texture.as_ref().map(|t| t.index));
        w.check_opt(material.normal_texture.as_ref().map(|t| t.index));
        w.check_opt(material.occlusion_texture.as_ref().map(|t| t.index));
        w.check_opt(material.emissive_texture.as_ref().map(|t| t.index));
    }
    for texture in &root.textures {
        w.check_opt(texture.sampler);
        w.check_opt(texture.source);
    }
    for image in &root.images {
        w.check_opt(image.buffer_view);
    }
    for skin in &root.skins {
        w.check_opt(skin.inverse_bind_matrices);
        w.check_opt(skin.skeleton);
        w.check_all(&skin.joints);
    }
    for (index, animation) in root.animations.iter().enumerate() {
        for channel in &animation.channels {
            if channel.sampler as usize >= animation.samplers.len() {
                w.errors.push(ReferenceError::SamplerOutOfRange {
                    animation: index as u32,
                    sampler: channel.sampler,
                    len: animation.samplers.len(),
                });
            }
            w.check_opt(channel.target.node);
        }
        for sampler in &animation.samplers {
            w.check(sampler.input);
            w.check(sampler.output);
        }
    }

    w.errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document() {
        let mut root = Root::new();
        let node = root.push(Node::named("n"));
        let scene = root.push(Scene {
            nodes: vec![node],
            ..Default::default()
        });
        root.scene = Some(scene);
        assert!(validate_references(&root).is_empty());
    }

    #[test]
    fn test_reports_each_dangling_reference() {
        let mut root = Root::new();
        root.scene = Some(root.reference(0));
        let node = Node {
            mesh: Some(root.reference(3)),
            children: vec![root.reference(7)],
            ..Default::default()
        };
        root.push(node);

        let errors = validate_references(&root);
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors[0],
            ReferenceError::OutOfRange {
                kind: EntityKind::Scene,
                index: 0,
                len: 0
            }
        );
        assert!(errors.iter().any(|e| matches!(
            e,
            ReferenceError::OutOfRange {
                kind: EntityKind::Mesh,
                index: 3,
                ..
            }
        )));
    }

    #[test]
    fn test_foreign_reference() {
        let other = Root::new();
        let mut root = Root::new();
        let view = BufferView::new(other.reference(0), 4);
        root.push(view);
        assert_eq!(
            validate_references(&root),
            vec![ReferenceError::ForeignRoot {
                kind: EntityKind::Buffer,
                index: 0
            }]
        );
    }

    #[test]
    fn test_channel_sampler_range() {
        let mut root = Root::new();
        root.push(Animation {
            channels: vec![Channel {
                sampler: 1,
                target: Target {
                    node: None,
                    path: TargetPath::Weights,
                    base: Property::default(),
                },
                base: Property::default(),
            }],
            ..Default::default()
        });
        assert_eq!(
            validate_references(&root),
            vec![ReferenceError::SamplerOutOfRange {
                animation: 0,
                sampler: 1,
                len: 0
            }]
        );
    }
}
