//! Typed references into a root's entity arrays.
//!
//! An [`Id<T>`] is an array index plus the identity of the [`Root`] that
//! owns the array. Constructing one never validates it; the lookup happens
//! when the reference is dereferenced, so forward references are safe no
//! matter how the arrays are ordered in the source document.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, Serializer};

use crate::errors::ReferenceError;
use crate::root::Root;

/// Process-unique identity of a [`Root`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(u64);

impl RootId {
    /// A fresh identity, distinct from every other in this process.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The top-level array kinds a reference can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Accessor,
    Animation,
    Buffer,
    BufferView,
    Camera,
    Image,
    Material,
    Mesh,
    Node,
    Sampler,
    Scene,
    Skin,
    Texture,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Accessor,
        EntityKind::Animation,
        EntityKind::Buffer,
        EntityKind::BufferView,
        EntityKind::Camera,
        EntityKind::Image,
        EntityKind::Material,
        EntityKind::Mesh,
        EntityKind::Node,
        EntityKind::Sampler,
        EntityKind::Scene,
        EntityKind::Skin,
        EntityKind::Texture,
    ];

    /// Property name of the array on the root object.
    pub fn array_name(self) -> &'static str {
        match self {
            EntityKind::Accessor => "accessors",
            EntityKind::Animation => "animations",
            EntityKind::Buffer => "buffers",
            EntityKind::BufferView => "bufferViews",
            EntityKind::Camera => "cameras",
            EntityKind::Image => "images",
            EntityKind::Material => "materials",
            EntityKind::Mesh => "meshes",
            EntityKind::Node => "nodes",
            EntityKind::Sampler => "samplers",
            EntityKind::Scene => "scenes",
            EntityKind::Skin => "skins",
            EntityKind::Texture => "textures",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.array_name())
    }
}

/// An entity stored in one of the root's top-level arrays.
pub trait Entity: Sized {
    const KIND: EntityKind;

    fn array(root: &Root) -> &Vec<Self>;

    fn array_mut(root: &mut Root) -> &mut Vec<Self>;
}

/// A typed, lazily resolved reference to an entity of kind `T`.
pub struct Id<T> {
    index: u32,
    root: RootId,
    marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Create a reference without validating it.
    pub fn new(index: u32, root: RootId) -> Self {
        Self {
            index,
            root,
            marker: PhantomData,
        }
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn root(self) -> RootId {
        self.root
    }
}

impl<T: Entity> Id<T> {
    /// Look the entity up in `root`.
    pub fn get(self, root: &Root) -> Result<&T, ReferenceError> {
        self.check_root(root)?;
        let array = T::array(root);
        array
            .get(self.index as usize)
            .ok_or(ReferenceError::OutOfRange {
                kind: T::KIND,
                index: self.index,
                len: array.len(),
            })
    }

    pub fn get_mut(self, root: &mut Root) -> Result<&mut T, ReferenceError> {
        self.check_root(root)?;
        let array = T::array_mut(root);
        let len = array.len();
        array
            .get_mut(self.index as usize)
            .ok_or(ReferenceError::OutOfRange {
                kind: T::KIND,
                index: self.index,
                len,
            })
    }

    /// Whether the reference resolves in `root`.
    pub fn is_valid(self, root: &Root) -> bool {
        self.get(root).is_ok()
    }

    fn check_root(self, root: &Root) -> Result<(), ReferenceError> {
        if self.root == root.id() {
            Ok(())
        } else {
            Err(ReferenceError::ForeignRoot {
                kind: T::KIND,
                index: self.index,
            })
        }
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.root == other.root
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.root.hash(state);
    }
}

impl<T: Entity> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", T::KIND, self.index)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Accessor, ComponentType, ElementType};

    fn root_with_accessors(n: u32) -> Root {
        let mut root = Root::new();
        for _ in 0..n {
            root.push(Accessor::new(ComponentType::F32, ElementType::Vec3, 3));
        }
        root
    }

    #[test]
    fn test_last_index_resolves() {
        let root = root_with_accessors(3);
        let id: Id<Accessor> = root.reference(2);
        assert!(id.get(&root).is_ok());
    }

    #[test]
    fn test_index_past_end_fails() {
        let root = root_with_accessors(3);
        let id: Id<Accessor> = root.reference(3);
        assert_eq!(
            id.get(&root).unwrap_err(),
            ReferenceError::OutOfRange {
                kind: EntityKind::Accessor,
                index: 3,
                len: 3,
            }
        );
    }

    #[test]
    fn test_foreign_root_fails() {
        let a = root_with_accessors(1);
        let b = root_with_accessors(1);
        let id: Id<Accessor> = a.reference(0);
        assert!(matches!(
            id.get(&b),
            Err(ReferenceError::ForeignRoot { index: 0, .. })
        ));
    }

    #[test]
    fn test_equality_is_root_scoped() {
        let a = Root::new();
        let b = Root::new();
        let x: Id<Accessor> = a.reference(0);
        let y: Id<Accessor> = a.reference(0);
        let z: Id<Accessor> = b.reference(0);
        assert_eq!(x, y);
        assert_ne!(x, z);
    }

    #[test]
    fn test_serializes_as_index() {
        let root = Root::new();
        let id: Id<Accessor> = root.reference(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        assert_eq!(format!("{:?}", id), "accessors[7]");
    }
}
