//! glTF 2.0 schema entities.
//!
//! Each type knows its own defaults and serializes only the fields that
//! differ from them, plus whatever its [`Property`](crate::Property) base
//! preserved from the source document.

mod accessor;
mod animation;
mod asset;
mod buffer;
mod camera;
mod material;
mod mesh;
mod node;
mod texture;

pub use accessor::{Accessor, ComponentType, ElementType, Sparse, SparseIndices, SparseValues};
pub use animation::{Animation, AnimationSampler, Channel, Interpolation, Target, TargetPath};
pub use asset::Asset;
pub use buffer::{Buffer, BufferTarget, BufferView};
pub use camera::{Camera, Orthographic, Perspective, Projection};
pub use material::{
    AlphaMode, Material, NormalTextureInfo, OcclusionTextureInfo, PbrMetallicRoughness,
    TextureInfo, DEFAULT_ALPHA_CUTOFF,
};
pub use mesh::{Attributes, Mesh, Mode, MorphTarget, Primitive};
pub use node::{Node, Scene, Skin};
pub use texture::{Image, MagFilter, MinFilter, Sampler, Texture, WrapMode};
