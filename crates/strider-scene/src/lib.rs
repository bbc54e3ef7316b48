//! Strider Scene - scene graph and scene sources
//!
//! A loaded scene is a flat list of typed nodes whose world transforms are
//! already composed. Meshes expose their live world-space bounds and can be
//! ray-cast against, which is all the locomotion core needs from a scene.

mod catalog;
mod format;
mod gltf_import;
mod graph;
mod loader;
mod node;

pub use catalog::SceneDescriptor;
pub use format::{MeshDef, SceneFile, SceneMetadata};
pub use gltf_import::{import_character, import_gltf, CharacterAsset, ImportedClip};
pub use graph::SceneGraph;
pub use loader::{load_scene, load_scene_string};
pub use node::{GroupNode, MeshNode, SceneNode};
