//! glTF/GLB import
//!
//! Walks the default scene, composing node transforms, and produces one
//! `MeshNode` per mesh-bearing node with local bounds and triangles.

use crate::graph::SceneGraph;
use crate::node::{GroupNode, MeshNode, SceneNode};
use std::path::Path;
use strider_core::{Aabb, Mat4, Result, StriderError, Vec3};

/// An animation clip found in a character asset
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedClip {
    pub name: String,
    /// Length in seconds
    pub duration: f32,
}

/// A character model: its clips and rest-pose bounds
#[derive(Debug, Clone)]
pub struct CharacterAsset {
    pub name: String,
    pub bounds: Option<Aabb>,
    pub clips: Vec<ImportedClip>,
}

/// Import a glTF or GLB file as a scene graph
pub fn import_gltf<P: AsRef<Path>>(path: P) -> Result<SceneGraph> {
    let path = path.as_ref();
    let (document, buffers, _images) =
        gltf::import(path).map_err(|e| StriderError::asset_load(path.display().to_string(), e))?;

    let mut graph = SceneGraph::new(file_stem(path));

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| StriderError::asset_load(path.display().to_string(), "no scenes"))?;

    for node in scene.nodes() {
        visit_node(&node, Mat4::IDENTITY, &buffers, &mut graph);
    }

    log::debug!(
        "Imported '{}': {} nodes, {} renderable",
        path.display(),
        graph.len(),
        graph.renderable_ids().len()
    );

    Ok(graph)
}

/// Import a character model, reading its clip names and durations
pub fn import_character<P: AsRef<Path>>(path: P) -> Result<CharacterAsset> {
    let path = path.as_ref();
    let graph = import_gltf(path)?;
    let document = gltf::Gltf::open(path)
        .map_err(|e| StriderError::asset_load(path.display().to_string(), e))?;

    let clips = document
        .animations()
        .map(|anim| ImportedClip {
            name: anim
                .name()
                .map(String::from)
                .unwrap_or_else(|| format!("clip_{}", anim.index())),
            duration: anim
                .channels()
                .filter_map(|channel| channel.sampler().input().max())
                .filter_map(|max| accessor_scalar(&max))
                .fold(0.0, f32::max),
        })
        .collect();

    let bounds = graph
        .iter()
        .filter_map(|(_, node)| node.world_bounds())
        .reduce(|a, b| a.union(&b));

    Ok(CharacterAsset {
        name: graph.name,
        bounds,
        clips,
    })
}

fn visit_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    graph: &mut SceneGraph,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    match node.mesh() {
        Some(mesh) => {
            let name = node
                .name()
                .or_else(|| mesh.name())
                .map(String::from)
                .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

            let mut bounds: Option<Aabb> = None;
            let mut triangles = Vec::new();

            for primitive in mesh.primitives() {
                let bb = primitive.bounding_box();
                let prim_bounds =
                    Aabb::from_min_max(Vec3::from_array(bb.min), Vec3::from_array(bb.max));
                bounds = Some(match bounds {
                    Some(b) => b.union(&prim_bounds),
                    None => prim_bounds,
                });

                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    continue;
                }

                let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
                let positions: Vec<Vec3> = reader
                    .read_positions()
                    .map(|iter| iter.map(Vec3::from_array).collect())
                    .unwrap_or_default();
                let indices: Vec<u32> = reader
                    .read_indices()
                    .map(|iter| iter.into_u32().collect())
                    .unwrap_or_else(|| (0..positions.len() as u32).collect());

                for tri in indices.chunks_exact(3) {
                    let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
                    if let (Some(pa), Some(pb), Some(pc)) =
                        (positions.get(a), positions.get(b), positions.get(c))
                    {
                        triangles.push([*pa, *pb, *pc]);
                    }
                }
            }

            if let Some(local_bounds) = bounds {
                graph.add_mesh(MeshNode {
                    name,
                    visible: true,
                    local_bounds,
                    transform: world,
                    triangles,
                });
            }
        }
        None => {
            graph.add(SceneNode::Group(GroupNode {
                name: node
                    .name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("node_{}", node.index())),
                transform: world,
            }));
        }
    }

    for child in node.children() {
        visit_node(&child, world, buffers, graph);
    }
}

/// Accessor min/max values are JSON arrays; time inputs have one component.
fn accessor_scalar(value: &serde_json::Value) -> Option<f32> {
    value
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_scalar_reads_first_component() {
        let v = serde_json::json!([1.25]);
        assert_eq!(accessor_scalar(&v), Some(1.25));
        assert_eq!(accessor_scalar(&serde_json::json!("x")), None);
    }

    #[test]
    fn missing_file_is_asset_failure() {
        let err = import_gltf("/nonexistent/scene.gltf").unwrap_err();
        assert!(matches!(err, StriderError::AssetLoad { .. }));
    }
}
