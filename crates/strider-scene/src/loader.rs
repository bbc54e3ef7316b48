//! Scene loading from TOML scene files or glTF assets

use crate::format::{MeshDef, SceneFile};
use crate::gltf_import::import_gltf;
use crate::graph::SceneGraph;
use crate::node::{GroupNode, MeshNode, SceneNode};
use std::fs;
use std::path::Path;
use strider_core::{Aabb, Mat4, Result, StriderError, Vec3};

/// Load a scene from disk, picking the format from the file extension
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneGraph> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "gltf" | "glb" => import_gltf(path),
        "toml" => {
            let content = fs::read_to_string(path)
                .map_err(|e| StriderError::asset_load(path.display().to_string(), e))?;
            load_scene_string(&content)
        }
        other => Err(StriderError::asset_load(
            path.display().to_string(),
            format!("unsupported scene format '{}'", other),
        )),
    }
}

/// Load a scene from a TOML string
pub fn load_scene_string(content: &str) -> Result<SceneGraph> {
    let scene_file: SceneFile = toml::from_str(content)?;
    let mut graph = SceneGraph::new(scene_file.scene.name.clone());

    for name in &scene_file.groups {
        graph.add(SceneNode::Group(GroupNode {
            name: name.clone(),
            transform: Mat4::IDENTITY,
        }));
    }

    for (name, def) in &scene_file.meshes {
        let bounds = mesh_bounds(name, def)?;
        let triangles = def
            .triangles
            .iter()
            .map(|t| {
                [
                    Vec3::new(t[0], t[1], t[2]),
                    Vec3::new(t[3], t[4], t[5]),
                    Vec3::new(t[6], t[7], t[8]),
                ]
            })
            .collect();

        graph.add_mesh(
            MeshNode::from_bounds(name.clone(), bounds)
                .with_visible(def.visible)
                .with_triangles(triangles),
        );
    }

    Ok(graph)
}

fn mesh_bounds(name: &str, def: &MeshDef) -> Result<Aabb> {
    match (def.min, def.max, def.size) {
        (Some(min), Some(max), _) => Ok(Aabb::from_min_max(
            Vec3::from_array(min),
            Vec3::from_array(max),
        )),
        (_, _, Some(size)) => {
            let pos = Vec3::from_array(def.position.unwrap_or([0.0; 3]));
            let size = Vec3::from_array(size);
            let half = Vec3::new(size.x * 0.5, 0.0, size.z * 0.5);
            Ok(Aabb::from_min_max(
                pos - half,
                pos + half + Vec3::new(0.0, size.y, 0.0),
            ))
        }
        _ => Err(StriderError::SceneError(format!(
            "mesh '{}' needs either min/max or size",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_scene_string_builds_meshes_and_groups() {
        let toml_str = r#"
groups = ["lights"]

[scene]
name = "Test Scene"

[meshes.floor]
min = [-5, -0.05, -5]
max = [5, 0, 5]

[meshes.crate]
position = [1, 0, 1]
size = [0.5, 0.5, 0.5]
"#;

        let graph = load_scene_string(toml_str).unwrap();
        assert_eq!(graph.name, "Test Scene");
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.renderable_ids().len(), 2);

        let crate_bounds = graph
            .iter()
            .find(|(_, n)| n.name() == "crate")
            .and_then(|(_, n)| n.world_bounds())
            .unwrap();
        assert!((crate_bounds.min.x - 0.75).abs() < 1e-5);
        assert!((crate_bounds.min.y - 0.0).abs() < 1e-5);
        assert!((crate_bounds.max.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn mesh_without_extent_is_an_error() {
        let toml_str = r#"
[scene]
name = "Broken"

[meshes.nothing]
position = [0, 0, 0]
"#;
        assert!(matches!(
            load_scene_string(toml_str),
            Err(StriderError::SceneError(_))
        ));
    }

    #[test]
    fn unknown_extension_is_asset_failure() {
        let err = load_scene("scene.fbx").unwrap_err();
        assert!(matches!(err, StriderError::AssetLoad { .. }));
    }
}
