//! TOML scene file format

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a scene TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub scene: SceneMetadata,
    /// Meshes keyed by name; loaded in name order
    #[serde(default)]
    pub meshes: BTreeMap<String, MeshDef>,
    /// Names of non-renderable group nodes
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A box-shaped mesh: either `min`/`max` corners, or a `size` centred on
/// `position` in X/Z and resting on it in Y.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 3]>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// World-space triangles, nine floats each
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triangles: Vec<[f32; 9]>,
}

fn default_visible() -> bool {
    true
}

impl MeshDef {
    pub fn from_min_max(min: [f32; 3], max: [f32; 3]) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            visible: true,
            ..Default::default()
        }
    }
}

impl SceneFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: SceneMetadata {
                name: name.into(),
                description: None,
            },
            meshes: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn add_mesh(&mut self, name: impl Into<String>, mesh: MeshDef) {
        self.meshes.insert(name.into(), mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_file_serialization() {
        let mut scene = SceneFile::new("Comisaria");
        scene.add_mesh(
            "floor",
            MeshDef::from_min_max([-5.0, -0.05, -5.0], [5.0, 0.0, 5.0]),
        );

        let toml_str = toml::to_string_pretty(&scene).unwrap();
        assert!(toml_str.contains("Comisaria"));
        assert!(toml_str.contains("[meshes.floor]"));
    }

    #[test]
    fn scene_file_deserialization() {
        let toml_str = r#"
[scene]
name = "Forest"

[meshes.ground]
min = [-10, -0.1, -10]
max = [10, 0, 10]

[meshes.branch_01]
position = [2, 0, 2]
size = [2, 0.1, 2]
visible = false
"#;

        let scene: SceneFile = toml::from_str(toml_str).unwrap();
        assert_eq!(scene.scene.name, "Forest");
        assert_eq!(scene.meshes.len(), 2);
        assert!(scene.meshes["ground"].visible);
        assert!(!scene.meshes["branch_01"].visible);
        assert_eq!(scene.meshes["branch_01"].size, Some([2.0, 0.1, 2.0]));
    }
}
