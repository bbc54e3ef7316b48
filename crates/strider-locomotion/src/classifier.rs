//! Mesh classification into ground, obstacle, or ignored

use serde::{Deserialize, Serialize};
use strider_core::{Aabb, NodeId};
use strider_scene::{SceneGraph, SceneNode};

/// Names of thin or decorative structural parts, always obstacles
const OBSTACLE_KEYWORDS: &[&str] = &[
    "branch",
    "root",
    "stick",
    "platform",
    "wood",
    "trunk",
    "ladder",
    "rail",
    "decoration",
    "leaf",
    "leaves",
    "rama",
    "raiz",
    "raíz",
    "palo",
    "plataforma",
    "madera",
    "tronco",
    "escalera",
    "baranda",
    "decoracion",
    "decoración",
    "hoja",
];

/// Water surfaces are neither walked on nor collided with
const WATER_KEYWORDS: &[&str] = &["water", "ocean", "agua", "oceano", "océano"];

/// What a static mesh is to the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Ground,
    Obstacle,
    Ignored,
}

/// Shape thresholds for meshes whose name gives no hint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Slabs lower than this with `flat_min_area` or more are ground
    pub flat_max_height: f32,
    pub flat_min_area: f32,
    /// Anything at least this tall blocks
    pub tall_min_height: f32,
    /// Thin walls: thinner than this with more than `thin_min_area` footprint
    pub thin_max_thickness: f32,
    pub thin_min_area: f32,
    /// Wide low meshes are ground
    pub wide_min_area: f32,
    pub wide_max_height: f32,
    /// Smallest footprint still counted as ground
    pub min_ground_area: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            flat_max_height: 0.12,
            flat_min_area: 0.6,
            tall_min_height: 0.25,
            thin_max_thickness: 0.05,
            thin_min_area: 0.12,
            wide_min_area: 1.0,
            wide_max_height: 0.2,
            min_ground_area: 0.03,
        }
    }
}

/// Classify with the default thresholds
pub fn classify(name: &str, bounds: &Aabb) -> Classification {
    classify_with(name, bounds, &ClassifierThresholds::default())
}

/// Classify one mesh by name, then by world-space shape. First match wins.
pub fn classify_with(name: &str, bounds: &Aabb, t: &ClassifierThresholds) -> Classification {
    let lower = name.to_lowercase();
    if OBSTACLE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Classification::Obstacle;
    }
    if WATER_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Classification::Ignored;
    }

    let size = bounds.size();
    let height = size.y;
    let area = size.x * size.z;
    let thickness = size.x.min(size.z);

    if height < t.flat_max_height && area > t.flat_min_area {
        Classification::Ground
    } else if height >= t.tall_min_height {
        Classification::Obstacle
    } else if thickness < t.thin_max_thickness && area > t.thin_min_area {
        Classification::Obstacle
    } else if area > t.wide_min_area && height < t.wide_max_height {
        Classification::Ground
    } else if area > t.min_ground_area {
        Classification::Ground
    } else {
        Classification::Ignored
    }
}

/// Ground and obstacle mesh ids of one loaded scene, in scene order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedMeshes {
    pub ground: Vec<NodeId>,
    pub obstacles: Vec<NodeId>,
}

impl ClassifiedMeshes {
    pub fn clear(&mut self) {
        self.ground.clear();
        self.obstacles.clear();
    }
}

/// Classify every mesh of `scene`. Invisible meshes are ignored and
/// non-mesh nodes are skipped.
pub fn classify_scene(scene: &SceneGraph, thresholds: &ClassifierThresholds) -> ClassifiedMeshes {
    let mut out = ClassifiedMeshes::default();
    for (id, node) in scene.iter() {
        let SceneNode::Mesh(mesh) = node else {
            continue;
        };
        if !mesh.visible {
            continue;
        }
        match classify_with(&mesh.name, &mesh.world_bounds(), thresholds) {
            Classification::Ground => out.ground.push(id),
            Classification::Obstacle => out.obstacles.push(id),
            Classification::Ignored => {}
        }
    }

    log::debug!(
        "Classified '{}': {} ground, {} obstacles",
        scene.name,
        out.ground.len(),
        out.obstacles.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::Vec3;
    use strider_scene::{GroupNode, MeshNode};

    fn sized(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_min_max(Vec3::ZERO, Vec3::new(x, y, z))
    }

    #[test]
    fn keyword_overrides_shape() {
        assert_eq!(classify("branch_01", &sized(2.0, 0.1, 2.0)), Classification::Obstacle);
        assert_eq!(classify("Tronco_Grande", &sized(3.0, 0.05, 3.0)), Classification::Obstacle);
        assert_eq!(classify("RAÍZ", &sized(3.0, 0.05, 3.0)), Classification::Obstacle);
    }

    #[test]
    fn obstacle_keyword_wins_over_water() {
        assert_eq!(classify("water_platform", &sized(3.0, 0.05, 3.0)), Classification::Obstacle);
    }

    #[test]
    fn water_is_ignored() {
        assert_eq!(classify("Ocean_Plane", &sized(50.0, 0.0, 50.0)), Classification::Ignored);
        assert_eq!(classify("agua", &sized(5.0, 0.01, 5.0)), Classification::Ignored);
    }

    #[test]
    fn flat_floor_is_ground() {
        assert_eq!(classify("floor_tile", &sized(5.0, 0.05, 5.0)), Classification::Ground);
    }

    #[test]
    fn shape_rules_in_order() {
        // Tall
        assert_eq!(classify("crate", &sized(0.5, 0.25, 0.5)), Classification::Obstacle);
        // Thin wall below the tall threshold
        assert_eq!(classify("panel", &sized(0.04, 0.2, 4.0)), Classification::Obstacle);
        // Wide and low, but too tall for the flat rule
        assert_eq!(classify("rug", &sized(1.5, 0.15, 1.0)), Classification::Ground);
        // Small step
        assert_eq!(classify("step", &sized(0.3, 0.2, 0.3)), Classification::Ground);
        // Tiny clutter
        assert_eq!(classify("pebble", &sized(0.1, 0.1, 0.1)), Classification::Ignored);
    }

    #[test]
    fn classification_is_deterministic() {
        let cases = [
            ("floor", sized(4.0, 0.1, 4.0)),
            ("wall", sized(0.2, 3.0, 4.0)),
            ("stick", sized(0.05, 0.05, 1.0)),
            ("thing", sized(0.15, 0.15, 0.15)),
        ];
        for (name, bounds) in &cases {
            let first = classify(name, bounds);
            for _ in 0..10 {
                assert_eq!(classify(name, bounds), first);
            }
        }
    }

    #[test]
    fn custom_thresholds_apply() {
        let t = ClassifierThresholds {
            tall_min_height: 0.5,
            ..ClassifierThresholds::default()
        };
        assert_eq!(classify_with("box", &sized(0.5, 0.3, 0.5), &t), Classification::Ground);
    }

    #[test]
    fn scene_classification_skips_hidden_and_groups() {
        let mut scene = SceneGraph::new("test");
        scene.add(SceneNode::Group(GroupNode {
            name: "floor_group".into(),
            transform: strider_core::Mat4::IDENTITY,
        }));
        let floor = scene.add_mesh(MeshNode::from_bounds("floor", sized(10.0, 0.05, 10.0)));
        let wall = scene.add_mesh(MeshNode::from_bounds("wall", sized(0.2, 3.0, 10.0)));
        scene.add_mesh(MeshNode::from_bounds("hidden_floor", sized(10.0, 0.05, 10.0)).with_visible(false));

        let classified = classify_scene(&scene, &ClassifierThresholds::default());
        assert_eq!(classified.ground, vec![floor]);
        assert_eq!(classified.obstacles, vec![wall]);
    }
}
