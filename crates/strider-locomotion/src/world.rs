//! The walkable view of a loaded scene

use crate::classifier::{classify_scene, ClassifiedMeshes};
use crate::config::LocomotionConfig;
use crate::ground::{GroundSampler, GroundSettings};
use crate::obstacle::ObstacleResolver;
use strider_core::Vec3;
use strider_scene::SceneGraph;

/// A loaded scene with its classified mesh lists and vertical corrections
#[derive(Debug, Clone)]
pub struct WalkableWorld {
    pub scene: SceneGraph,
    pub classified: ClassifiedMeshes,
    /// Per-scene correction for assets whose origin sits off the floor
    pub ground_y_offset: f32,
    foot_offset: f32,
    footprint: Vec3,
    ground: GroundSettings,
}

impl WalkableWorld {
    /// Classify `scene` and wrap it for locomotion queries
    pub fn new(scene: SceneGraph, ground_y_offset: f32, config: &LocomotionConfig) -> Self {
        let classified = classify_scene(&scene, &config.classifier);
        Self {
            scene,
            classified,
            ground_y_offset,
            foot_offset: config.foot_offset,
            footprint: Vec3::from(config.footprint),
            ground: config.ground,
        }
    }

    pub fn sampler(&self) -> GroundSampler<'_> {
        GroundSampler::new(&self.scene, &self.classified.ground, self.ground)
    }

    pub fn resolver(&self) -> ObstacleResolver<'_> {
        ObstacleResolver::new(&self.scene, &self.classified.obstacles, self.footprint)
    }

    pub fn ground_settings(&self) -> GroundSettings {
        self.ground
    }

    /// Foot offset plus the scene's vertical correction
    pub fn vertical_correction(&self) -> f32 {
        self.foot_offset + self.ground_y_offset
    }

    /// Character Y standing on the ground at (x, z), if any ground resolves.
    ///
    /// `character_y` is the character's current Y; the correction is removed
    /// before it is used as the sampler's query height.
    pub fn standing_y(&self, x: f32, z: f32, character_y: f32) -> Option<f32> {
        let correction = self.vertical_correction();
        self.sampler()
            .sample(x, z, character_y - correction)
            .map(|ground| ground + correction)
    }

    /// `position` moved onto the ground, or unchanged when nothing resolves
    pub fn snap(&self, position: Vec3) -> Vec3 {
        match self.standing_y(position.x, position.z, position.y) {
            Some(y) => Vec3::new(position.x, y, position.z),
            None => position,
        }
    }

    pub fn is_blocked(&self, position: Vec3) -> bool {
        self.resolver().is_blocked(position)
    }

    pub fn has_ground(&self) -> bool {
        !self.classified.ground.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::Aabb;
    use strider_scene::MeshNode;

    #[test]
    fn ray_fallback_covers_scenes_without_ground() {
        let mut scene = SceneGraph::new("s");
        scene.add_mesh(MeshNode::from_bounds(
            "plinth",
            Aabb::from_min_max(Vec3::new(-5.0, -0.1, -5.0), Vec3::new(5.0, 0.5, 5.0)),
        ));
        let config = LocomotionConfig {
            foot_offset: 0.1,
            ..LocomotionConfig::default()
        };
        let world = WalkableWorld::new(scene, -0.25, &config);

        // Too tall to be ground, so only the whole-scene ray finds it
        assert!(!world.has_ground());
        let snapped = world.snap(Vec3::new(0.0, 3.0, 0.0));
        assert!((snapped.y - (0.5 + 0.1 - 0.25)).abs() < 1e-5);

        let outside = Vec3::new(20.0, 3.0, 20.0);
        assert_eq!(world.snap(outside), outside);
    }

    #[test]
    fn snap_lands_on_ground_with_correction() {
        let mut scene = SceneGraph::new("s");
        scene.add_mesh(MeshNode::from_bounds(
            "floor",
            Aabb::from_min_max(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.05, 5.0)),
        ));
        let config = LocomotionConfig {
            foot_offset: 0.1,
            ..LocomotionConfig::default()
        };
        let world = WalkableWorld::new(scene, -0.25, &config);

        let snapped = world.snap(Vec3::new(1.0, 7.0, 1.0));
        assert!((snapped.y - (0.05 + 0.1 - 0.25)).abs() < 1e-5);
        assert_eq!((snapped.x, snapped.z), (1.0, 1.0));
    }
}
