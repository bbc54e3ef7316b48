//! Ground height sampling
//!
//! Two strategies: a bounding-box containment search over the ground meshes,
//! and a downward ray cast. [`GroundSampler::sample`] tries containment first
//! and falls back to the ray.

use serde::{Deserialize, Serialize};
use strider_core::{NodeId, Ray, Vec3};
use strider_scene::SceneGraph;

/// Tuning for ground sampling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSettings {
    /// Grows each ground mesh's XZ rectangle on every side
    pub padding: f32,
    /// Surfaces up to this far above the query height still count as below it
    pub below_threshold: f32,
    /// Height the downward ray starts from
    pub ray_origin_y: f32,
}

impl Default for GroundSettings {
    fn default() -> Self {
        Self {
            padding: 0.2,
            below_threshold: 1.0,
            ray_origin_y: 20.0,
        }
    }
}

/// Ground queries over one scene's ground meshes
pub struct GroundSampler<'a> {
    scene: &'a SceneGraph,
    ground: &'a [NodeId],
    settings: GroundSettings,
}

impl<'a> GroundSampler<'a> {
    pub fn new(scene: &'a SceneGraph, ground: &'a [NodeId], settings: GroundSettings) -> Self {
        Self {
            scene,
            ground,
            settings,
        }
    }

    /// Top Y of the ground mesh supporting (x, z).
    ///
    /// Among meshes whose padded XZ rectangle contains the point, the highest
    /// top at or below `query_y + below_threshold` wins. When every containing
    /// mesh is above that, the largest-area one is used regardless of height.
    pub fn ground_top_under(&self, x: f32, z: f32, query_y: f32) -> Option<f32> {
        let limit = query_y + self.settings.below_threshold;
        let mut best_below: Option<f32> = None;
        let mut largest: Option<(f32, f32)> = None;

        for &id in self.ground {
            let Some(mesh) = self.scene.mesh(id) else {
                continue;
            };
            let bounds = mesh.world_bounds();
            if !bounds.contains_xz_padded(x, z, self.settings.padding) {
                continue;
            }

            let top = bounds.top();
            if top <= limit && best_below.map_or(true, |best| top > best) {
                best_below = Some(top);
            }

            let area = bounds.xz_area();
            if largest.map_or(true, |(a, _)| area > a) {
                largest = Some((area, top));
            }
        }

        best_below.or(largest.map(|(_, top)| top))
    }

    /// Highest hit of a ray cast straight down from `(x, ray_origin_y, z)`.
    ///
    /// Casts against the ground meshes, or the whole scene when there are none.
    pub fn ground_y_by_ray(&self, x: f32, z: f32) -> Option<f32> {
        let ray = Ray::down(Vec3::new(x, self.settings.ray_origin_y, z));
        let candidates = (!self.ground.is_empty()).then_some(self.ground);

        self.scene
            .cast_ray(&ray, f32::INFINITY, candidates)
            .iter()
            .map(|hit| hit.point.y)
            .reduce(f32::max)
    }

    /// Ground height at (x, z): containment, then ray cast. `None` means the
    /// character should not be moved vertically.
    pub fn sample(&self, x: f32, z: f32, query_y: f32) -> Option<f32> {
        self.ground_top_under(x, z, query_y)
            .or_else(|| self.ground_y_by_ray(x, z))
    }
}
