//! Obstacle overlap and axis-aligned sliding

use strider_core::{Aabb, NodeId, Vec3};
use strider_scene::SceneGraph;

/// Character collision box of `size` standing at `position`
pub fn footprint_at(position: Vec3, size: Vec3) -> Aabb {
    let half = size * 0.5;
    Aabb::from_center_half(position + Vec3::new(0.0, half.y, 0.0), half)
}

/// Which attempt produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Direct,
    /// Only the X component of the step
    SlideX,
    /// Only the Z component of the step
    SlideZ,
}

/// Result of resolving one horizontal step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Moved { position: Vec3, kind: StepKind },
    /// Every attempt was blocked; the character stays put
    Blocked,
}

impl MoveOutcome {
    pub fn position(&self) -> Option<Vec3> {
        match self {
            MoveOutcome::Moved { position, .. } => Some(*position),
            MoveOutcome::Blocked => None,
        }
    }
}

/// Footprint tests against one scene's obstacle meshes
pub struct ObstacleResolver<'a> {
    scene: &'a SceneGraph,
    obstacles: &'a [NodeId],
    footprint: Vec3,
}

impl<'a> ObstacleResolver<'a> {
    pub fn new(scene: &'a SceneGraph, obstacles: &'a [NodeId], footprint: Vec3) -> Self {
        Self {
            scene,
            obstacles,
            footprint,
        }
    }

    /// Does the footprint at `position` touch any obstacle's current bounds?
    pub fn is_blocked(&self, position: Vec3) -> bool {
        let footprint = footprint_at(position, self.footprint);
        self.obstacles.iter().any(|&id| {
            self.scene
                .mesh(id)
                .is_some_and(|mesh| footprint.intersects(&mesh.world_bounds()))
        })
    }

    /// Direct step, then X-only, then Z-only, in that order.
    pub fn step_attempts(current: Vec3, target: Vec3) -> [(StepKind, Vec3); 3] {
        [
            (StepKind::Direct, target),
            (StepKind::SlideX, Vec3::new(target.x, current.y, current.z)),
            (StepKind::SlideZ, Vec3::new(current.x, current.y, target.z)),
        ]
    }

    /// Resolve a step from `current` toward `target`.
    ///
    /// `resolve_y` gives the character Y at an (x, z) before its footprint is
    /// tested; `None` keeps the current Y.
    pub fn resolve<F>(&self, current: Vec3, target: Vec3, resolve_y: F) -> MoveOutcome
    where
        F: Fn(f32, f32) -> Option<f32>,
    {
        for (kind, attempt) in Self::step_attempts(current, target) {
            let y = resolve_y(attempt.x, attempt.z).unwrap_or(current.y);
            let position = Vec3::new(attempt.x, y, attempt.z);
            if !self.is_blocked(position) {
                return MoveOutcome::Moved { position, kind };
            }
        }
        MoveOutcome::Blocked
    }
}
