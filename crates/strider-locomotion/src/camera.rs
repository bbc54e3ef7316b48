//! Third-person camera follow

use serde::{Deserialize, Serialize};
use strider_core::{Vec2, Vec3};

/// Camera follow tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Fraction of the remaining distance covered per tick. Not scaled by
    /// frame time, so follow speed depends on frame rate.
    pub follow_lerp: f32,
    /// Look-at height above the character's origin
    pub target_height: f32,
    /// Eye position relative to the look-at target
    pub eye_offset: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow_lerp: 0.12,
            target_height: 0.75,
            eye_offset: [2.0, 1.25, 2.0],
        }
    }
}

/// Orbit-style camera that trails the character
#[derive(Debug, Clone)]
pub struct CameraFollow {
    pub target: Vec3,
    pub eye: Vec3,
    settings: CameraSettings,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraFollow {
    pub fn new(settings: CameraSettings) -> Self {
        let target = Vec3::new(0.0, settings.target_height, 0.0);
        Self {
            target,
            eye: target + Vec3::from(settings.eye_offset),
            settings,
        }
    }

    /// View direction flattened onto the ground plane
    pub fn forward_xz(&self) -> Vec3 {
        let look = self.target - self.eye;
        Vec3::new(look.x, 0.0, look.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn right_xz(&self) -> Vec3 {
        self.forward_xz().cross(Vec3::Y)
    }

    /// World movement direction for a raw input vector (x: strafe, y: -forward).
    /// `None` when there is no input.
    pub fn movement_direction(&self, input: Vec2) -> Option<Vec3> {
        if input == Vec2::ZERO {
            return None;
        }
        (self.forward_xz() * -input.y + self.right_xz() * input.x).try_normalize()
    }

    /// Move the target a fixed fraction toward the character; the eye keeps
    /// its offset from the target.
    pub fn follow(&mut self, character: Vec3) {
        let desired = character + Vec3::new(0.0, self.settings.target_height, 0.0);
        let delta = (desired - self.target) * self.settings.follow_lerp;
        self.target += delta;
        self.eye += delta;
    }

    /// Jump straight to the character, keeping the current eye offset
    pub fn snap_to(&mut self, character: Vec3) {
        let offset = self.eye - self.target;
        self.target = character + Vec3::new(0.0, self.settings.target_height, 0.0);
        self.eye = self.target + offset;
    }
}
