//! Locomotion tuning

use crate::camera::CameraSettings;
use crate::classifier::ClassifierThresholds;
use crate::ground::GroundSettings;
use crate::spawn::SpawnSettings;
use serde::{Deserialize, Serialize};

/// Everything the locomotion core can be tuned with; the `[locomotion]`
/// table of `strider.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Walk speed in units per second
    pub speed: f32,
    /// Orientation slerp rate per second
    pub rotation_speed: f32,
    /// Added above the sampled ground height
    pub foot_offset: f32,
    /// Collision box size (x, y, z)
    pub footprint: [f32; 3],
    /// Idle/walk crossfade in seconds; 0 switches instantly
    pub crossfade_seconds: f32,
    pub camera: CameraSettings,
    pub ground: GroundSettings,
    pub spawn: SpawnSettings,
    pub classifier: ClassifierThresholds,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            rotation_speed: 4.0,
            foot_offset: 0.0,
            footprint: [0.45, 1.0, 0.45],
            crossfade_seconds: 0.0,
            camera: CameraSettings::default(),
            ground: GroundSettings::default(),
            spawn: SpawnSettings::default(),
            classifier: ClassifierThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let cfg: LocomotionConfig = toml::from_str(
            r#"
speed = 2.5

[ground]
padding = 0.1

[camera]
follow_lerp = 0.2
"#,
        )
        .unwrap();

        assert_eq!(cfg.speed, 2.5);
        assert_eq!(cfg.rotation_speed, 4.0);
        assert_eq!(cfg.ground.padding, 0.1);
        assert_eq!(cfg.ground.ray_origin_y, 20.0);
        assert_eq!(cfg.camera.follow_lerp, 0.2);
        assert_eq!(cfg.camera.target_height, 0.75);
        assert_eq!(cfg.spawn.grid, 9);
        assert_eq!(cfg.classifier, ClassifierThresholds::default());
    }

    #[test]
    fn empty_table_is_default() {
        let cfg: LocomotionConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, LocomotionConfig::default());
    }
}
