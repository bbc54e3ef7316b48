//! Strider Locomotion - keeps a walking character on arbitrary imported terrain
//!
//! Imported geometry carries no semantic tags, so every loaded scene is first
//! split into walkable ground and lateral obstacles by a name and shape
//! heuristic. Each frame the character is projected onto the ground and its
//! horizontal step is checked against the obstacles with axis-aligned
//! sliding.
//!
//! - [`classify`] / [`classify_scene`] - mesh classification
//! - [`GroundSampler`] - containment search with a downward ray fallback
//! - [`ObstacleResolver`] - footprint overlap and sliding
//! - [`place_character`] / [`unstick`] - spawn placement after a scene load
//! - [`LocomotionState`] - the per-frame tick

pub mod camera;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod ground;
pub mod obstacle;
pub mod spawn;
pub mod world;

pub use camera::{CameraFollow, CameraSettings};
pub use classifier::{
    classify, classify_scene, classify_with, Classification, ClassifiedMeshes,
    ClassifierThresholds,
};
pub use config::LocomotionConfig;
pub use controller::{Character, LocomotionState, MotionState, TickReport};
pub use ground::{GroundSampler, GroundSettings};
pub use obstacle::{footprint_at, MoveOutcome, ObstacleResolver, StepKind};
pub use spawn::{place_character, unstick, Placement, SpawnResult, SpawnSettings};
pub use world::WalkableWorld;
