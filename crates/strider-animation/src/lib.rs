//! Animation playback for the walking character
//!
//! The core only needs two clips, idle and walk, and a crossfade between
//! them. Pose evaluation and skinning belong to the renderer; this crate
//! tracks clip time and blend weights and hands them over as an
//! [`AnimationPose`].

pub mod blend;
pub mod clip;
pub mod locomotion;
pub mod player;

pub use blend::Crossfade;
pub use clip::AnimationClip;
pub use locomotion::{AnimationPose, ClipNames, LocomotionAnimator};
pub use player::PlaybackState;
