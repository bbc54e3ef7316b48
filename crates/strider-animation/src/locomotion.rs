//! Idle/walk animation state for the walking character

use crate::blend::Crossfade;
use crate::clip::AnimationClip;
use crate::player::PlaybackState;
use serde::{Deserialize, Serialize};
use strider_core::{Result, StriderError};
use strider_scene::ImportedClip;

/// Which imported clips drive idle and walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipNames {
    /// Walk clip name; the first clip of the asset when unset
    #[serde(default)]
    pub walk: Option<String>,
    /// Idle clip name; derived from the walk clip when unset or missing
    #[serde(default)]
    pub idle: Option<String>,
    /// End of the derived idle range within the walk clip, seconds
    #[serde(default = "default_idle_subclip_end")]
    pub idle_subclip_end: f64,
}

fn default_idle_subclip_end() -> f64 {
    1.0
}

impl Default for ClipNames {
    fn default() -> Self {
        Self {
            walk: None,
            idle: None,
            idle_subclip_end: default_idle_subclip_end(),
        }
    }
}

/// What the renderer needs to pose the character this frame
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPose {
    pub idle_clip: String,
    pub idle_time: f64,
    pub walk_clip: String,
    pub walk_time: f64,
    /// Weight of the walk clip; idle gets `1.0 - walk_weight`
    pub walk_weight: f32,
}

/// Two looping clips and a crossfade between them
#[derive(Debug, Clone)]
pub struct LocomotionAnimator {
    idle: AnimationClip,
    walk: AnimationClip,
    idle_state: PlaybackState,
    walk_state: PlaybackState,
    fade: Crossfade,
    walking: bool,
}

impl LocomotionAnimator {
    /// Starts idle, with the walk clip stopped.
    pub fn new(idle: AnimationClip, walk: AnimationClip, crossfade_seconds: f32) -> Self {
        Self {
            idle,
            walk,
            idle_state: PlaybackState::looping(true),
            walk_state: PlaybackState::looping(false),
            fade: Crossfade::new(crossfade_seconds),
            walking: false,
        }
    }

    /// Build from the clips of a character asset
    pub fn from_clips(
        clips: &[ImportedClip],
        names: &ClipNames,
        crossfade_seconds: f32,
    ) -> Result<Self> {
        let walk_src = match &names.walk {
            Some(name) => clips.iter().find(|c| &c.name == name),
            None => clips.first(),
        }
        .ok_or_else(|| {
            StriderError::AnimationError(format!(
                "walk clip {:?} not found among {} clips",
                names.walk,
                clips.len()
            ))
        })?;
        let walk = AnimationClip::from(walk_src);

        let idle = names
            .idle
            .as_ref()
            .and_then(|name| clips.iter().find(|c| &c.name == name))
            .map(AnimationClip::from)
            .unwrap_or_else(|| {
                log::debug!(
                    "No idle clip, using 0-{}s of '{}'",
                    names.idle_subclip_end,
                    walk.name
                );
                walk.subclip("idle", 0.0, names.idle_subclip_end)
            });

        Ok(Self::new(idle, walk, crossfade_seconds))
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Switch between idle and walk; repeated calls with the same value are no-ops
    pub fn set_walking(&mut self, walking: bool) {
        if walking == self.walking {
            return;
        }
        self.walking = walking;
        self.fade.set_target(walking);
        if walking {
            self.walk_state.play();
        } else {
            self.idle_state.play();
        }
    }

    /// Advance clip times and the crossfade by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        self.fade.advance(dt as f32);
        self.idle_state.advance(&self.idle, dt);
        self.walk_state.advance(&self.walk, dt);

        // Once faded out, the outgoing clip is stopped and rewound
        if self.fade.is_settled() {
            if self.walking {
                self.idle_state.stop();
            } else {
                self.walk_state.stop();
            }
        }
    }

    pub fn pose(&self) -> AnimationPose {
        AnimationPose {
            idle_clip: self.idle.source.clone(),
            idle_time: self.idle.source_time(self.idle_state.time),
            walk_clip: self.walk.source.clone(),
            walk_time: self.walk.source_time(self.walk_state.time),
            walk_weight: self.fade.weight(),
        }
    }
}

impl Default for LocomotionAnimator {
    /// One-second placeholder clips, used before a character asset is loaded
    fn default() -> Self {
        let walk = AnimationClip::new("walk", 1.0);
        let idle = walk.subclip("idle", 0.0, 1.0);
        Self::new(idle, walk, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clips() -> Vec<ImportedClip> {
        vec![ImportedClip {
            name: "mixamo.com".into(),
            duration: 2.5,
        }]
    }

    #[test]
    fn idle_is_derived_from_walk() {
        let anim = LocomotionAnimator::from_clips(&clips(), &ClipNames::default(), 0.0).unwrap();
        let pose = anim.pose();
        assert_eq!(pose.walk_clip, "mixamo.com");
        assert_eq!(pose.idle_clip, "mixamo.com");
        assert_eq!(pose.walk_weight, 0.0);
    }

    #[test]
    fn missing_walk_clip_is_an_error() {
        let names = ClipNames {
            walk: Some("run".into()),
            ..ClipNames::default()
        };
        assert!(LocomotionAnimator::from_clips(&clips(), &names, 0.0).is_err());
        assert!(LocomotionAnimator::from_clips(&[], &ClipNames::default(), 0.0).is_err());
    }

    #[test]
    fn hard_switch_stops_outgoing_clip() {
        let mut anim = LocomotionAnimator::from_clips(&clips(), &ClipNames::default(), 0.0).unwrap();
        anim.advance(0.4);
        anim.set_walking(true);
        anim.advance(0.3);

        let pose = anim.pose();
        assert_eq!(pose.walk_weight, 1.0);
        assert!((pose.walk_time - 0.3).abs() < 1e-9);
        assert_eq!(pose.idle_time, 0.0);
    }

    #[test]
    fn idle_loops_within_subclip() {
        let mut anim = LocomotionAnimator::from_clips(&clips(), &ClipNames::default(), 0.0).unwrap();
        anim.advance(1.25);
        assert!((anim.pose().idle_time - 0.25).abs() < 1e-9);
    }

    #[test]
    fn crossfade_keeps_both_clips_running() {
        let mut anim = LocomotionAnimator::from_clips(&clips(), &ClipNames::default(), 0.2).unwrap();
        anim.set_walking(true);
        anim.advance(0.1);
        let pose = anim.pose();
        assert!((pose.walk_weight - 0.5).abs() < 1e-5);
        assert!(pose.idle_time > 0.0);
        assert!(pose.walk_time > 0.0);
    }
}
