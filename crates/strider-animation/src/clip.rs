//! Clip time ranges

use serde::{Deserialize, Serialize};
use strider_scene::ImportedClip;

/// A playable time range of a source clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Name of the imported clip this range plays from
    pub source: String,
    /// Start time within the source, in seconds
    pub start: f64,
    /// Playable length in seconds
    pub duration: f64,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            name,
            start: 0.0,
            duration,
        }
    }

    /// A named sub-range `[start, end)` of this clip, clamped to its length
    pub fn subclip(&self, name: impl Into<String>, start: f64, end: f64) -> Self {
        let start = start.clamp(0.0, self.duration);
        let end = end.clamp(start, self.duration);
        Self {
            name: name.into(),
            source: self.source.clone(),
            start: self.start + start,
            duration: end - start,
        }
    }

    /// Time within the source clip for a local playback time
    pub fn source_time(&self, local: f64) -> f64 {
        self.start + local
    }
}

impl From<&ImportedClip> for AnimationClip {
    fn from(clip: &ImportedClip) -> Self {
        Self::new(clip.name.clone(), clip.duration as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subclip_maps_into_source_time() {
        let walk = AnimationClip::new("walk", 2.4);
        let idle = walk.subclip("idle", 0.0, 1.0);
        assert_eq!(idle.source, "walk");
        assert!((idle.duration - 1.0).abs() < 1e-9);
        assert!((idle.source_time(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn subclip_is_clamped_to_clip_length() {
        let short = AnimationClip::new("walk", 0.6);
        let idle = short.subclip("idle", 0.0, 1.0);
        assert!((idle.duration - 0.6).abs() < 1e-9);
    }
}
