//! Per-clip playback cursor

use crate::clip::AnimationClip;

/// Local time of one clip and whether it is running
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Seconds into the clip's own range
    pub time: f64,
    pub looping: bool,
    pub playing: bool,
}

impl PlaybackState {
    /// A looping cursor at time zero
    pub fn looping(playing: bool) -> Self {
        Self {
            time: 0.0,
            looping: true,
            playing,
        }
    }

    pub fn once() -> Self {
        Self {
            time: 0.0,
            looping: false,
            playing: true,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Halt and rewind to the clip start
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    /// Move the cursor `dt` seconds through `clip`; returns the source time.
    /// Looping cursors wrap, others stop on the last frame.
    pub fn advance(&mut self, clip: &AnimationClip, dt: f64) -> f64 {
        if self.playing {
            let t = self.time + dt;
            if clip.duration <= 0.0 {
                self.time = 0.0;
            } else if self.looping {
                self.time = t.rem_euclid(clip.duration);
            } else if t >= clip.duration {
                self.time = clip.duration;
                self.playing = false;
            } else {
                self.time = t.max(0.0);
            }
        }
        clip.source_time(self.time)
    }
}
