//! Crossfade weight between two clips

/// A weight that ramps linearly toward 0.0 (first clip) or 1.0 (second clip).
///
/// A zero duration switches instantly.
#[derive(Debug, Clone, Copy)]
pub struct Crossfade {
    weight: f32,
    target: f32,
    duration: f32,
}

impl Crossfade {
    pub fn new(duration: f32) -> Self {
        Self {
            weight: 0.0,
            target: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Fade toward the second clip (`true`) or the first (`false`)
    pub fn set_target(&mut self, second: bool) {
        self.target = if second { 1.0 } else { 0.0 };
        if self.duration <= 0.0 {
            self.weight = self.target;
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.weight = self.target;
            return;
        }
        let step = dt / self.duration;
        if self.weight < self.target {
            self.weight = (self.weight + step).min(self.target);
        } else {
            self.weight = (self.weight - step).max(self.target);
        }
    }

    /// Weight of the second clip in [0, 1]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn is_settled(&self) -> bool {
        (self.weight - self.target).abs() < f32::EPSILON
    }
}
