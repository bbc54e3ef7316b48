//! Frame clock

use instant::Instant;

/// Longest frame delta handed to the simulation, in seconds
const MAX_DELTA: f64 = 0.25;

/// Frame counter with a clamped per-frame delta
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    frame: u64,
    elapsed: f64,
    delta: f64,
    /// Wall-clock time of the previous `tick`; `None` until the first one
    last: Option<Instant>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from wall-clock time. The first call yields a zero delta.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = self
            .last
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last = Some(now);
        self.advance(dt);
    }

    /// Advance by an explicit delta (headless runs and tests)
    pub fn advance(&mut self, dt: f64) {
        self.delta = dt.clamp(0.0, MAX_DELTA);
        self.elapsed += self.delta;
        self.frame += 1;
    }

    /// Seconds covered by the current frame
    pub fn delta_time(&self) -> f64 {
        self.delta
    }

    /// Sum of all clamped deltas
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_no_delta() {
        let mut clock = GameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time(), 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn advance_accumulates() {
        let mut clock = GameClock::new();
        clock.advance(1.0 / 60.0);
        clock.advance(1.0 / 60.0);
        assert!((clock.elapsed() - 2.0 / 60.0).abs() < 1e-12);
        assert!((clock.delta_time() - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut clock = GameClock::new();
        clock.advance(3.0);
        assert_eq!(clock.delta_time(), 0.25);
        clock.advance(-1.0);
        assert_eq!(clock.delta_time(), 0.0);
        assert!((clock.elapsed() - 0.25).abs() < 1e-12);
    }
}
