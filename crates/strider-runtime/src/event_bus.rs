//! Bounded FIFO of [`GameEvent`]s

use crate::event::GameEvent;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 256;

/// Events queue up until the host drains them. Past `capacity` the oldest
/// are dropped, so a host that never drains does not grow without bound.
#[derive(Debug)]
pub struct EventBus {
    queue: VecDeque<GameEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
            self.dropped += 1;
            if self.dropped == 1 {
                log::warn!("Event queue full ({}), dropping oldest events", self.capacity);
            }
        }
        log::debug!("event: {:?}", event);
        self.queue.push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Events discarded because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_push_order() {
        let mut bus = EventBus::new();
        bus.push(GameEvent::TransitionRejected);
        bus.push(GameEvent::MotionChanged { walking: true });

        assert_eq!(
            bus.drain(),
            vec![
                GameEvent::TransitionRejected,
                GameEvent::MotionChanged { walking: true }
            ]
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn full_queue_drops_oldest() {
        let mut bus = EventBus::with_capacity(2);
        bus.push(GameEvent::MotionChanged { walking: true });
        bus.push(GameEvent::MotionChanged { walking: false });
        bus.push(GameEvent::TransitionRejected);

        assert_eq!(bus.len(), 2);
        assert_eq!(bus.dropped(), 1);
        assert_eq!(bus.drain()[0], GameEvent::MotionChanged { walking: false });
    }
}
