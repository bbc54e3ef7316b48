//! Game events

use crate::transitions::RequestToken;

/// Events emitted by the runtime and the session for hosts to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A scene load was started
    SceneLoadRequested { index: usize, token: RequestToken },
    /// A scene finished loading and is now active
    SceneLoaded { index: usize, name: String },
    /// A scene failed to load; the previous scene stays active
    SceneLoadFailed { index: usize, reason: String },
    /// A transition request arrived while another load was in flight
    TransitionRejected,
    /// A completion arrived for a superseded request and was dropped
    StaleLoadDiscarded { token: RequestToken },
    /// The character was placed after a scene load
    SpawnResolved { position: [f32; 3], unstuck: bool },
    /// No obstacle-free spawn was found; the character did not move
    SpawnUnresolved { scene: String },
    /// The character switched between idle and walking
    MotionChanged { walking: bool },
}
