//! Strider Runtime - frame loop infrastructure
//!
//! Provides the building blocks around the per-frame locomotion tick:
//! - `GameClock` - frame delta time
//! - `InputState` - keyboard tracking with action bindings
//! - `GameEvent` / `EventBus` - typed event queue
//! - `SceneTransitions` - background scene loads guarded by a busy flag
//!   and request tokens

mod clock;
mod event;
mod event_bus;
mod input;
mod transitions;

pub use clock::GameClock;
pub use event::GameEvent;
pub use event_bus::EventBus;
pub use input::{key_for_char, Action, InputState};
pub use winit::keyboard::KeyCode;
pub use transitions::{
    AssetLoader, LoadCompletion, RequestToken, SceneAssetLoader, SceneTransitions,
    TransitionDirection,
};
