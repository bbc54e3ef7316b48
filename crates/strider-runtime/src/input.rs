//! Keyboard state and action bindings

use std::collections::HashMap;
use strider_core::Vec2;
use winit::keyboard::KeyCode;

/// Everything the walking demo reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    NextScene,
    PreviousScene,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::MoveLeft,
        Action::MoveRight,
        Action::NextScene,
        Action::PreviousScene,
    ];

    fn default_keys(self) -> Vec<KeyCode> {
        match self {
            Action::MoveForward => vec![KeyCode::KeyW],
            Action::MoveBackward => vec![KeyCode::KeyS],
            Action::MoveLeft => vec![KeyCode::KeyA],
            Action::MoveRight => vec![KeyCode::KeyD],
            Action::NextScene => vec![KeyCode::BracketRight],
            Action::PreviousScene => vec![KeyCode::BracketLeft],
        }
    }
}

/// Held keys, keys pressed since the last `end_frame`, and the action map
#[derive(Debug, Clone)]
pub struct InputState {
    /// Held keys; `true` while the press is new this frame
    held: HashMap<KeyCode, bool>,
    bindings: HashMap<Action, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashMap::new(),
            bindings: Action::ALL
                .iter()
                .map(|&action| (action, action.default_keys()))
                .collect(),
        }
    }

    /// Replace the keys bound to `action`
    pub fn bind(&mut self, action: Action, keys: Vec<KeyCode>) {
        self.bindings.insert(action, keys);
    }

    pub fn process_key_down(&mut self, key: KeyCode) {
        // Key repeat keeps the original press
        self.held.entry(key).or_insert(true);
    }

    pub fn process_key_up(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Release every held key (focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Age this frame's presses. Call after the tick.
    pub fn end_frame(&mut self) {
        self.held.values_mut().for_each(|fresh| *fresh = false);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains_key(&key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }

    fn keys(&self, action: Action) -> &[KeyCode] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Any key bound to `action` is held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.keys(action).iter().any(|&k| self.is_key_down(k))
    }

    /// Any key bound to `action` went down this frame
    pub fn is_just_pressed(&self, action: Action) -> bool {
        self.keys(action).iter().any(|&k| self.is_key_just_pressed(k))
    }

    /// Raw movement input: x is strafe (A -1, D +1), y is the Z axis
    /// (W -1, S +1). Not normalized; opposing keys cancel.
    pub fn movement_vector(&self) -> Vec2 {
        let axis = |neg: Action, pos: Action| {
            self.is_pressed(pos) as i8 as f32 - self.is_pressed(neg) as i8 as f32
        };
        Vec2::new(
            axis(Action::MoveLeft, Action::MoveRight),
            axis(Action::MoveForward, Action::MoveBackward),
        )
    }
}

/// Key code for a movement letter, as typed in simulation scripts
pub fn key_for_char(c: char) -> Option<KeyCode> {
    match c.to_ascii_lowercase() {
        'w' => Some(KeyCode::KeyW),
        'a' => Some(KeyCode::KeyA),
        's' => Some(KeyCode::KeyS),
        'd' => Some(KeyCode::KeyD),
        _ => None,
    }
}
