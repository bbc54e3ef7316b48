//! Session: one running walking-character demo
//!
//! Owns the clock, input, scene transitions, locomotion state and event
//! queue. Each frame drains finished scene loads, applies the current one
//! (classification, spawn placement, unstick), handles scene-switch keys and
//! runs the locomotion tick.

use crate::config::StriderConfig;
use std::sync::Arc;
use std::time::Duration;
use strider_animation::LocomotionAnimator;
use strider_core::{Result, StriderError};
use strider_locomotion::{LocomotionState, TickReport};
use strider_runtime::{
    Action, AssetLoader, EventBus, GameClock, GameEvent, InputState, LoadCompletion, RequestToken,
    SceneAssetLoader, SceneTransitions, TransitionDirection,
};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

pub struct Session {
    config: StriderConfig,
    clock: GameClock,
    input: InputState,
    transitions: SceneTransitions,
    locomotion: LocomotionState,
    events: EventBus,
}

impl Session {
    /// Session reading assets from disk, relative to `asset_root` when set
    pub fn new(config: StriderConfig) -> Self {
        let loader = match &config.asset_root {
            Some(root) => SceneAssetLoader::with_root(root),
            None => SceneAssetLoader::default(),
        };
        Self::with_loader(config, Arc::new(loader))
    }

    pub fn with_loader(config: StriderConfig, loader: Arc<dyn AssetLoader>) -> Self {
        let mut locomotion = LocomotionState::new(config.locomotion.clone());
        if let Some(animator) = load_animator(&config, loader.as_ref()) {
            locomotion.set_animator(animator);
        }

        Self {
            transitions: SceneTransitions::new(config.scenes.clone(), loader),
            clock: GameClock::new(),
            input: InputState::new(),
            locomotion,
            events: EventBus::new(),
            config,
        }
    }

    pub fn config(&self) -> &StriderConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn locomotion(&self) -> &LocomotionState {
        &self.locomotion
    }

    pub fn locomotion_mut(&mut self) -> &mut LocomotionState {
        &mut self.locomotion
    }

    pub fn transitions(&self) -> &SceneTransitions {
        &self.transitions
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn is_loading(&self) -> bool {
        self.transitions.is_loading()
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Start loading the scene at `index`
    pub fn load_scene(&mut self, index: usize) -> Result<RequestToken> {
        let token = self.transitions.request_index(index);
        self.record_request(token)
    }

    /// Next scene in the list, wrapping
    pub fn request_next_scene(&mut self) -> Result<RequestToken> {
        let token = self.transitions.request(TransitionDirection::Next);
        self.record_request(token)
    }

    /// Previous scene in the list, wrapping
    pub fn request_previous_scene(&mut self) -> Result<RequestToken> {
        let token = self.transitions.request(TransitionDirection::Previous);
        self.record_request(token)
    }

    fn record_request(&mut self, token: Result<RequestToken>) -> Result<RequestToken> {
        match token {
            Ok(token) => {
                let index = self.transitions.pending_index().unwrap_or_default();
                self.events
                    .push(GameEvent::SceneLoadRequested { index, token });
                Ok(token)
            }
            Err(e) => {
                if matches!(e, StriderError::TransitionRejected(_)) {
                    log::info!("{}", e);
                    self.events.push(GameEvent::TransitionRejected);
                }
                Err(e)
            }
        }
    }

    /// Abandon the load in flight; its result is dropped when it arrives
    pub fn cancel_load(&mut self) {
        self.transitions.cancel();
    }

    /// Host key events
    pub fn handle_key(&mut self, key: PhysicalKey, state: ElementState) {
        if let PhysicalKey::Code(code) = key {
            match state {
                ElementState::Pressed => self.input.process_key_down(code),
                ElementState::Released => self.input.process_key_up(code),
            }
        }
    }

    /// Feed a winit window event; keyboard and focus changes are consumed
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event.physical_key, event.state);
            }
            WindowEvent::Focused(false) => self.input.release_all(),
            _ => {}
        }
    }

    /// Run one frame using wall-clock time
    pub fn frame(&mut self) -> TickReport {
        self.clock.tick();
        self.run_frame()
    }

    /// Run one frame of `dt` seconds (headless runs)
    pub fn step(&mut self, dt: f64) -> TickReport {
        self.clock.advance(dt);
        self.run_frame()
    }

    /// Block until the scene load in flight finishes and apply it.
    /// Returns `false` on timeout or when nothing was loading.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        let completion = self.transitions.wait(timeout);
        self.report_stale();
        match completion {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    fn run_frame(&mut self) -> TickReport {
        self.poll_loads();

        // Rejections are logged and queued as events by `record_request`
        if self.input.is_just_pressed(Action::NextScene) {
            let _ = self.request_next_scene();
        } else if self.input.is_just_pressed(Action::PreviousScene) {
            let _ = self.request_previous_scene();
        }

        let report = self.locomotion.tick(&self.input, self.clock.delta_time());
        if report.motion_changed {
            self.events.push(GameEvent::MotionChanged {
                walking: self.locomotion.animator.is_walking(),
            });
        }

        self.input.end_frame();
        report
    }

    fn poll_loads(&mut self) {
        let (current, stale) = self.transitions.poll();
        for token in stale {
            self.events.push(GameEvent::StaleLoadDiscarded { token });
        }
        if let Some(completion) = current {
            self.apply_completion(completion);
        }
    }

    fn report_stale(&mut self) {
        for token in self.transitions.take_stale() {
            self.events.push(GameEvent::StaleLoadDiscarded { token });
        }
    }

    fn apply_completion(&mut self, completion: LoadCompletion) {
        let index = completion.index;
        let scene = match completion.result {
            Ok(scene) => scene,
            Err(e) => {
                self.events.push(GameEvent::SceneLoadFailed {
                    index,
                    reason: e.to_string(),
                });
                return;
            }
        };

        let (name, offset) = match self.transitions.scene(index) {
            Some(d) => (d.name.clone(), d.ground_y_offset),
            None => (scene.name.clone(), 0.0),
        };

        self.locomotion.unload_world();
        self.locomotion.load_world(scene, offset);
        self.events.push(GameEvent::SceneLoaded {
            index,
            name: name.clone(),
        });

        match self.locomotion.spawn() {
            Ok(spawn) => self.events.push(GameEvent::SpawnResolved {
                position: spawn.position.to_array(),
                unstuck: spawn.unstuck,
            }),
            Err(e) => {
                log::warn!("{}", e);
                self.events.push(GameEvent::SpawnUnresolved { scene: name });
            }
        }
    }
}

/// Load the character asset's clips. Failures fall back to placeholder clips.
fn load_animator(config: &StriderConfig, loader: &dyn AssetLoader) -> Option<LocomotionAnimator> {
    let path = config.character.as_deref()?;
    let crossfade = config.locomotion.crossfade_seconds;

    let asset = match loader.load_character(path) {
        Ok(asset) => asset,
        Err(e) => {
            log::error!("{}", e);
            return None;
        }
    };

    match LocomotionAnimator::from_clips(&asset.clips, &config.clips, crossfade) {
        Ok(animator) => {
            log::info!("Character '{}' with {} clips", asset.name, asset.clips.len());
            Some(animator)
        }
        Err(e) => {
            log::warn!("Character '{}': {}", asset.name, e);
            None
        }
    }
}
