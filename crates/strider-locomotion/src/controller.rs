//! Per-frame locomotion tick
//!
//! [`LocomotionState`] owns the character, the walkable view of the active
//! scene, the follow camera and the animator. Nothing inside `tick` fails:
//! missing ground leaves the character's height alone and a blocked step
//! leaves it in place.

use crate::camera::CameraFollow;
use crate::config::LocomotionConfig;
use crate::obstacle::{MoveOutcome, StepKind};
use crate::spawn::{place_character, unstick, SpawnResult};
use crate::world::WalkableWorld;
use strider_animation::LocomotionAnimator;
use strider_core::{Quat, Result, StriderError, Vec3};
use strider_runtime::InputState;
use strider_scene::SceneGraph;

/// Animation-level motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Walking,
}

/// The walking character's transform and latches
#[derive(Debug, Clone)]
pub struct Character {
    pub position: Vec3,
    pub orientation: Quat,
    pub motion: MotionState,
    /// Set once the first ground snap succeeded in the current scene
    pub initial_ground_set: bool,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            motion: MotionState::Idle,
            initial_ground_set: false,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub motion: MotionState,
    /// Idle/walking flipped this tick
    pub motion_changed: bool,
    /// Step resolution, when there was movement input
    pub step: Option<MoveOutcome>,
    /// The end-of-tick ground snap resolved a height
    pub grounded: bool,
}

/// All locomotion state, passed explicitly to every subsystem
pub struct LocomotionState {
    pub config: LocomotionConfig,
    pub character: Character,
    pub camera: CameraFollow,
    pub animator: LocomotionAnimator,
    world: Option<WalkableWorld>,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl LocomotionState {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            camera: CameraFollow::new(config.camera),
            character: Character::default(),
            animator: LocomotionAnimator::default(),
            world: None,
            config,
        }
    }

    pub fn world(&self) -> Option<&WalkableWorld> {
        self.world.as_ref()
    }

    pub fn set_animator(&mut self, animator: LocomotionAnimator) {
        self.animator = animator;
    }

    /// Replace the active scene. Classifies its meshes and re-arms the
    /// initial ground latch.
    pub fn load_world(&mut self, scene: SceneGraph, ground_y_offset: f32) -> &WalkableWorld {
        let world = WalkableWorld::new(scene, ground_y_offset, &self.config);
        log::info!(
            "Scene '{}' active: {} ground, {} obstacles",
            world.scene.name,
            world.classified.ground.len(),
            world.classified.obstacles.len()
        );
        self.character.initial_ground_set = false;
        self.world.insert(world)
    }

    /// Drop the active scene and its mesh lists
    pub fn unload_world(&mut self) -> Option<WalkableWorld> {
        self.character.initial_ground_set = false;
        self.world.take()
    }

    /// Place the character in the active scene, unsticking it if needed.
    ///
    /// On `SpawnUnresolved` the character stays where placement left it, or
    /// where it was when no placement was possible.
    pub fn spawn(&mut self) -> Result<SpawnResult> {
        let world = self
            .world
            .as_ref()
            .ok_or_else(|| StriderError::SpawnUnresolved("no active scene".into()))?;
        let settings = self.config.spawn;

        let placement = place_character(world, &settings)
            .ok_or_else(|| StriderError::SpawnUnresolved(world.scene.name.clone()))?;
        let placed = placement.position();
        self.character.position = placed;
        self.character.initial_ground_set = true;

        let (position, unstuck) = if world.is_blocked(placed) {
            match unstick(world, placed, &settings) {
                Some(free) => (free, true),
                None => {
                    log::warn!(
                        "No obstacle-free spawn in '{}', staying at {:?}",
                        world.scene.name,
                        placed
                    );
                    self.camera.snap_to(placed);
                    return Err(StriderError::SpawnUnresolved(world.scene.name.clone()));
                }
            }
        } else {
            (placed, false)
        };

        self.character.position = position;
        self.camera.snap_to(position);
        log::info!("Spawned at {:?} ({:?}, unstuck: {})", position, placement, unstuck);

        Ok(SpawnResult {
            position,
            placement,
            unstuck,
        })
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, input: &InputState, dt: f64) -> TickReport {
        let dt_secs = dt as f32;
        let world = self.world.as_ref();
        let character = &mut self.character;

        // 1. Animation
        self.animator.advance(dt);

        // 2. One-time ground contact after a scene change
        if !character.initial_ground_set {
            if let Some(world) = world {
                let p = character.position;
                if let Some(y) = world.standing_y(p.x, p.z, p.y) {
                    character.position.y = y;
                    character.initial_ground_set = true;
                }
            }
        }

        // 3. Camera-relative direction
        let direction = self.camera.movement_direction(input.movement_vector());

        // 4./5. Move or idle
        let previous_motion = character.motion;
        let step = match direction {
            Some(dir) => {
                character.motion = MotionState::Walking;
                let current = character.position;
                let target = current + dir * self.config.speed * dt_secs;

                let outcome = match world {
                    Some(world) => world.resolver().resolve(current, target, |x, z| {
                        world.standing_y(x, z, current.y)
                    }),
                    None => MoveOutcome::Moved {
                        position: target,
                        kind: StepKind::Direct,
                    },
                };
                if let Some(position) = outcome.position() {
                    character.position = position;
                }

                let facing = Quat::from_rotation_arc(Vec3::Z, dir);
                let t = (self.config.rotation_speed * dt_secs).clamp(0.0, 1.0);
                character.orientation = character.orientation.slerp(facing, t).normalize();
                Some(outcome)
            }
            None => {
                character.motion = MotionState::Idle;
                None
            }
        };

        let motion_changed = character.motion != previous_motion;
        if motion_changed {
            self.animator
                .set_walking(character.motion == MotionState::Walking);
        }

        // 6. Continuous foot correction
        let grounded = match world {
            Some(world) => {
                let p = character.position;
                match world.standing_y(p.x, p.z, p.y) {
                    Some(y) => {
                        character.position.y = y;
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };

        // 7. Camera
        self.camera.follow(character.position);

        TickReport {
            motion: character.motion,
            motion_changed,
            step,
            grounded,
        }
    }
}
