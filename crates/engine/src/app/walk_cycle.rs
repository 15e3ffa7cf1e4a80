//! Walk-cycle animation state machine shared by every playable scene.
//!
//! Whether a direction key is held and which sprite frame is shown are tracked
//! separately: key edges only pick the next state, while frames advance by
//! counting ticks. Transition animations therefore always play out frame by
//! frame even when the keys change mid-way.

use std::ops::RangeInclusive;

use super::input::{HeldActions, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub const fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub const fn from_action(action: InputAction) -> Option<Self> {
        match action {
            InputAction::WalkLeft => Some(Facing::Left),
            InputAction::WalkRight => Some(Facing::Right),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Facing::Left => "Left",
            Facing::Right => "Right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    TransitioningToWalk,
    Walking,
    TransitioningToIdle,
}

impl AnimationState {
    pub const fn label(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::TransitioningToWalk => "transition_start",
            AnimationState::Walking => "walking",
            AnimationState::TransitioningToIdle => "transition_end",
        }
    }
}

/// Layout of the sprite sequence: the idle frame, the transition frames that
/// start at it, and the looping walk frames after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBands {
    pub idle: usize,
    pub transition_last: usize,
    pub walk_first: usize,
    pub walk_last: usize,
}

impl FrameBands {
    pub const STANDARD: Self = Self {
        idle: 0,
        transition_last: 2,
        walk_first: 3,
        walk_last: 18,
    };

    pub fn band(&self, state: AnimationState) -> RangeInclusive<usize> {
        match state {
            AnimationState::Idle => self.idle..=self.idle,
            AnimationState::TransitioningToWalk | AnimationState::TransitioningToIdle => {
                self.idle..=self.transition_last
            }
            AnimationState::Walking => self.walk_first..=self.walk_last,
        }
    }

    pub const fn frame_count(&self) -> usize {
        self.walk_last + 1
    }
}

impl Default for FrameBands {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkCycleConfig {
    /// Ticks spent on each transition frame (both directions).
    pub transition_ticks_per_frame: u32,
    /// Ticks spent on each walking frame.
    pub walk_ticks_per_frame: u32,
    pub walk_speed_px_per_tick: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub bands: FrameBands,
}

impl WalkCycleConfig {
    pub fn clamp_x(&self, x: f32) -> f32 {
        if self.max_x < self.min_x {
            return self.min_x;
        }
        x.clamp(self.min_x, self.max_x)
    }
}

impl Default for WalkCycleConfig {
    fn default() -> Self {
        Self {
            transition_ticks_per_frame: 6,
            walk_ticks_per_frame: 7,
            walk_speed_px_per_tick: 1.0,
            min_x: 50.0,
            max_x: 750.0,
            bands: FrameBands::STANDARD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Character {
    config: WalkCycleConfig,
    position: f32,
    facing: Facing,
    state: AnimationState,
    current_frame: usize,
    frame_tick_counter: u32,
    held: HeldActions,
}

impl Character {
    pub fn new(config: WalkCycleConfig, spawn_x: f32, facing: Facing) -> Self {
        Self {
            position: config.clamp_x(spawn_x),
            facing,
            state: AnimationState::Idle,
            current_frame: config.bands.idle,
            frame_tick_counter: 0,
            held: HeldActions::default(),
            config,
        }
    }

    pub fn config(&self) -> &WalkCycleConfig {
        &self.config
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame_tick_counter(&self) -> u32 {
        self.frame_tick_counter
    }

    pub fn is_movement_key_held(&self) -> bool {
        self.held.any_movement_down()
    }

    /// Sprites face left natively; facing right draws them mirrored.
    pub fn mirrored(&self) -> bool {
        self.facing == Facing::Right
    }

    /// Applies a key press. Returns `false` when the action is not a movement key.
    pub fn press(&mut self, action: InputAction) -> bool {
        let Some(facing) = Facing::from_action(action) else {
            return false;
        };
        self.held.set(action, true);
        self.facing = facing;

        match self.state {
            AnimationState::Walking => {}
            AnimationState::Idle => {
                self.state = AnimationState::TransitioningToWalk;
                self.current_frame = self.config.bands.idle;
                self.frame_tick_counter = 0;
            }
            AnimationState::TransitioningToWalk | AnimationState::TransitioningToIdle => {
                self.state = AnimationState::TransitioningToWalk;
            }
        }
        true
    }

    /// Applies a key release. Returns `false` when the action is not a movement key.
    pub fn release(&mut self, action: InputAction) -> bool {
        if !action.is_movement() {
            return false;
        }
        self.held.set(action, false);
        if !self.held.any_movement_down() {
            self.begin_stopping();
        }
        true
    }

    /// Forgets every held key, e.g. when the owning scene stops receiving input.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.begin_stopping();
    }

    /// Advances one simulation tick.
    pub fn tick(&mut self) {
        let bands = self.config.bands;
        match self.state {
            AnimationState::Idle => {
                self.current_frame = bands.idle;
                self.frame_tick_counter = 0;
            }
            AnimationState::TransitioningToWalk => {
                if self.current_frame < bands.transition_last {
                    if self.count_tick(self.config.transition_ticks_per_frame) {
                        self.current_frame += 1;
                    }
                } else {
                    self.state = AnimationState::Walking;
                    self.current_frame = bands.walk_first;
                    self.frame_tick_counter = 0;
                }
            }
            AnimationState::Walking => {
                if self.count_tick(self.config.walk_ticks_per_frame) {
                    self.current_frame += 1;
                    if self.current_frame > bands.walk_last {
                        self.current_frame = bands.walk_first;
                    }
                }
                let step = self.config.walk_speed_px_per_tick * self.facing.sign();
                self.position = self.config.clamp_x(self.position + step);
            }
            AnimationState::TransitioningToIdle => {
                if self.current_frame > bands.idle {
                    if self.count_tick(self.config.transition_ticks_per_frame) {
                        self.current_frame -= 1;
                    }
                } else {
                    self.state = AnimationState::Idle;
                    self.frame_tick_counter = 0;
                }
            }
        }
    }

    fn begin_stopping(&mut self) {
        match self.state {
            AnimationState::Walking => {
                self.state = AnimationState::TransitioningToIdle;
                self.current_frame = self.config.bands.transition_last;
                self.frame_tick_counter = 0;
            }
            AnimationState::TransitioningToWalk => {
                self.state = AnimationState::TransitioningToIdle;
                self.frame_tick_counter = 0;
            }
            AnimationState::Idle | AnimationState::TransitioningToIdle => {}
        }
    }

    fn count_tick(&mut self, ticks_per_frame: u32) -> bool {
        self.frame_tick_counter = self.frame_tick_counter.saturating_add(1);
        if self.frame_tick_counter >= ticks_per_frame.max(1) {
            self.frame_tick_counter = 0;
            true
        } else {
            false
        }
    }
}
