//! Mutable per-character state.

use bevy::prelude::*;

use super::config::MovementConfig;

/// Everything one character mutates while it updates.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRuntimeState {
    /// World-space velocity. X/Z are rebuilt every frame, Y persists across frames.
    pub move_direction: Vec3,
    /// Speed-scaled input: `x` forward, `y` strafe.
    pub current_input: Vec2,
    /// Camera pitch in degrees, positive looking down.
    pub rotation_pitch: f32,
    /// Head-bob phase accumulator.
    pub bob_timer: f32,
    pub is_crouching: bool,
    /// True only while a crouch transition is in flight.
    pub is_crouch_animating: bool,
    pub can_move: bool,
    /// Ladders and the like: only looking is processed.
    pub on_special_movement: bool,
}

impl Default for CharacterRuntimeState {
    fn default() -> Self {
        Self {
            move_direction: Vec3::ZERO,
            current_input: Vec2::ZERO,
            rotation_pitch: 0.0,
            bob_timer: 0.0,
            is_crouching: false,
            is_crouch_animating: false,
            can_move: true,
            on_special_movement: false,
        }
    }
}

/// Speed and bob profile selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gait {
    Walk,
    Sprint,
    Crouch,
}

impl Gait {
    /// Crouch wins over sprint, sprint over walk.
    pub fn select(is_crouching: bool, is_sprinting: bool) -> Self {
        if is_crouching {
            Gait::Crouch
        } else if is_sprinting {
            Gait::Sprint
        } else {
            Gait::Walk
        }
    }

    pub fn speed(self, config: &MovementConfig) -> f32 {
        match self {
            Gait::Walk => config.walk_speed,
            Gait::Sprint => config.sprint_speed,
            Gait::Crouch => config.crouch_speed,
        }
    }

    /// Returns `(bob_speed, bob_amount)`.
    pub fn bob(self, config: &MovementConfig) -> (f32, f32) {
        match self {
            Gait::Walk => (config.walk_bob_speed, config.walk_bob_amount),
            Gait::Sprint => (config.sprint_bob_speed, config.sprint_bob_amount),
            Gait::Crouch => (config.crouch_bob_speed, config.crouch_bob_amount),
        }
    }
}
