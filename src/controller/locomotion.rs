//! Locomotion gates, gait selection, FOV ramp and horizontal velocity.

use bevy::prelude::*;

use super::config::MovementConfig;
use super::handles::InputSample;
use super::state::{CharacterRuntimeState, Gait};

/// Whether the character sprints this frame.
///
/// Recomputed from scratch every call so it can never go stale.
pub fn is_sprinting(
    state: &CharacterRuntimeState,
    config: &MovementConfig,
    input: &InputSample,
) -> bool {
    config.can_sprint && input.sprint_held && state.can_move && !state.is_crouching
}

/// Gait for this frame, using the same precedence as speed selection.
pub fn current_gait(
    state: &CharacterRuntimeState,
    config: &MovementConfig,
    input: &InputSample,
) -> Gait {
    Gait::select(state.is_crouching, is_sprinting(state, config, input))
}

/// Move the field of view one step toward the sprint or default value.
///
/// Only widens while sprinting and only narrows while not, never past the target.
pub fn step_fov(current: f32, sprinting: bool, config: &MovementConfig, delta: f32) -> f32 {
    let step = config.fov_increment * delta;
    if sprinting && current < config.fov_sprint {
        (current + step).min(config.fov_sprint)
    } else if !sprinting && current > config.fov_default {
        (current - step).max(config.fov_default)
    } else {
        current
    }
}

/// Rebuild the horizontal part of `move_direction` from input.
///
/// The vertical component is carried over untouched.
pub fn update_horizontal(
    state: &mut CharacterRuntimeState,
    gait: Gait,
    config: &MovementConfig,
    input: &InputSample,
    forward: Vec3,
    right: Vec3,
) {
    let speed = gait.speed(config);
    state.current_input = Vec2::new(speed * input.axis_vertical, speed * input.axis_horizontal);

    let vertical = state.move_direction.y;
    state.move_direction = forward * state.current_input.x + right * state.current_input.y;
    state.move_direction.y = vertical;
}
