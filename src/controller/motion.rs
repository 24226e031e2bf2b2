//! Final displacement for the frame, handed to the collision-aware mover.

use bevy::prelude::*;

use super::config::MovementConfig;
use super::handles::{CharacterBody, MoveOutcome};
use super::state::CharacterRuntimeState;
use super::vertical::apply_gravity;

/// Horizontal velocity plus persisted vertical velocity, scaled by `delta`.
pub fn frame_displacement(state: &CharacterRuntimeState, delta: f32) -> Vec3 {
    let horizontal = Vec3::new(state.move_direction.x, 0.0, state.move_direction.z);
    let vertical = Vec3::Y * state.move_direction.y;
    (horizontal + vertical) * delta
}

/// Integrate gravity against the current grounded flag and move the body.
pub fn apply_final_movement(
    state: &mut CharacterRuntimeState,
    config: &MovementConfig,
    body: &mut dyn CharacterBody,
    delta: f32,
) -> MoveOutcome {
    apply_gravity(state, config, body.is_grounded(), delta);
    body.move_by(frame_displacement(state, delta))
}
