//! Sinusoidal camera bob driven by horizontal speed.

use bevy::prelude::*;

use super::config::MovementConfig;
use super::handles::CameraHandle;
use super::state::{CharacterRuntimeState, Gait};

/// Camera Y for a given phase and amplitude.
pub fn bob_offset(default_y: f32, phase: f32, amount: f32) -> f32 {
    default_y + phase.sin() * amount
}

/// Advance the bob and move the camera.
///
/// Airborne or below the deadzone nothing changes: the phase is kept and the
/// camera stays where the last bob left it.
pub fn handle_headbob(
    state: &mut CharacterRuntimeState,
    config: &MovementConfig,
    gait: Gait,
    grounded: bool,
    default_camera_y: f32,
    camera: &mut dyn CameraHandle,
    delta: f32,
) {
    if !grounded {
        return;
    }

    let moving = state.move_direction.x.abs() > config.bob_deadzone
        || state.move_direction.z.abs() > config.bob_deadzone;
    if !moving {
        return;
    }

    let (speed, amount) = gait.bob(config);
    state.bob_timer += delta * speed;

    let position = camera.local_position();
    camera.set_local_position(Vec3::new(
        position.x,
        bob_offset(default_camera_y, state.bob_timer, amount),
        position.z,
    ));
}
