//! Mouse look: clamped camera pitch and unbounded body yaw.

use bevy::prelude::*;

use super::config::MovementConfig;
use super::handles::{CameraHandle, CharacterBody, InputSample};
use super::state::CharacterRuntimeState;

/// Clamp pitch to `[-upper_look_limit, lower_look_limit]`.
///
/// Never panics on an inverted range: the lower bound is checked first.
pub fn clamp_pitch(pitch: f32, config: &MovementConfig) -> f32 {
    let min = -config.upper_look_limit;
    let max = config.lower_look_limit;
    if pitch < min {
        min
    } else if pitch > max {
        max
    } else {
        pitch
    }
}

/// Camera-local rotation for a pitch in degrees (positive looks down).
pub fn pitch_rotation(pitch: f32) -> Quat {
    Quat::from_rotation_x(-pitch.to_radians())
}

/// Yaw-only rotation for a horizontal look delta (positive turns right).
pub fn yaw_rotation(delta_x: f32, config: &MovementConfig) -> Quat {
    Quat::from_rotation_y(-(delta_x * config.look_speed_x).to_radians())
}

/// Apply one frame of look input.
///
/// The camera pitch is set absolutely. Body yaw is composed onto the current
/// orientation and never renormalized.
pub fn apply_look(
    state: &mut CharacterRuntimeState,
    config: &MovementConfig,
    input: &InputSample,
    body: &mut dyn CharacterBody,
    camera: &mut dyn CameraHandle,
) {
    state.rotation_pitch -= input.mouse_delta_y * config.look_speed_y;
    state.rotation_pitch = clamp_pitch(state.rotation_pitch, config);
    camera.set_local_rotation(pitch_rotation(state.rotation_pitch));

    let yaw = yaw_rotation(input.mouse_delta_x, config);
    body.set_rotation(body.rotation() * yaw);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_uses_negated_upper_limit() {
        let config = MovementConfig {
            upper_look_limit: 30.0,
            lower_look_limit: 70.0,
            ..default()
        };
        assert_eq!(clamp_pitch(-1000.0, &config), -30.0);
        assert_eq!(clamp_pitch(1000.0, &config), 70.0);
        assert_eq!(clamp_pitch(12.0, &config), 12.0);
    }

    #[test]
    fn inverted_range_does_not_panic() {
        let config = MovementConfig {
            upper_look_limit: -20.0,
            lower_look_limit: -40.0,
            ..default()
        };
        assert_eq!(clamp_pitch(0.0, &config), 20.0);
    }

    #[test]
    fn positive_pitch_looks_down() {
        let forward = pitch_rotation(45.0) * Vec3::NEG_Z;
        assert!(forward.y < 0.0);
    }

    #[test]
    fn positive_delta_turns_right() {
        let config = MovementConfig::default();
        let forward = yaw_rotation(10.0, &config) * Vec3::NEG_Z;
        assert!(forward.x > 0.0);
    }
}
