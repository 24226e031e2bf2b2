//! Jump impulse and gravity integration on the persisted vertical velocity.

use super::config::MovementConfig;
use super::handles::InputSample;
use super::state::CharacterRuntimeState;

/// Whether a jump starts this frame.
pub fn should_jump(
    state: &CharacterRuntimeState,
    config: &MovementConfig,
    input: &InputSample,
    grounded: bool,
) -> bool {
    config.can_jump
        && input.jump_pressed
        && grounded
        && !state.is_crouching
        && !state.is_crouch_animating
}

/// Overwrite vertical velocity with the jump impulse if a jump starts.
///
/// Returns true when the jump was applied.
pub fn handle_jump(
    state: &mut CharacterRuntimeState,
    config: &MovementConfig,
    input: &InputSample,
    grounded: bool,
) -> bool {
    let jumped = should_jump(state, config, input, grounded);
    if jumped {
        state.move_direction.y = config.jump_force;
    }
    jumped
}

/// Integrate gravity while airborne.
///
/// There is no terminal velocity. Grounded frames leave the value alone; the
/// mover is responsible for what happens on contact.
pub fn apply_gravity(
    state: &mut CharacterRuntimeState,
    config: &MovementConfig,
    grounded: bool,
    delta: f32,
) {
    if !grounded {
        state.move_direction.y -= config.gravity * delta;
    }
}
