//! Reads keyboard, mouse and gamepads into [`ActionState`] once per frame.

use bevy::input::gamepad::Gamepad;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use super::actions::{Action, ActionKind, ActionState};
use super::bindings::{Control, InputBindings, ResolvedBinding, Stick};

/// Device readings for one frame.
pub struct DeviceSnapshot<'a> {
    pub keyboard: &'a ButtonInput<KeyCode>,
    pub mouse_buttons: &'a ButtonInput<MouseButton>,
    /// Accumulated mouse motion in window pixels, +Y down.
    pub mouse_delta: Vec2,
    pub gamepads: Vec<&'a Gamepad>,
}

impl DeviceSnapshot<'_> {
    fn is_held(&self, control: &Control) -> bool {
        match control {
            Control::Keys(keys) => self.keyboard.any_pressed(keys.iter().copied()),
            Control::MouseButton(button) => self.mouse_buttons.pressed(*button),
            Control::GamepadButton(button) => self.gamepads.iter().any(|g| g.pressed(*button)),
            Control::MouseDelta | Control::GamepadStick(_) => false,
        }
    }

    /// 2D value with +Y meaning up/forward.
    fn axis(&self, control: &Control) -> Vec2 {
        match control {
            Control::MouseDelta => Vec2::new(self.mouse_delta.x, -self.mouse_delta.y),
            Control::GamepadStick(stick) => self
                .gamepads
                .iter()
                .map(|g| match stick {
                    Stick::Left => g.left_stick(),
                    Stick::Right => g.right_stick(),
                })
                .fold(Vec2::ZERO, |best, v| {
                    if v.length_squared() > best.length_squared() {
                        v
                    } else {
                        best
                    }
                }),
            _ => Vec2::ZERO,
        }
    }
}

fn look_scale(bindings: &InputBindings, control: &Control) -> f32 {
    match control {
        Control::MouseDelta => bindings.mouse_look_scale,
        Control::GamepadStick(_) => bindings.stick_look_scale,
        _ => 1.0,
    }
}

/// Rebuild the action state from one frame of device readings.
pub fn update_action_state(
    state: &mut ActionState,
    bindings: &InputBindings,
    devices: &DeviceSnapshot,
) {
    state.begin_frame();

    for binding in &bindings.bindings {
        match binding {
            ResolvedBinding::Single { action, control } => {
                match action.kind() {
                    ActionKind::Button => {
                        if devices.is_held(control) {
                            state.press(*action);
                        }
                    }
                    ActionKind::Axis2d => {
                        let mut value = devices.axis(control);
                        if *action == Action::Look {
                            value *= look_scale(bindings, control);
                        }
                        state.offer_axis(*action, value);
                    }
                }
            }
            ResolvedBinding::Composite {
                action,
                up,
                down,
                left,
                right,
            } => {
                let axis = |positive: &Control, negative: &Control| {
                    let mut value = 0.0;
                    if devices.is_held(positive) {
                        value += 1.0;
                    }
                    if devices.is_held(negative) {
                        value -= 1.0;
                    }
                    value
                };
                state.offer_axis(*action, Vec2::new(axis(right, left), axis(up, down)));
            }
        }
    }
}

/// System that samples all devices into the [`ActionState`] resource.
pub fn sample_actions(
    bindings: Res<InputBindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
    mut actions: ResMut<ActionState>,
) {
    let mut mouse_delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        mouse_delta += event.delta;
    }

    let devices = DeviceSnapshot {
        keyboard: &keyboard,
        mouse_buttons: &mouse_buttons,
        mouse_delta,
        gamepads: gamepads.iter().collect(),
    };
    update_action_state(&mut actions, &bindings, &devices);
}
