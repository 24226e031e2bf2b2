//! Device-to-action binding table, loaded from an external RON file.
//!
//! Control paths use the `<Device>/control` form, e.g. `<Keyboard>/w`,
//! `<Mouse>/delta` or `<Gamepad>/leftStick`.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use thiserror::Error;

use super::actions::{Action, ActionKind};

/// Default location of the binding table.
pub const BINDINGS_PATH: &str = "assets/data/input/bindings.ron";

/// Errors produced while resolving a binding entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// Path is not `<Device>/control`.
    #[error("Malformed control path '{0}'")]
    MalformedPath(String),

    /// Device or control name is not known.
    #[error("Unknown control '{0}'")]
    UnknownControl(String),

    /// A button control was bound to an axis action, or the other way round.
    #[error("Control '{path}' cannot drive {action:?}")]
    KindMismatch { action: Action, path: String },
}

/// One entry of the binding file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum BindingDef {
    /// A single control.
    Control { action: Action, path: String },
    /// Four buttons combined into a 2D vector.
    Composite {
        action: Action,
        up: String,
        down: String,
        left: String,
        right: String,
    },
}

/// The binding file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BindingTable {
    pub map_name: String,
    /// Multiplier from mouse pixels to look units.
    pub mouse_look_scale: f32,
    /// Multiplier from stick deflection to look units per frame.
    pub stick_look_scale: f32,
    pub bindings: Vec<BindingDef>,
}

fn control(action: Action, path: &str) -> BindingDef {
    BindingDef::Control {
        action,
        path: path.to_string(),
    }
}

fn composite(action: Action, up: &str, down: &str, left: &str, right: &str) -> BindingDef {
    BindingDef::Composite {
        action,
        up: up.to_string(),
        down: down.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self {
            map_name: "HumanoidLand".to_string(),
            mouse_look_scale: 0.1,
            stick_look_scale: 2.0,
            bindings: vec![
                control(Action::Walk, "<Gamepad>/leftStick"),
                composite(
                    Action::Walk,
                    "<Keyboard>/w",
                    "<Keyboard>/s",
                    "<Keyboard>/a",
                    "<Keyboard>/d",
                ),
                composite(
                    Action::Walk,
                    "<Keyboard>/upArrow",
                    "<Keyboard>/downArrow",
                    "<Keyboard>/leftArrow",
                    "<Keyboard>/rightArrow",
                ),
                control(Action::Look, "<Gamepad>/rightStick"),
                control(Action::Look, "<Mouse>/delta"),
                control(Action::Dash, "<Keyboard>/shift"),
                control(Action::Dash, "<Gamepad>/leftStickPress"),
                control(Action::Jump, "<Keyboard>/space"),
                control(Action::Jump, "<Gamepad>/buttonSouth"),
                control(Action::Crouch, "<Keyboard>/leftCtrl"),
                control(Action::Crouch, "<Gamepad>/buttonEast"),
                control(Action::Restart, "<Keyboard>/r"),
                control(Action::Restart, "<Gamepad>/select"),
            ],
        }
    }
}

impl BindingTable {
    /// Load the binding table from the default path, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(BINDINGS_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(table) => {
                    info!("Loaded input bindings from {}", BINDINGS_PATH);
                    table
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", BINDINGS_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", BINDINGS_PATH, e);
                Self::default()
            }
        }
    }
}

/// Which stick of a gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stick {
    Left,
    Right,
}

/// A physical control on some device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Any of these keys.
    Keys(&'static [KeyCode]),
    MouseButton(MouseButton),
    MouseDelta,
    GamepadButton(GamepadButton),
    GamepadStick(Stick),
}

impl Control {
    /// Parse a `<Device>/control` path.
    pub fn parse(path: &str) -> Result<Self, BindingError> {
        let malformed = || BindingError::MalformedPath(path.to_string());
        let unknown = || BindingError::UnknownControl(path.to_string());

        let rest = path.strip_prefix('<').ok_or_else(malformed)?;
        let (device, name) = rest.split_once(">/").ok_or_else(malformed)?;

        match device {
            "Keyboard" => keyboard_control(name).map(Control::Keys).ok_or_else(unknown),
            "Mouse" => match name {
                "delta" => Ok(Control::MouseDelta),
                "leftButton" => Ok(Control::MouseButton(MouseButton::Left)),
                "rightButton" => Ok(Control::MouseButton(MouseButton::Right)),
                "middleButton" => Ok(Control::MouseButton(MouseButton::Middle)),
                _ => Err(unknown()),
            },
            "Gamepad" => match name {
                "leftStick" => Ok(Control::GamepadStick(Stick::Left)),
                "rightStick" => Ok(Control::GamepadStick(Stick::Right)),
                _ => gamepad_button(name)
                    .map(Control::GamepadButton)
                    .ok_or_else(unknown),
            },
            _ => Err(unknown()),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Control::MouseDelta | Control::GamepadStick(_) => ActionKind::Axis2d,
            Control::Keys(_) | Control::MouseButton(_) | Control::GamepadButton(_) => {
                ActionKind::Button
            }
        }
    }
}

fn keyboard_control(name: &str) -> Option<&'static [KeyCode]> {
    let keys: &'static [KeyCode] = match name {
        "a" => &[KeyCode::KeyA],
        "b" => &[KeyCode::KeyB],
        "c" => &[KeyCode::KeyC],
        "d" => &[KeyCode::KeyD],
        "e" => &[KeyCode::KeyE],
        "f" => &[KeyCode::KeyF],
        "g" => &[KeyCode::KeyG],
        "h" => &[KeyCode::KeyH],
        "i" => &[KeyCode::KeyI],
        "j" => &[KeyCode::KeyJ],
        "k" => &[KeyCode::KeyK],
        "l" => &[KeyCode::KeyL],
        "m" => &[KeyCode::KeyM],
        "n" => &[KeyCode::KeyN],
        "o" => &[KeyCode::KeyO],
        "p" => &[KeyCode::KeyP],
        "q" => &[KeyCode::KeyQ],
        "r" => &[KeyCode::KeyR],
        "s" => &[KeyCode::KeyS],
        "t" => &[KeyCode::KeyT],
        "u" => &[KeyCode::KeyU],
        "v" => &[KeyCode::KeyV],
        "w" => &[KeyCode::KeyW],
        "x" => &[KeyCode::KeyX],
        "y" => &[KeyCode::KeyY],
        "z" => &[KeyCode::KeyZ],
        "space" => &[KeyCode::Space],
        "enter" => &[KeyCode::Enter],
        "tab" => &[KeyCode::Tab],
        "escape" => &[KeyCode::Escape],
        "shift" => &[KeyCode::ShiftLeft, KeyCode::ShiftRight],
        "leftShift" => &[KeyCode::ShiftLeft],
        "rightShift" => &[KeyCode::ShiftRight],
        "ctrl" => &[KeyCode::ControlLeft, KeyCode::ControlRight],
        "leftCtrl" => &[KeyCode::ControlLeft],
        "rightCtrl" => &[KeyCode::ControlRight],
        "alt" => &[KeyCode::AltLeft, KeyCode::AltRight],
        "upArrow" => &[KeyCode::ArrowUp],
        "downArrow" => &[KeyCode::ArrowDown],
        "leftArrow" => &[KeyCode::ArrowLeft],
        "rightArrow" => &[KeyCode::ArrowRight],
        _ => return None,
    };
    Some(keys)
}

fn gamepad_button(name: &str) -> Option<GamepadButton> {
    let button = match name {
        "buttonSouth" => GamepadButton::South,
        "buttonEast" => GamepadButton::East,
        "buttonWest" => GamepadButton::West,
        "buttonNorth" => GamepadButton::North,
        "leftShoulder" => GamepadButton::LeftTrigger,
        "rightShoulder" => GamepadButton::RightTrigger,
        "leftTrigger" => GamepadButton::LeftTrigger2,
        "rightTrigger" => GamepadButton::RightTrigger2,
        "leftStickPress" => GamepadButton::LeftThumb,
        "rightStickPress" => GamepadButton::RightThumb,
        "select" => GamepadButton::Select,
        "start" => GamepadButton::Start,
        "dpad/up" => GamepadButton::DPadUp,
        "dpad/down" => GamepadButton::DPadDown,
        "dpad/left" => GamepadButton::DPadLeft,
        "dpad/right" => GamepadButton::DPadRight,
        _ => return None,
    };
    Some(button)
}

/// A binding entry with its controls parsed and checked.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedBinding {
    Single {
        action: Action,
        control: Control,
    },
    Composite {
        action: Action,
        up: Control,
        down: Control,
        left: Control,
        right: Control,
    },
}

impl BindingDef {
    pub fn resolve(&self) -> Result<ResolvedBinding, BindingError> {
        match self {
            BindingDef::Control { action, path } => {
                let control = Control::parse(path)?;
                if control.kind() != action.kind() {
                    return Err(BindingError::KindMismatch {
                        action: *action,
                        path: path.clone(),
                    });
                }
                Ok(ResolvedBinding::Single {
                    action: *action,
                    control,
                })
            }
            BindingDef::Composite {
                action,
                up,
                down,
                left,
                right,
            } => {
                let part = |path: &String| -> Result<Control, BindingError> {
                    let control = Control::parse(path)?;
                    if control.kind() != ActionKind::Button || action.kind() != ActionKind::Axis2d {
                        return Err(BindingError::KindMismatch {
                            action: *action,
                            path: path.clone(),
                        });
                    }
                    Ok(control)
                };
                Ok(ResolvedBinding::Composite {
                    action: *action,
                    up: part(up)?,
                    down: part(down)?,
                    left: part(left)?,
                    right: part(right)?,
                })
            }
        }
    }
}

/// Resolved bindings, read by the sampling system every frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputBindings {
    pub map_name: String,
    pub mouse_look_scale: f32,
    pub stick_look_scale: f32,
    pub bindings: Vec<ResolvedBinding>,
}

impl InputBindings {
    /// Resolve a table, skipping entries that do not resolve.
    pub fn resolve(table: &BindingTable) -> Self {
        let mut bindings = Vec::with_capacity(table.bindings.len());
        for def in &table.bindings {
            match def.resolve() {
                Ok(binding) => bindings.push(binding),
                Err(e) => warn!("Skipping binding in '{}': {}", table.map_name, e),
            }
        }

        for action in Action::ALL {
            if !bindings.iter().any(|b| b.action() == action) {
                warn!("Action {:?} has no bindings in '{}'", action, table.map_name);
            }
        }

        Self {
            map_name: table.map_name.clone(),
            mouse_look_scale: table.mouse_look_scale,
            stick_look_scale: table.stick_look_scale,
            bindings,
        }
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::resolve(&BindingTable::default())
    }
}

impl ResolvedBinding {
    pub fn action(&self) -> Action {
        match self {
            ResolvedBinding::Single { action, .. } | ResolvedBinding::Composite { action, .. } => {
                *action
            }
        }
    }
}

/// System to load and resolve the binding table at startup.
pub fn load_input_bindings(mut commands: Commands) {
    let table = BindingTable::load();
    let bindings = InputBindings::resolve(&table);
    info!(
        "Input map '{}' ready with {} binding(s)",
        bindings.map_name,
        bindings.bindings.len()
    );
    commands.insert_resource(bindings);
}
