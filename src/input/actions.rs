//! Logical actions and their per-frame state.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::controller::{InputSample, InputSampler};

/// Everything the player can ask the character to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Action {
    /// 2D movement
    Walk,
    /// 2D look delta
    Look,
    /// Held to sprint
    Dash,
    Jump,
    Crouch,
    /// Respawn at the level start
    Restart,
}

/// Whether an action reads a 2D value or a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Axis2d,
    Button,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Walk,
        Action::Look,
        Action::Dash,
        Action::Jump,
        Action::Crouch,
        Action::Restart,
    ];

    pub fn kind(self) -> ActionKind {
        match self {
            Action::Walk | Action::Look => ActionKind::Axis2d,
            Action::Dash | Action::Jump | Action::Crouch | Action::Restart => ActionKind::Button,
        }
    }
}

/// Action values for the current frame, rebuilt by the sampling system.
///
/// Button edges are derived here from level state, so an action bound to two
/// controls only fires once when the second one goes down.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActionState {
    axes: HashMap<Action, Vec2>,
    held: HashSet<Action>,
    previously_held: HashSet<Action>,
}

impl ActionState {
    /// Start a new frame: remember what was held and forget all readings.
    pub fn begin_frame(&mut self) {
        self.previously_held = std::mem::take(&mut self.held);
        self.axes.clear();
    }

    pub fn axis(&self, action: Action) -> Vec2 {
        self.axes.get(&action).copied().unwrap_or(Vec2::ZERO)
    }

    pub fn held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Held this frame but not the previous one.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.held.contains(&action) && !self.previously_held.contains(&action)
    }

    /// Offer an axis value; the largest magnitude this frame wins.
    pub fn offer_axis(&mut self, action: Action, value: Vec2) {
        let current = self.axes.entry(action).or_insert(Vec2::ZERO);
        if value.length_squared() > current.length_squared() {
            *current = value;
        }
    }

    /// Mark a button action as held for this frame.
    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }
}

impl InputSampler for ActionState {
    fn sample(&self) -> InputSample {
        let walk = self.axis(Action::Walk);
        let look = self.axis(Action::Look);
        InputSample {
            axis_vertical: walk.y,
            axis_horizontal: walk.x,
            mouse_delta_x: look.x,
            mouse_delta_y: look.y,
            sprint_held: self.held(Action::Dash),
            jump_pressed: self.just_pressed(Action::Jump),
            crouch_pressed: self.just_pressed(Action::Crouch),
        }
    }
}
