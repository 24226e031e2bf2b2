//! FPS Controller - a first-person character controller for Bevy and Rapier.
//!
//! # Architecture
//!
//! The movement rules live in an engine-agnostic core; plugins wire it to
//! Bevy entities:
//!
//! - **Controller**: Walk/sprint/crouch locomotion, look, jump, gravity, head bob
//! - **Core**: Game states, global events, pause handling
//! - **Input**: Action bindings and per-frame device sampling
//! - **Player**: Player entity, camera, and the adapters that drive the controller
//! - **World**: A small course to move around in

pub mod controller;
pub mod core;
pub mod input;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
pub struct FpsControllerPlugin;

impl Plugin for FpsControllerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Action input
            .add_plugins(input::ActionInputPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}
