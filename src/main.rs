//! FPS Controller - Entry Point
//!
//! A first-person test course for the character controller.
//!
//! Controls:
//! - WASD / left stick: Move
//! - Mouse / right stick: Look around
//! - Shift: Sprint
//! - Space: Jump
//! - Ctrl: Crouch
//! - R: Restart at the spawn point
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "FPS Controller".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our controller plugin
        .add_plugins(fps_controller::FpsControllerPlugin)

        .run();
}
