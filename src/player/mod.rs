//! Player module - the Bevy side of the first-person controller.

mod adapters;
mod components;
mod movement;
mod plugin;

pub use adapters::{BodyAdapter, CameraAdapter, PlayerParts, RapierHeadroom};
pub use components::*;
pub use movement::{
    apply_restart, drive_controllers, initialize_controllers, request_restart, spawn_player,
    sync_capsule_shape,
};
pub use plugin::PlayerPlugin;
