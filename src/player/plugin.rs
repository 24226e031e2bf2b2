//! Player plugin - spawning, controller driving, and cursor handling.

use bevy::prelude::*;

use super::movement;

/// Player plugin - spawns the player and ticks its controller every frame.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
