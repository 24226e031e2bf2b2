//! World plugin - the test course the player moves around in.

use bevy::prelude::*;

use super::course::{course_blocks, SPAWN_POINT};
use super::geometry::{spawn_block, spawn_lighting, spawn_ramp};
use crate::player::SpawnPoint;

/// World plugin - spawns the course geometry and sets the spawn point.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SpawnPoint(SPAWN_POINT))
            .add_systems(Startup, setup_course);
    }
}

/// Spawn the course geometry and lighting.
pub fn setup_course(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let blocks = course_blocks();
    info!("Building test course: {} blocks", blocks.len());

    for block in &blocks {
        spawn_block(&mut commands, &mut meshes, &mut materials, block);
    }

    spawn_ramp(
        &mut commands,
        &mut meshes,
        &mut materials,
        Vec3::new(-9.0, 0.9, 6.0),
        Vec3::new(3.0, 0.2, 6.0),
        -17.0,
        Color::srgb(0.45, 0.45, 0.5),
    );

    spawn_lighting(&mut commands);
}
