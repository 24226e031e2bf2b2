//! Geometry spawning functions for the test course.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Marker for everything the course spawns.
#[derive(Component)]
pub struct CourseGeometry;

/// An axis-aligned solid block, placed by its minimum corner and size.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub min: Vec3,
    pub size: Vec3,
    pub color: Color,
}

impl Block {
    pub fn new(min: Vec3, size: Vec3, color: Color) -> Self {
        Self { min, size, color }
    }

    pub fn center(&self) -> Vec3 {
        self.min + self.size / 2.0
    }
}

/// Spawn a block with a matching cuboid collider.
pub fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    block: &Block,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::from_size(block.size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: block.color,
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_translation(block.center()),
            Collider::cuboid(block.size.x / 2.0, block.size.y / 2.0, block.size.z / 2.0),
            CourseGeometry,
        ))
        .id()
}

/// Spawn a slab tilted around the X axis, for walking up slopes.
pub fn spawn_ramp(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    center: Vec3,
    size: Vec3,
    angle_degrees: f32,
    color: Color,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_translation(center)
                .with_rotation(Quat::from_rotation_x(angle_degrees.to_radians())),
            Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
            CourseGeometry,
        ))
        .id()
}

/// Spawn the sun and ambient fill.
pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 20.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        CourseGeometry,
    ));
}
