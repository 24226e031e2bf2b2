//! Player-related components.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::controller::{ColliderExtent, FirstPersonController, MovementConfig};

/// Capsule radius shared by standing and crouching shapes.
pub const CAPSULE_RADIUS: f32 = 0.3;

/// Shortest straight section a capsule is built with.
const MIN_HALF_SEGMENT: f32 = 0.01;

/// Camera height above the body origin.
pub const EYE_HEIGHT: f32 = 0.6;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Marker component for the player's first-person camera.
#[derive(Component)]
pub struct PlayerCamera;

/// Player waiting for its controller to be built on the first frame.
#[derive(Component)]
pub struct PendingController {
    pub config: MovementConfig,
}

/// The running controller for a player entity.
#[derive(Component)]
pub struct PlayerController(pub FirstPersonController);

/// Height and center of the player's movement capsule.
///
/// The crouch transition writes this; the shape system copies it into the
/// character controller's collision shape.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CapsuleExtent {
    pub height: f32,
    pub center: Vec3,
    pub radius: f32,
}

impl CapsuleExtent {
    /// Standing capsule for the given config.
    pub fn standing(config: &MovementConfig) -> Self {
        Self {
            height: config.standing_height,
            center: config.standing_center(),
            radius: CAPSULE_RADIUS,
        }
    }

    fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(MIN_HALF_SEGMENT)
    }

    /// Height of the collision shape actually built.
    ///
    /// The two caps set the minimum, so a configured height below
    /// `2 * radius` yields a taller shape than asked for.
    pub fn shape_height(&self) -> f32 {
        2.0 * (self.half_segment() + self.radius)
    }

    /// Lowest point of the shape relative to the body origin.
    pub fn bottom(&self) -> f32 {
        self.center.y - self.shape_height() * 0.5
    }

    /// Shape, offset and rotation in the form the character controller expects.
    pub fn shape(&self) -> (Collider, Vec3, Quat) {
        (
            Collider::capsule_y(self.half_segment(), self.radius),
            self.center,
            Quat::IDENTITY,
        )
    }
}

impl ColliderExtent for CapsuleExtent {
    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn center(&self) -> Vec3 {
        self.center
    }

    fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

/// Where the player spawns and restarts.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec3);

impl Default for SpawnPoint {
    fn default() -> Self {
        Self(Vec3::new(0.0, 1.5, 0.0))
    }
}
