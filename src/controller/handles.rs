//! Interfaces to the things the controller drives but does not own.
//!
//! The controller never talks to the engine directly. The game layer wraps its
//! transforms, physics and camera in these traits once per frame and hands them
//! over as a [`CharacterRig`].

use bevy::prelude::*;

use super::error::ControllerError;

/// One frame of normalized input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    /// Forward/back axis in `[-1, 1]`.
    pub axis_vertical: f32,
    /// Strafe axis in `[-1, 1]`.
    pub axis_horizontal: f32,
    pub mouse_delta_x: f32,
    /// Positive when the look input moves up.
    pub mouse_delta_y: f32,
    pub sprint_held: bool,
    /// True only on the frame jump went down.
    pub jump_pressed: bool,
    /// True only on the frame crouch went down.
    pub crouch_pressed: bool,
}

/// Anything that can produce an [`InputSample`] once per frame.
pub trait InputSampler {
    fn sample(&self) -> InputSample;
}

/// Result of a collision-aware move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub grounded: bool,
}

/// The character body: orientation plus a collision-aware mover.
pub trait CharacterBody {
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    /// Grounded flag as of the last move.
    fn is_grounded(&self) -> bool;
    /// Sweep the body by `displacement`, resolving collisions.
    fn move_by(&mut self, displacement: Vec3) -> MoveOutcome;
}

/// Height and center of the body's capsule.
pub trait ColliderExtent {
    fn height(&self) -> f32;
    fn set_height(&mut self, height: f32);
    fn center(&self) -> Vec3;
    fn set_center(&mut self, center: Vec3);
}

/// The first-person camera attached to the body.
pub trait CameraHandle {
    fn local_position(&self) -> Vec3;
    fn set_local_position(&mut self, position: Vec3);
    fn local_rotation(&self) -> Quat;
    fn set_local_rotation(&mut self, rotation: Quat);
    /// Vertical field of view in degrees.
    fn field_of_view(&self) -> f32;
    fn set_field_of_view(&mut self, degrees: f32);
    fn world_position(&self) -> Vec3;
}

/// Ray query used to veto standing up under a low ceiling.
pub trait HeadroomProbe {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool;
}

/// Borrowed handles for one character, valid for a single frame.
pub struct CharacterRig<'a> {
    pub body: &'a mut dyn CharacterBody,
    pub collider: &'a mut dyn ColliderExtent,
    pub camera: &'a mut dyn CameraHandle,
    pub headroom: &'a dyn HeadroomProbe,
}

impl<'a> CharacterRig<'a> {
    /// Build a rig from handles that may be missing.
    ///
    /// A character without a camera or collider cannot work, so a missing handle
    /// is an error rather than a silent no-op.
    pub fn assemble(
        body: Option<&'a mut dyn CharacterBody>,
        collider: Option<&'a mut dyn ColliderExtent>,
        camera: Option<&'a mut dyn CameraHandle>,
        headroom: Option<&'a dyn HeadroomProbe>,
    ) -> Result<Self, ControllerError> {
        Ok(Self {
            body: body.ok_or(ControllerError::MissingHandle("body"))?,
            collider: collider.ok_or(ControllerError::MissingHandle("collider"))?,
            camera: camera.ok_or(ControllerError::MissingHandle("camera"))?,
            headroom: headroom.ok_or(ControllerError::MissingHandle("headroom probe"))?,
        })
    }

    /// Forward direction of the body in world space.
    pub fn forward(&self) -> Vec3 {
        self.body.rotation() * Vec3::NEG_Z
    }

    /// Right direction of the body in world space.
    pub fn right(&self) -> Vec3 {
        self.body.rotation() * Vec3::X
    }
}
