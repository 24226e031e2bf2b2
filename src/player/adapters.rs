//! Bevy and Rapier implementations of the controller's handles.
//!
//! These wrap component borrows for a single system run. Rapier resolves the
//! requested translation later in the frame, so a move reports the grounded
//! flag from the previous physics step.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::CapsuleExtent;
use crate::controller::{
    CameraHandle, CharacterBody, CharacterRig, ColliderExtent, ControllerError, HeadroomProbe,
    MoveOutcome,
};

/// Player body driven through Rapier's kinematic character controller.
pub struct BodyAdapter<'a> {
    pub transform: &'a mut Transform,
    pub mover: &'a mut KinematicCharacterController,
    pub grounded: bool,
}

impl CharacterBody for BodyAdapter<'_> {
    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, displacement: Vec3) -> MoveOutcome {
        self.mover.translation = Some(displacement);
        MoveOutcome {
            grounded: self.grounded,
        }
    }
}

/// First-person camera parented to the player body.
pub struct CameraAdapter<'a> {
    pub transform: &'a mut Transform,
    pub projection: &'a mut Projection,
    /// Body transform at the start of the frame.
    pub parent: Transform,
}

impl CameraHandle for CameraAdapter<'_> {
    fn local_position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn local_rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn field_of_view(&self) -> f32 {
        match &*self.projection {
            Projection::Perspective(perspective) => perspective.fov.to_degrees(),
            _ => 0.0,
        }
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        if let Projection::Perspective(perspective) = &mut *self.projection {
            perspective.fov = degrees.to_radians();
        }
    }

    fn world_position(&self) -> Vec3 {
        self.parent.transform_point(self.transform.translation)
    }
}

/// Upward ray test against the Rapier scene, ignoring the player itself.
pub struct RapierHeadroom<'a> {
    pub context: &'a RapierContext,
    pub exclude: Entity,
}

impl HeadroomProbe for RapierHeadroom<'_> {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        let filter = QueryFilter::default()
            .exclude_rigid_body(self.exclude)
            .exclude_sensors();
        self.context
            .cast_ray(origin, direction, max_distance, true, filter)
            .is_some()
    }
}

/// Component borrows for one player, turned into a [`CharacterRig`] on demand.
pub struct PlayerParts<'a> {
    pub entity: Entity,
    pub transform: &'a mut Transform,
    pub mover: &'a mut KinematicCharacterController,
    pub grounded: bool,
    pub extent: &'a mut CapsuleExtent,
    pub camera: Option<(&'a mut Transform, &'a mut Projection)>,
    pub context: Option<&'a RapierContext>,
}

impl PlayerParts<'_> {
    /// Run `f` with a rig built from these parts.
    ///
    /// Fails if the camera child or the physics context is missing.
    pub fn with_rig<R>(
        self,
        f: impl FnOnce(&mut CharacterRig<'_>) -> R,
    ) -> Result<R, ControllerError> {
        let parent = *self.transform;
        let mut body = BodyAdapter {
            transform: self.transform,
            mover: self.mover,
            grounded: self.grounded,
        };
        let mut camera = self.camera.map(|(transform, projection)| CameraAdapter {
            transform,
            projection,
            parent,
        });
        let headroom = self.context.map(|context| RapierHeadroom {
            context,
            exclude: self.entity,
        });

        let mut rig = CharacterRig::assemble(
            Some(&mut body as &mut dyn CharacterBody),
            Some(self.extent as &mut dyn ColliderExtent),
            camera.as_mut().map(|c| c as &mut dyn CameraHandle),
            headroom.as_ref().map(|h| h as &dyn HeadroomProbe),
        )?;
        Ok(f(&mut rig))
    }
}
