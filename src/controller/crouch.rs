//! Timed crouch/stand transition.
//!
//! The transition is a small resumable task: [`CrouchTransition::begin`] checks
//! headroom and captures the start and target extents, then [`CrouchTransition::step`]
//! is called once per frame until it reports [`CrouchStep::Complete`]. Only one
//! transition can be in flight per character.

use bevy::prelude::*;

use super::config::MovementConfig;
use super::handles::{ColliderExtent, HeadroomProbe, InputSample};
use super::state::CharacterRuntimeState;

/// Progress of a crouch transition after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchStep {
    Pending,
    Complete,
}

/// Why a crouch request did not start a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchRefusal {
    /// Something is above the head; the character stays crouched.
    NoHeadroom,
}

/// In-flight interpolation of the collider between standing and crouching.
#[derive(Debug, Clone, PartialEq)]
pub struct CrouchTransition {
    elapsed: f32,
    duration: f32,
    start_height: f32,
    target_height: f32,
    start_center: Vec3,
    target_center: Vec3,
}

/// Whether a crouch request should be considered this frame.
pub fn should_crouch(
    state: &CharacterRuntimeState,
    config: &MovementConfig,
    input: &InputSample,
    grounded: bool,
) -> bool {
    config.can_crouch && input.crouch_pressed && !state.is_crouch_animating && grounded
}

impl CrouchTransition {
    /// Start a transition toward the opposite stance.
    ///
    /// Standing up is refused when the upward probe from `eye_position` hits.
    pub fn begin(
        is_crouching: bool,
        config: &MovementConfig,
        collider: &dyn ColliderExtent,
        eye_position: Vec3,
        headroom: &dyn HeadroomProbe,
    ) -> Result<Self, CrouchRefusal> {
        if is_crouching && headroom.raycast(eye_position, Vec3::Y, config.headroom_distance) {
            return Err(CrouchRefusal::NoHeadroom);
        }

        let (target_height, target_center) = if is_crouching {
            (config.standing_height, config.standing_center())
        } else {
            (config.crouching_height, config.crouching_center())
        };

        Ok(Self {
            elapsed: 0.0,
            duration: config.time_to_crouch,
            start_height: collider.height(),
            target_height,
            start_center: collider.center(),
            target_center,
        })
    }

    /// Advance one frame.
    ///
    /// While time remains, writes the interpolated extent and accumulates `delta`.
    /// Once the duration has elapsed, snaps to the exact target.
    pub fn step(&mut self, delta: f32, collider: &mut dyn ColliderExtent) -> CrouchStep {
        if self.elapsed < self.duration {
            let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
            collider.set_height(self.start_height + (self.target_height - self.start_height) * t);
            collider.set_center(self.start_center.lerp(self.target_center, t));
            self.elapsed += delta;
            return CrouchStep::Pending;
        }

        collider.set_height(self.target_height);
        collider.set_center(self.target_center);
        CrouchStep::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Extent {
        height: f32,
        center: Vec3,
    }

    impl ColliderExtent for Extent {
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

    struct Ceiling(bool);

    impl HeadroomProbe for Ceiling {
        fn raycast(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> bool {
            self.0
        }
    }

    fn standing() -> Extent {
        Extent {
            height: 2.0,
            center: Vec3::ZERO,
        }
    }

    #[test]
    fn interpolates_then_snaps() {
        let config = MovementConfig::default();
        let mut extent = standing();
        let mut task =
            CrouchTransition::begin(false, &config, &extent, Vec3::ZERO, &Ceiling(false)).unwrap();

        assert_eq!(task.step(0.125, &mut extent), CrouchStep::Pending);
        assert_eq!(extent.height, 2.0);

        assert_eq!(task.step(0.1, &mut extent), CrouchStep::Pending);
        assert!((extent.height - 1.25).abs() < 1e-5);
        assert!((extent.center.y - 0.25).abs() < 1e-5);

        assert_eq!(task.step(0.1, &mut extent), CrouchStep::Pending);
        assert_eq!(task.step(0.1, &mut extent), CrouchStep::Complete);
        assert_eq!(extent.height, 0.5);
        assert_eq!(extent.center, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn crouching_ignores_ceiling() {
        let config = MovementConfig::default();
        let extent = standing();
        let task = CrouchTransition::begin(false, &config, &extent, Vec3::ZERO, &Ceiling(true));
        assert!(task.is_ok());
    }

    #[test]
    fn standing_refused_under_ceiling() {
        let config = MovementConfig::default();
        let extent = Extent {
            height: 0.5,
            center: Vec3::new(0.0, 0.5, 0.0),
        };
        let task = CrouchTransition::begin(true, &config, &extent, Vec3::ZERO, &Ceiling(true));
        assert_eq!(task, Err(CrouchRefusal::NoHeadroom));
    }
}
