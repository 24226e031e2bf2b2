//! The per-character controller that runs every component in frame order.

use bevy::prelude::*;

use super::config::MovementConfig;
use super::crouch::{self, CrouchRefusal, CrouchStep, CrouchTransition};
use super::error::ControllerError;
use super::handles::{CharacterRig, InputSample};
use super::headbob;
use super::locomotion;
use super::look;
use super::motion;
use super::state::CharacterRuntimeState;
use super::vertical;

/// What happened during one tick, for the game layer to react to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub jumped: bool,
    pub crouch_started: bool,
    /// A stand-up request was vetoed by the headroom probe.
    pub stand_blocked: bool,
    /// New crouch flag, set on the frame a transition completes.
    pub stance_changed: Option<bool>,
    /// Grounded flag reported by the mover, if the body moved this tick.
    pub grounded: Option<bool>,
}

/// First-person character controller.
///
/// Owns the runtime state of one character. The engine side supplies a fresh
/// [`CharacterRig`] and [`InputSample`] every frame through [`tick`](Self::tick).
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    config: MovementConfig,
    state: CharacterRuntimeState,
    default_camera_y: f32,
    crouch: Option<CrouchTransition>,
}

impl FirstPersonController {
    /// Validate the config, record the camera rest height and reset the FOV.
    pub fn init(
        config: MovementConfig,
        rig: &mut CharacterRig<'_>,
    ) -> Result<Self, ControllerError> {
        let config = config.validated()?;
        let default_camera_y = rig.camera.local_position().y;
        rig.camera.set_field_of_view(config.fov_default);

        debug!(
            "Controller ready: camera rest height {}, fov {}",
            default_camera_y, config.fov_default
        );

        Ok(Self {
            config,
            state: CharacterRuntimeState::default(),
            default_camera_y,
            crouch: None,
        })
    }

    /// Advance the character by one frame.
    pub fn tick(
        &mut self,
        delta: f32,
        input: &InputSample,
        rig: &mut CharacterRig<'_>,
    ) -> TickReport {
        let mut report = TickReport::default();
        // A transition started this tick has already taken its first step.
        let resume_crouch = self.crouch.is_some();

        if self.state.on_special_movement {
            look::apply_look(
                &mut self.state,
                &self.config,
                input,
                &mut *rig.body,
                &mut *rig.camera,
            );
        } else if self.state.can_move {
            self.update_locomotion(delta, input, rig);
            look::apply_look(
                &mut self.state,
                &self.config,
                input,
                &mut *rig.body,
                &mut *rig.camera,
            );

            let grounded = rig.body.is_grounded();
            report.jumped = vertical::handle_jump(&mut self.state, &self.config, input, grounded);

            if crouch::should_crouch(&self.state, &self.config, input, grounded) {
                self.start_crouch(delta, rig, &mut report);
            }

            if self.config.can_headbob {
                let gait = locomotion::current_gait(&self.state, &self.config, input);
                headbob::handle_headbob(
                    &mut self.state,
                    &self.config,
                    gait,
                    grounded,
                    self.default_camera_y,
                    &mut *rig.camera,
                    delta,
                );
            }

            let outcome =
                motion::apply_final_movement(&mut self.state, &self.config, &mut *rig.body, delta);
            report.grounded = Some(outcome.grounded);
        }

        if resume_crouch {
            self.resume_crouch(delta, rig, &mut report);
        }

        report
    }

    /// Restore the freshly-spawned state, keeping the config.
    pub fn reset(&mut self, rig: &mut CharacterRig<'_>) {
        self.state = CharacterRuntimeState::default();
        self.crouch = None;

        rig.collider.set_height(self.config.standing_height);
        rig.collider.set_center(self.config.standing_center());

        let position = rig.camera.local_position();
        rig.camera
            .set_local_position(Vec3::new(position.x, self.default_camera_y, position.z));
        rig.camera.set_local_rotation(look::pitch_rotation(0.0));
        rig.camera.set_field_of_view(self.config.fov_default);
    }

    fn update_locomotion(&mut self, delta: f32, input: &InputSample, rig: &mut CharacterRig<'_>) {
        let sprinting = locomotion::is_sprinting(&self.state, &self.config, input);
        let fov = locomotion::step_fov(rig.camera.field_of_view(), sprinting, &self.config, delta);
        rig.camera.set_field_of_view(fov);

        let gait = locomotion::current_gait(&self.state, &self.config, input);
        let (forward, right) = (rig.forward(), rig.right());
        locomotion::update_horizontal(&mut self.state, gait, &self.config, input, forward, right);
    }

    fn start_crouch(&mut self, delta: f32, rig: &mut CharacterRig<'_>, report: &mut TickReport) {
        let eye = rig.camera.world_position();
        let task = CrouchTransition::begin(
            self.state.is_crouching,
            &self.config,
            &*rig.collider,
            eye,
            rig.headroom,
        );

        match task {
            Ok(mut task) => {
                self.state.is_crouch_animating = true;
                report.crouch_started = true;
                match task.step(delta, &mut *rig.collider) {
                    CrouchStep::Pending => self.crouch = Some(task),
                    CrouchStep::Complete => self.finish_crouch(report),
                }
            }
            Err(CrouchRefusal::NoHeadroom) => {
                debug!("Stand up blocked: no headroom above {:?}", eye);
                report.stand_blocked = true;
            }
        }
    }

    fn resume_crouch(&mut self, delta: f32, rig: &mut CharacterRig<'_>, report: &mut TickReport) {
        let Some(task) = self.crouch.as_mut() else {
            return;
        };
        if task.step(delta, &mut *rig.collider) == CrouchStep::Complete {
            self.crouch = None;
            self.finish_crouch(report);
        }
    }

    fn finish_crouch(&mut self, report: &mut TickReport) {
        self.state.is_crouching = !self.state.is_crouching;
        self.state.is_crouch_animating = false;
        report.stance_changed = Some(self.state.is_crouching);
    }

    pub fn state(&self) -> &CharacterRuntimeState {
        &self.state
    }

    pub fn default_camera_y(&self) -> f32 {
        self.default_camera_y
    }

    pub fn is_crouching(&self) -> bool {
        self.state.is_crouching
    }

    pub fn is_crouch_animating(&self) -> bool {
        self.state.is_crouch_animating
    }

    pub fn set_can_move(&mut self, can_move: bool) {
        self.state.can_move = can_move;
    }

    /// While on special movement only mouse look is processed.
    pub fn set_special_movement(&mut self, active: bool) {
        self.state.on_special_movement = active;
    }
}
