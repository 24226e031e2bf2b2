//! Integration tests for the first-person controller.
//!
//! The controller runs against simple in-memory stand-ins for the body,
//! capsule, camera and headroom probe, so every frame can be inspected exactly.

use bevy::prelude::*;
use fps_controller::controller::*;

const DT: f32 = 1.0 / 60.0;
const CAMERA_Y: f32 = 1.6;

/// Body on an infinite floor at y = 0.
struct TestBody {
    position: Vec3,
    rotation: Quat,
    grounded: bool,
    moves: usize,
}

impl CharacterBody for TestBody {
    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, displacement: Vec3) -> MoveOutcome {
        self.moves += 1;
        self.position += displacement;
        self.grounded = self.position.y <= 0.0;
        if self.grounded {
            self.position.y = 0.0;
        }
        MoveOutcome {
            grounded: self.grounded,
        }
    }
}

struct TestCapsule {
    height: f32,
    center: Vec3,
}

impl ColliderExtent for TestCapsule {
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

struct TestCamera {
    position: Vec3,
    rotation: Quat,
    fov: f32,
}

impl CameraHandle for TestCamera {
    fn local_position(&self) -> Vec3 {
        self.position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn local_rotation(&self) -> Quat {
        self.rotation
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn field_of_view(&self) -> f32 {
        self.fov
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        self.fov = degrees;
    }

    fn world_position(&self) -> Vec3 {
        self.position
    }
}

/// Ceiling that can be toggled between frames.
struct TestCeiling {
    blocked: bool,
}

impl HeadroomProbe for TestCeiling {
    fn raycast(&self, _origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        assert_eq!(direction, Vec3::Y);
        assert!(max_distance > 0.0);
        self.blocked
    }
}

struct Harness {
    controller: FirstPersonController,
    body: TestBody,
    capsule: TestCapsule,
    camera: TestCamera,
    ceiling: TestCeiling,
}

impl Harness {
    fn new(config: MovementConfig) -> Self {
        let mut body = TestBody {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            grounded: true,
            moves: 0,
        };
        let mut capsule = TestCapsule {
            height: config.standing_height,
            center: config.standing_center(),
        };
        let mut camera = TestCamera {
            position: Vec3::new(0.0, CAMERA_Y, 0.0),
            rotation: Quat::IDENTITY,
            fov: 90.0,
        };
        let ceiling = TestCeiling { blocked: false };

        let controller = {
            let mut rig = CharacterRig {
                body: &mut body,
                collider: &mut capsule,
                camera: &mut camera,
                headroom: &ceiling,
            };
            FirstPersonController::init(config, &mut rig).unwrap()
        };

        Self {
            controller,
            body,
            capsule,
            camera,
            ceiling,
        }
    }

    fn tick(&mut self, input: InputSample) -> TickReport {
        let mut rig = CharacterRig {
            body: &mut self.body,
            collider: &mut self.capsule,
            camera: &mut self.camera,
            headroom: &self.ceiling,
        };
        self.controller.tick(DT, &input, &mut rig)
    }

    fn run(&mut self, frames: usize, input: InputSample) {
        for _ in 0..frames {
            self.tick(input);
        }
    }

    fn vertical_velocity(&self) -> f32 {
        self.controller.state().move_direction.y
    }

    fn horizontal_speed(&self) -> f32 {
        let v = self.controller.state().move_direction;
        Vec2::new(v.x, v.z).length()
    }
}

fn forward() -> InputSample {
    InputSample {
        axis_vertical: 1.0,
        ..default()
    }
}

fn crouch() -> InputSample {
    InputSample {
        crouch_pressed: true,
        ..default()
    }
}

fn jump() -> InputSample {
    InputSample {
        jump_pressed: true,
        ..default()
    }
}

/// Deterministic pseudo-random look deltas.
fn look_deltas(count: usize) -> Vec<(f32, f32)> {
    let mut seed: u32 = 0x2545_f491;
    (0..count)
        .map(|_| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let a = (seed >> 8) as f32 / (1u32 << 24) as f32;
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let b = (seed >> 8) as f32 / (1u32 << 24) as f32;
            ((a - 0.5) * 2.0e5, (b - 0.5) * 2.0e5)
        })
        .collect()
}

// ==================== Setup ====================

#[test]
fn init_sets_default_fov_and_rest_height() {
    let harness = Harness::new(MovementConfig::default());
    assert_eq!(harness.camera.fov, 60.0);
    assert_eq!(harness.controller.default_camera_y(), CAMERA_Y);
    assert!(!harness.controller.is_crouching());
}

#[test]
fn missing_camera_fails_assembly() {
    let mut body = TestBody {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        grounded: true,
        moves: 0,
    };
    let mut capsule = TestCapsule {
        height: 2.0,
        center: Vec3::ZERO,
    };
    let ceiling = TestCeiling { blocked: false };

    let result = CharacterRig::assemble(
        Some(&mut body as &mut dyn CharacterBody),
        Some(&mut capsule as &mut dyn ColliderExtent),
        None,
        Some(&ceiling as &dyn HeadroomProbe),
    );
    assert!(matches!(result, Err(ControllerError::MissingHandle("camera"))));
}

// ==================== Look ====================

#[test]
fn pitch_stays_clamped_under_huge_deltas() {
    let config = MovementConfig {
        upper_look_limit: 35.0,
        lower_look_limit: 80.0,
        ..default()
    };
    let mut harness = Harness::new(config);

    for (dx, dy) in look_deltas(500) {
        harness.tick(InputSample {
            mouse_delta_x: dx,
            mouse_delta_y: dy,
            ..default()
        });
        let pitch = harness.controller.state().rotation_pitch;
        assert!((-35.0..=80.0).contains(&pitch), "pitch {pitch} escaped");
    }
}

#[test]
fn look_works_during_special_movement() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.controller.set_special_movement(true);

    harness.tick(InputSample {
        axis_vertical: 1.0,
        mouse_delta_x: 10.0,
        mouse_delta_y: 5.0,
        jump_pressed: true,
        ..default()
    });

    assert_eq!(harness.body.moves, 0);
    assert_eq!(harness.controller.state().rotation_pitch, -10.0);
    assert_ne!(harness.body.rotation, Quat::IDENTITY);
    assert_eq!(harness.vertical_velocity(), 0.0);
}

#[test]
fn yaw_accumulates_without_reset() {
    let mut harness = Harness::new(MovementConfig::default());
    let turn = InputSample {
        mouse_delta_x: 45.0,
        ..default()
    };
    // 45 * 2 degrees per frame, two frames make a half turn.
    harness.run(2, turn);

    let facing = harness.body.rotation * Vec3::NEG_Z;
    assert!((facing - Vec3::Z).length() < 1e-4);
}

// ==================== Vertical motion ====================

#[test]
fn gravity_has_no_floor() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.body.position.y = 10_000.0;
    harness.body.grounded = false;

    let mut previous = harness.vertical_velocity();
    for _ in 0..600 {
        harness.tick(InputSample::default());
        let current = harness.vertical_velocity();
        assert!(current < previous);
        assert!((previous - current - 30.0 * DT).abs() < 1e-3);
        previous = current;
    }
    assert!(previous < -299.0);
}

#[test]
fn grounded_jump_sets_exact_impulse() {
    let mut harness = Harness::new(MovementConfig::default());

    let report = harness.tick(jump());
    assert!(report.jumped);
    assert_eq!(harness.vertical_velocity(), 8.0);
    assert_eq!(report.grounded, Some(false));
}

#[test]
fn jump_ignored_while_airborne() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.tick(jump());
    let report = harness.tick(jump());
    assert!(!report.jumped);
    assert!(harness.vertical_velocity() < 8.0);
}

#[test]
fn jump_toggle_disables_jump() {
    let config = MovementConfig {
        can_jump: false,
        ..default()
    };
    let mut harness = Harness::new(config);
    let report = harness.tick(jump());
    assert!(!report.jumped);
    assert_eq!(harness.vertical_velocity(), 0.0);
}

// ==================== Head bob ====================

#[test]
fn headbob_follows_sine_while_walking() {
    let mut harness = Harness::new(MovementConfig::default());

    harness.tick(forward());
    let phase = DT * 14.0;
    let expected = CAMERA_Y + phase.sin() * 0.05;
    assert_eq!(harness.controller.state().bob_timer, phase);
    assert_eq!(harness.camera.position.y, expected);
}

#[test]
fn headbob_freezes_when_movement_stops() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.run(7, forward());
    let frozen_y = harness.camera.position.y;
    let frozen_phase = harness.controller.state().bob_timer;
    assert_ne!(frozen_y, CAMERA_Y);

    harness.tick(InputSample::default());
    assert_eq!(harness.camera.position.y.to_bits(), frozen_y.to_bits());
    assert_eq!(harness.controller.state().bob_timer, frozen_phase);
}

#[test]
fn headbob_freezes_while_airborne() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.run(3, forward());

    harness.tick(InputSample {
        axis_vertical: 1.0,
        jump_pressed: true,
        ..default()
    });
    let frozen_y = harness.camera.position.y;

    harness.tick(forward());
    assert!(!harness.body.grounded);
    assert_eq!(harness.camera.position.y.to_bits(), frozen_y.to_bits());
}

// ==================== Crouch ====================

#[test]
fn crouch_completes_and_toggles_once() {
    let mut harness = Harness::new(MovementConfig::default());

    let report = harness.tick(crouch());
    assert!(report.crouch_started);
    assert!(harness.controller.is_crouch_animating());
    assert!(!harness.controller.is_crouching());

    let mut changes = 0;
    for _ in 0..30 {
        if let Some(crouching) = harness.tick(InputSample::default()).stance_changed {
            assert!(crouching);
            changes += 1;
        }
    }

    assert_eq!(changes, 1);
    assert!(harness.controller.is_crouching());
    assert!(!harness.controller.is_crouch_animating());
    assert_eq!(harness.capsule.height, 0.5);
    assert_eq!(harness.capsule.center, Vec3::new(0.0, 0.5, 0.0));
}

#[test]
fn crouch_retrigger_mid_transition_is_ignored() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.tick(crouch());
    harness.run(3, InputSample::default());

    let before = harness.controller.state().clone();
    let report = harness.tick(crouch());
    assert!(!report.crouch_started);
    assert!(harness.controller.is_crouch_animating());
    assert_eq!(harness.controller.is_crouching(), before.is_crouching);

    harness.run(30, InputSample::default());
    assert!(harness.controller.is_crouching());
    assert_eq!(harness.capsule.height, 0.5);
}

#[test]
fn stand_blocked_by_ceiling_then_retried() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.tick(crouch());
    harness.run(30, InputSample::default());
    assert!(harness.controller.is_crouching());

    harness.ceiling.blocked = true;
    let report = harness.tick(crouch());
    assert!(report.stand_blocked);
    assert!(!report.crouch_started);
    assert!(harness.controller.is_crouching());
    assert!(!harness.controller.is_crouch_animating());
    assert_eq!(harness.capsule.height, 0.5);

    harness.ceiling.blocked = false;
    let report = harness.tick(crouch());
    assert!(report.crouch_started);
    harness.run(30, InputSample::default());
    assert!(!harness.controller.is_crouching());
    assert_eq!(harness.capsule.height, 2.0);
    assert_eq!(harness.capsule.center, Vec3::ZERO);
}

#[test]
fn crouch_requires_ground() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.tick(jump());
    let report = harness.tick(crouch());
    assert!(!report.crouch_started);
}

#[test]
fn crouch_uses_crouch_speed_and_blocks_sprint() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.tick(crouch());
    harness.run(30, InputSample::default());

    harness.tick(InputSample {
        axis_vertical: 1.0,
        sprint_held: true,
        ..default()
    });
    assert!((harness.horizontal_speed() - 1.5).abs() < 1e-5);
}

#[test]
fn crouch_task_advances_while_movement_is_locked() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.tick(crouch());
    harness.controller.set_can_move(false);

    harness.run(30, InputSample::default());
    assert!(harness.controller.is_crouching());
    assert_eq!(harness.body.moves, 1);
}

#[test]
fn crouch_toggle_disables_crouch() {
    let config = MovementConfig {
        can_crouch: false,
        ..default()
    };
    let mut harness = Harness::new(config);

    let report = harness.tick(crouch());
    assert!(!report.crouch_started);
    assert!(!harness.controller.is_crouch_animating());

    harness.run(30, InputSample::default());
    assert!(!harness.controller.is_crouching());
    assert_eq!(harness.capsule.height, 2.0);
    assert_eq!(harness.capsule.center, Vec3::ZERO);
}

// ==================== Gates ====================

#[test]
fn headbob_toggle_keeps_camera_at_rest() {
    let config = MovementConfig {
        can_headbob: false,
        ..default()
    };
    let mut harness = Harness::new(config);

    harness.run(30, forward());
    assert!((harness.horizontal_speed() - 3.0).abs() < 1e-5);
    assert_eq!(harness.camera.position.y, CAMERA_Y);
    assert_eq!(harness.controller.state().bob_timer, 0.0);
}

#[test]
fn locked_movement_ignores_look_jump_and_sprint() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.controller.set_can_move(false);

    let report = harness.tick(InputSample {
        axis_vertical: 1.0,
        mouse_delta_x: 10.0,
        mouse_delta_y: 5.0,
        sprint_held: true,
        jump_pressed: true,
        ..default()
    });

    assert!(!report.jumped);
    assert_eq!(report.grounded, None);
    assert_eq!(harness.controller.state().rotation_pitch, 0.0);
    assert_eq!(harness.body.rotation, Quat::IDENTITY);
    assert_eq!(harness.camera.rotation, Quat::IDENTITY);
    assert_eq!(harness.vertical_velocity(), 0.0);
    assert_eq!(harness.camera.fov, 60.0);
    assert_eq!(harness.body.moves, 0);
}

// ==================== Reset ====================

#[test]
fn reset_restores_spawn_state() {
    let mut harness = Harness::new(MovementConfig::default());
    harness.tick(crouch());
    harness.run(30, forward());
    harness.tick(InputSample {
        mouse_delta_y: 20.0,
        ..default()
    });

    let mut rig = CharacterRig {
        body: &mut harness.body,
        collider: &mut harness.capsule,
        camera: &mut harness.camera,
        headroom: &harness.ceiling,
    };
    harness.controller.reset(&mut rig);

    assert_eq!(harness.controller.state(), &CharacterRuntimeState::default());
    assert_eq!(harness.capsule.height, 2.0);
    assert_eq!(harness.camera.position.y, CAMERA_Y);
    assert_eq!(harness.camera.fov, 60.0);
}

// ==================== End to end ====================

#[test]
fn sprint_and_jump_scenario() {
    let config = MovementConfig {
        walk_speed: 3.0,
        sprint_speed: 6.0,
        jump_force: 8.0,
        gravity: 30.0,
        ..default()
    };
    let mut harness = Harness::new(config);
    let sprint = InputSample {
        axis_vertical: 1.0,
        sprint_held: true,
        ..default()
    };

    harness.run(10, sprint);
    assert!((harness.horizontal_speed() - 6.0).abs() < 1e-5);
    assert!(harness.camera.fov > 60.0);
    assert!(harness.camera.fov <= 70.0);

    harness.tick(InputSample {
        jump_pressed: true,
        ..sprint
    });
    assert_eq!(harness.vertical_velocity(), 8.0);

    let mut previous = 8.0;
    for _ in 0..5 {
        harness.tick(sprint);
        let current = harness.vertical_velocity();
        assert!((previous - current - 30.0 * DT).abs() < 1e-5);
        previous = current;
    }
    assert!((harness.horizontal_speed() - 6.0).abs() < 1e-5);
}

#[test]
fn fov_settles_back_after_sprint() {
    let mut harness = Harness::new(MovementConfig::default());
    let sprint = InputSample {
        axis_vertical: 1.0,
        sprint_held: true,
        ..default()
    };

    harness.run(200, sprint);
    assert_eq!(harness.camera.fov, 70.0);

    harness.run(200, forward());
    assert_eq!(harness.camera.fov, 60.0);
}
