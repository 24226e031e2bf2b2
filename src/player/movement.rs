//! First-person player spawning and per-frame controller driving.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::adapters::PlayerParts;
use super::components::*;
use crate::controller::{FirstPersonController, InputSampler, MovementConfig};
use crate::core::{GameState, Jumped, RestartRequested, StanceChanged, StandBlocked};
use crate::input::{Action, ActionState};

type BodyQuery<'w, 's, T> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Transform,
        &'static mut KinematicCharacterController,
        Option<&'static KinematicCharacterControllerOutput>,
        &'static mut CapsuleExtent,
        &'static Children,
        T,
    ),
    (With<Player>, Without<PlayerCamera>),
>;

type CameraQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, &'static mut Projection),
    (With<PlayerCamera>, Without<Player>),
>;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<SpawnPoint>()
        .add_systems(Startup, spawn_configured_player)
        .add_systems(
            Update,
            initialize_controllers.run_if(in_state(GameState::Loading)),
        )
        .add_systems(OnEnter(GameState::InGame), grab_cursor)
        .add_systems(OnExit(GameState::InGame), release_cursor)
        .add_systems(
            Update,
            (
                request_restart,
                apply_restart,
                drive_controllers,
                sync_capsule_shape,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

/// Grab and hide cursor when entering gameplay.
fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

fn spawn_configured_player(mut commands: Commands, spawn: Res<SpawnPoint>) {
    let config = MovementConfig::load();
    spawn_player(&mut commands, spawn.0, config);
}

/// Find the camera child of a player and borrow its transform and projection.
fn camera_parts<'a>(
    children: &Children,
    cameras: &'a mut CameraQuery,
) -> Option<(&'a mut Transform, &'a mut Projection)> {
    let camera = children.iter().copied().find(|child| cameras.contains(*child))?;
    let (transform, projection) = cameras.get_mut(camera).ok()?;
    Some((transform.into_inner(), projection.into_inner()))
}

/// Build controllers for newly spawned players, then start the game.
///
/// A player whose rig is incomplete is logged and left without a controller.
pub fn initialize_controllers(
    mut commands: Commands,
    rapier_context: Query<&RapierContext>,
    mut players: BodyQuery<&PendingController>,
    mut cameras: CameraQuery,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, mut transform, mut mover, output, mut extent, children, pending) in
        players.iter_mut()
    {
        let mut working = extent.clone();
        let parts = PlayerParts {
            entity,
            transform: &mut transform,
            mover: &mut mover,
            grounded: output.is_some_and(|o| o.grounded),
            extent: &mut working,
            camera: camera_parts(children, &mut cameras),
            context: Some(context),
        };
        let config = pending.config.clone();

        match parts.with_rig(|rig| FirstPersonController::init(config, rig)) {
            Ok(Ok(controller)) => {
                info!("Player controller ready for {:?}", entity);
                commands
                    .entity(entity)
                    .insert(PlayerController(controller))
                    .remove::<PendingController>();
                next_state.set(GameState::InGame);
            }
            Ok(Err(e)) | Err(e) => {
                error!("Failed to initialize controller for {:?}: {}", entity, e);
                commands.entity(entity).remove::<PendingController>();
            }
        }
        extent.set_if_neq(working);
    }
}

/// Tick every player's controller with this frame's input.
pub fn drive_controllers(
    time: Res<Time>,
    actions: Res<ActionState>,
    rapier_context: Query<&RapierContext>,
    mut players: BodyQuery<&mut PlayerController>,
    mut cameras: CameraQuery,
    mut jumped: EventWriter<Jumped>,
    mut stance: EventWriter<StanceChanged>,
    mut blocked: EventWriter<StandBlocked>,
) {
    let delta = time.delta_secs();
    let input = actions.sample();
    let context = rapier_context.get_single().ok();

    for (entity, mut transform, mut mover, output, mut extent, children, mut controller) in
        players.iter_mut()
    {
        let mut working = extent.clone();
        let parts = PlayerParts {
            entity,
            transform: &mut transform,
            mover: &mut mover,
            grounded: output.is_some_and(|o| o.grounded),
            extent: &mut working,
            camera: camera_parts(children, &mut cameras),
            context,
        };

        match parts.with_rig(|rig| controller.0.tick(delta, &input, rig)) {
            Ok(report) => {
                if report.crouch_started {
                    debug!(
                        "{:?} started a stance change (grounded: {:?})",
                        entity, report.grounded
                    );
                }
                if report.jumped {
                    jumped.send(Jumped { entity });
                }
                if let Some(crouching) = report.stance_changed {
                    stance.send(StanceChanged { entity, crouching });
                }
                if report.stand_blocked {
                    blocked.send(StandBlocked { entity });
                }
            }
            Err(e) => error!("Skipping controller tick for {:?}: {}", entity, e),
        }
        lift_out_of_floor(&mut transform, &extent, &working);
        extent.set_if_neq(working);
    }
}

/// Raise the body by however far the capsule bottom dropped.
///
/// Growing the capsule downward would otherwise start it inside the floor,
/// and the character controller does not resolve existing overlaps.
fn lift_out_of_floor(transform: &mut Transform, previous: &CapsuleExtent, next: &CapsuleExtent) {
    let drop = previous.bottom() - next.bottom();
    if drop > 0.0 {
        transform.translation.y += drop;
    }
}

/// Turn the restart action into a request for every controlled player.
pub fn request_restart(
    actions: Res<ActionState>,
    players: Query<Entity, With<PlayerController>>,
    mut requests: EventWriter<RestartRequested>,
) {
    if !actions.just_pressed(Action::Restart) {
        return;
    }
    for entity in players.iter() {
        requests.send(RestartRequested { entity });
    }
}

/// Move requested players back to the spawn point and reset their controllers.
pub fn apply_restart(
    mut requests: EventReader<RestartRequested>,
    spawn: Res<SpawnPoint>,
    rapier_context: Query<&RapierContext>,
    mut players: BodyQuery<&mut PlayerController>,
    mut cameras: CameraQuery,
) {
    let context = rapier_context.get_single().ok();

    for request in requests.read() {
        let Ok((entity, mut transform, mut mover, output, mut extent, children, mut controller)) =
            players.get_mut(request.entity)
        else {
            warn!("Restart requested for unknown player {:?}", request.entity);
            continue;
        };

        *transform = Transform::from_translation(spawn.0);
        mover.translation = None;

        let mut working = extent.clone();
        let parts = PlayerParts {
            entity,
            transform: &mut transform,
            mover: &mut mover,
            grounded: output.is_some_and(|o| o.grounded),
            extent: &mut working,
            camera: camera_parts(children, &mut cameras),
            context,
        };

        match parts.with_rig(|rig| controller.0.reset(rig)) {
            Ok(()) => info!("Player {:?} restarted at {:?}", entity, spawn.0),
            Err(e) => error!("Failed to restart {:?}: {}", entity, e),
        }
        extent.set_if_neq(working);
    }
}

/// Copy capsule changes into the character controller's collision shape.
pub fn sync_capsule_shape(
    mut players: Query<(&CapsuleExtent, &mut KinematicCharacterController), Changed<CapsuleExtent>>,
) {
    for (extent, mut mover) in players.iter_mut() {
        mover.custom_shape = Some(extent.shape());
    }
}

/// Spawn the player entity with camera.
///
/// The controller itself is built on the first update, once the camera child exists.
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: MovementConfig) -> Entity {
    let extent = CapsuleExtent::standing(&config);
    let fov = config.fov_default;

    let player = commands
        .spawn((
            Player,
            PendingController { config },
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            KinematicCharacterController {
                custom_shape: Some(extent.shape()),
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.4),
                    min_width: CharacterLength::Absolute(0.3),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                ..default()
            },
            extent,
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: fov.to_radians(),
                ..default()
            }),
            PlayerCamera,
            // Eye level relative to the body origin
            Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
        ));
    });

    player
}
