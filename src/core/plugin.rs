//! Core plugin that sets up game states, events, and pause handling.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - Global events (Jumped, StanceChanged, StandBlocked, RestartRequested)
/// - Pause toggling and event logging
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<Jumped>()
            .add_event::<StanceChanged>()
            .add_event::<StandBlocked>()
            .add_event::<RestartRequested>()

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused)))
            )

            .add_systems(Update, log_character_events);
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

fn log_character_events(
    mut jumped: EventReader<Jumped>,
    mut stance: EventReader<StanceChanged>,
    mut blocked: EventReader<StandBlocked>,
) {
    for event in jumped.read() {
        debug!("{:?} jumped", event.entity);
    }
    for event in stance.read() {
        let stance = if event.crouching { "crouching" } else { "standing" };
        info!("{:?} is now {}", event.entity, stance);
    }
    for event in blocked.read() {
        info!("{:?} cannot stand up here", event.entity);
    }
}
