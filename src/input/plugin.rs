//! Input plugin - loads bindings and samples devices before gameplay runs.

use bevy::prelude::*;

use super::actions::ActionState;
use super::bindings::load_input_bindings;
use super::sampler::sample_actions;

/// System set that fills [`ActionState`] for the frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSet;

/// Input plugin - binding table and action sampling.
pub struct ActionInputPlugin;

impl Plugin for ActionInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionState>()
            .add_systems(PreStartup, load_input_bindings)
            .add_systems(PreUpdate, sample_actions.in_set(InputSet).after(bevy::input::InputSystem));
    }
}
