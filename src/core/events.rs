//! Global events used for cross-system communication.
//!
//! The character driver reports what happened during a tick through these,
//! so feedback systems (logging, audio, UI) stay decoupled from movement.

use bevy::prelude::*;

/// Sent when a character leaves the ground from a jump.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jumped {
    pub entity: Entity,
}

/// Sent when a crouch or stand transition completes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StanceChanged {
    pub entity: Entity,
    /// New stance: true when now crouching
    pub crouching: bool,
}

/// Sent when standing up was refused because of a low ceiling.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandBlocked {
    pub entity: Entity,
}

/// Sent when the player asks to restart from the spawn point.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartRequested {
    pub entity: Entity,
}
