//! Game state definitions that control when the character updates.
//!
//! Movement and look only run in `InGame`. Pausing freezes the character
//! and releases the cursor.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while config and bindings are read
/// - Enter `InGame` once the player has spawned
/// - `Paused` freezes gameplay but keeps the world visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Reading config files and building the course
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
