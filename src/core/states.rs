//! Session state definitions that gate the simulation.
//!
//! Every gameplay system runs only while the session is `InGame`. When the
//! player has been dead long enough the session moves to `GameOver`, which is
//! the point where the host is expected to reload the level.

use bevy::prelude::*;

/// Session flow.
///
/// - Start in `InGame`: combatants act, the spawn director paces waves
/// - Move to `GameOver` once the restart delay after player death elapses
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Active simulation
    #[default]
    InGame,
    /// Player died and the restart notice has been emitted
    GameOver,
}
