//! Player plugin - commands, casting input and session end.

use bevy::prelude::*;

use super::actions;

/// Player plugin - handles player commands and the restart countdown.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        actions::setup_player_systems(app);
    }
}
