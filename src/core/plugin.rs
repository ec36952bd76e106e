//! Core plugin that sets up session state, events and shared resources.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use super::data::SimulationConfig;
use super::events::*;
use super::session::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The session state (InGame, GameOver)
/// - Global events (DamageEvent, DeathEvent, PresentationCue, SessionEnded)
/// - The seeded RNG, session clock and tuning resources, unless the host
///   already inserted its own
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Headless apps built from MinimalPlugins don't carry the state machinery
        if !app.is_plugin_added::<StatesPlugin>() {
            app.add_plugins(StatesPlugin);
        }

        app.init_state::<GameState>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<PresentationCue>()
            .add_event::<SessionEnded>()
            .init_resource::<SimRng>()
            .init_resource::<SessionClock>()
            .init_resource::<SimulationConfig>()
            .add_systems(OnEnter(GameState::InGame), reset_session_clock)
            .add_systems(OnEnter(GameState::GameOver), announce_game_over);
    }
}

fn announce_game_over(time: Res<Time>) {
    info!("Session over at t={:.2}, waiting for level restart", time.elapsed_secs());
}
