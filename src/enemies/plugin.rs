//! Enemy plugin - registers all monster and spawn director systems.

use bevy::prelude::*;

use super::ai;
use super::spawning;
use crate::combat::CombatSet;
use crate::core::GameState;

/// Enemy plugin - handles the spawn director, monster AI and corpses.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            // One director per session unless the host placed its own
            .add_systems(OnEnter(GameState::InGame), spawning::setup_spawn_director)
            // Targeting, spawning and pursuit run before combat triggers
            .add_systems(
                Update,
                (
                    ai::resolve_primary_targets,
                    spawning::run_spawn_directors,
                    spawning::settle_spawned_monsters,
                    ai::pursue_target,
                    ai::trigger_monster_casts,
                )
                    .chain()
                    .in_set(CombatSet::Input),
            )
            // Death follow-up and corpse removal
            .add_systems(
                Update,
                (ai::handle_monster_deaths, ai::despawn_corpses)
                    .chain()
                    .in_set(CombatSet::Cleanup),
            );
    }
}
