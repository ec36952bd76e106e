//! Ashen Horde - gameplay simulation for a wave-based melee action game.
//!
//! A player fights an ever-growing horde of monsters. The simulation is
//! headless: presentation (animation, effects, health bars) is reduced to
//! `PresentationCue` events, and pathfinding sits behind the
//! `NavigationSurface` trait.
//!
//! # Architecture
//!
//! The simulation is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Session states, global events, RNG, clock and tuning data
//! - **Combat**: Ability casting, melee hit resolution, damage and death
//! - **Player**: Player commands, movement lockout, session end
//! - **Enemies**: Monster AI and the wave-spawning director
//! - **World**: Navigation surface and steering agents
//! - **Headless**: App construction and the command-line runner

pub mod combat;
pub mod core;
pub mod enemies;
pub mod headless;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main simulation plugin that adds all sub-plugins.
pub struct AshenHordePlugin;

impl Plugin for AshenHordePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combat systems (owns the system set ordering)
            .add_plugins(combat::CombatPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}
