//! World plugin - navigation surface and steering.

use bevy::prelude::*;

use super::navigation::{FlatArena, NavMesh};
use super::steering::{drive_steering_agents, report_locomotion};
use crate::combat::CombatSet;
use crate::core::GameState;

/// World plugin - installs a default arena if the host provides no
/// navigation backend, and moves steering agents every tick.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<NavMesh>() {
            info!("No navigation backend supplied, using a flat arena");
            app.insert_resource(NavMesh::new(FlatArena::default()));
        }

        app.add_systems(
            Update,
            (drive_steering_agents, report_locomotion)
                .chain()
                .after(CombatSet::Cleanup)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
