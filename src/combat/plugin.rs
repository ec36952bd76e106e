//! Combat plugin - casting, hit resolution and damage.

use bevy::prelude::*;

use super::cast::CastController;
use super::components::*;
use super::data::{AbilitySet, CombatantProfile};
use super::systems;
use crate::world::SteeringAgent;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}

/// Components every combatant carries, built from its profile.
///
/// Casters with windowed abilities also need a `HurtBox`.
pub fn combatant_bundle(profile: &CombatantProfile, faction: Faction, body_radius: f32) -> impl Bundle {
    (
        Health::new(profile.max_health),
        CombatStats::from_profile(profile),
        AbilitySet(profile.abilities.clone()),
        CastController::default(),
        SteeringAgent::new(profile.movement_speed),
        BodyRadius(body_radius),
        faction,
    )
}
