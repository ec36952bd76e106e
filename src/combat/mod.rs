//! Combat module - ability casting, melee hits, damage and death.

mod cast;
mod components;
mod data;
mod hits;
mod plugin;
mod systems;

pub use cast::{CastController, CastProgress, CastRejected, CastSession};
pub use components::*;
pub use data::{AbilityDefinition, AbilityId, AbilitySet, CombatantProfile, Targeting};
pub use hits::{instant_hit_point, instant_point_hits, HitCandidate, HurtBox};
pub use plugin::{combatant_bundle, CombatPlugin};
pub use systems::{setup_combat_systems, CombatSet};
