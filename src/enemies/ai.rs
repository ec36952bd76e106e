//! Monster behaviour: target acquisition, pursuit, attack triggers and
//! corpse cleanup.

use bevy::log::warn_once;
use bevy::prelude::*;

use super::components::{CorpseTimer, Monster, PrimaryTarget};
use crate::combat::{AbilitySet, CastController, CastRequest, CombatStats, Dead, DeathEvent};
use crate::core::SimulationConfig;
use crate::player::Player;
use crate::world::SteeringAgent;

/// Point every `PrimaryTarget` at the player, re-acquiring stale handles.
pub fn resolve_primary_targets(
    players: Query<Entity, With<Player>>,
    mut seekers: Query<&mut PrimaryTarget>,
) {
    let player = players.iter().next();
    if player.is_none() {
        warn_once!("No player in the world; monsters and spawners stay idle");
    }

    for mut target in seekers.iter_mut() {
        let valid = target.0.is_some_and(|entity| players.contains(entity));
        if !valid && target.0 != player {
            target.0 = player;
        }
    }
}

/// Move monsters toward their living target once their movement lockout
/// has passed.
pub fn pursue_target(
    time: Res<Time>,
    mut monsters: Query<
        (&CastController, &PrimaryTarget, &mut SteeringAgent),
        (With<Monster>, Without<Dead>),
    >,
    targets: Query<&Transform, (With<Player>, Without<Dead>)>,
) {
    let now = time.elapsed_secs();

    for (controller, target, mut agent) in monsters.iter_mut() {
        let Some(target_transform) = target.0.and_then(|entity| targets.get(entity).ok()) else {
            continue;
        };

        if controller.can_move(now) {
            agent.set_destination(target_transform.translation);
        }
    }
}

/// Request a cast when the target is within attack range.
pub fn trigger_monster_casts(
    time: Res<Time>,
    monsters: Query<
        (
            Entity,
            &Transform,
            &CastController,
            &CombatStats,
            &AbilitySet,
            &PrimaryTarget,
        ),
        (With<Monster>, Without<Dead>),
    >,
    targets: Query<&Transform, (With<Player>, Without<Dead>)>,
    mut requests: EventWriter<CastRequest>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, controller, stats, abilities, target) in monsters.iter() {
        let Some(target_transform) = target.0.and_then(|entity| targets.get(entity).ok()) else {
            continue;
        };
        let Some(ability) = abilities.primary() else {
            continue;
        };

        let distance = transform.translation.distance(target_transform.translation);
        if distance < stats.attack_range && controller.can_cast(now) {
            requests.send(CastRequest {
                caster: entity,
                ability: ability.id,
                target_point: target_transform.translation,
            });
        }
    }
}

/// Start the corpse timer for monsters that just died.
pub fn handle_monster_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    monsters: Query<(), With<Monster>>,
    config: Res<SimulationConfig>,
) {
    for event in death_events.read() {
        if monsters.contains(event.entity) {
            commands
                .entity(event.entity)
                .insert(CorpseTimer::new(config.monster.corpse_delay));
        }
    }
}

/// Despawn corpses after their grace period.
///
/// The grace period starts counting on the tick after death.
pub fn despawn_corpses(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut CorpseTimer)>,
) {
    for (entity, mut corpse_timer) in query.iter_mut() {
        if corpse_timer.is_added() {
            continue;
        }
        corpse_timer.0.tick(time.delta());

        if corpse_timer.0.finished() {
            debug!("Removing corpse {:?}", entity);
            commands.entity(entity).despawn_recursive();
        }
    }
}
