//! Combat systems - cast triggers, resolution, damage and death.

use bevy::log::warn_once;
use bevy::prelude::*;
use std::collections::HashSet;

use super::cast::CastController;
use super::components::*;
use super::data::{AbilitySet, Targeting};
use super::hits::{instant_hit_point, instant_point_hits, HitCandidate, HurtBox};
use crate::core::{flat_forward, flat_look_rotation, smooth_toward, EffectKind, GameState, PresentationCue};
use crate::world::SteeringAgent;

/// System set ordering for combat.
///
/// Trigger sources (player commands, monster proximity) run in `Input`,
/// casts start and resolve in `Action`, damage lands in `Damage`, and
/// per-faction death follow-up runs in `Cleanup`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Action,
    Damage,
    Cleanup,
}

/// Living damage targets as seen by hit queries.
type TargetQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Transform, &'static BodyRadius, &'static Faction),
    Without<Dead>,
>;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_event::<CastRequest>()
        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Input,
                CombatSet::Action,
                CombatSet::Damage,
                CombatSet::Cleanup,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        // Action systems
        .add_systems(
            Update,
            (
                begin_casts,
                advance_casts,
                track_hurtbox_overlaps,
                turn_toward_cast_targets,
            )
                .chain()
                .in_set(CombatSet::Action),
        )
        // Damage systems
        .add_systems(
            Update,
            (apply_damage, handle_deaths)
                .chain()
                .in_set(CombatSet::Damage),
        );
}

/// Opposing, living candidates for a hit query.
fn opposing_candidates(targets: &TargetQuery, caster: Entity, faction: Faction) -> Vec<HitCandidate> {
    targets
        .iter()
        .filter(|(entity, _, _, other)| *entity != caster && faction.opposes(**other))
        .map(|(entity, transform, radius, _)| HitCandidate {
            entity,
            position: transform.translation,
            radius: radius.0,
        })
        .collect()
}

/// Opposing entities currently overlapping `hurtbox`.
fn hurtbox_overlaps(
    targets: &TargetQuery,
    owner: Entity,
    faction: Faction,
    transform: &Transform,
    hurtbox: &HurtBox,
) -> Vec<Entity> {
    opposing_candidates(targets, owner, faction)
        .into_iter()
        .filter(|c| hurtbox.overlaps(transform, c.position, c.radius))
        .map(|c| c.entity)
        .collect()
}

/// Start casts requested this tick. Requests for dead, busy or cooling-down
/// casters are dropped.
fn begin_casts(
    time: Res<Time>,
    mut requests: EventReader<CastRequest>,
    mut casters: Query<
        (
            &Transform,
            &mut CastController,
            &CombatStats,
            &AbilitySet,
            Option<&mut SteeringAgent>,
        ),
        Without<Dead>,
    >,
    mut cues: EventWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        let Ok((transform, mut controller, stats, abilities, steering)) =
            casters.get_mut(request.caster)
        else {
            continue;
        };

        let Some(ability) = abilities.get(request.ability) else {
            warn!("{:?} has no ability {:?}", request.caster, request.ability);
            continue;
        };

        match controller.begin(now, ability, stats.cast_duration(), request.target_point) {
            Ok(session) => {
                debug!(
                    "{:?} casting {:?}: lands t={:.2}, ends t={:.2}",
                    request.caster, session.ability.id, session.resolves_at, session.ends_at
                );
            }
            Err(reason) => {
                trace!("{:?} cast ignored: {}", request.caster, reason);
                continue;
            }
        }

        match steering {
            Some(mut agent) => agent.halt(transform.translation),
            None => warn_once!("Caster {:?} has no steering agent", request.caster),
        }

        cues.send(PresentationCue::AttackAnimation {
            entity: request.caster,
            ability: request.ability,
            speed: stats.attacks_per_second,
        });
    }
}

/// Open hurtboxes and resolve casts whose timestamps have been reached.
fn advance_casts(
    time: Res<Time>,
    mut casters: Query<
        (
            Entity,
            &Transform,
            &mut CastController,
            &CombatStats,
            &Faction,
            Option<&mut HurtBox>,
            Option<&mut SteeringAgent>,
        ),
        Without<Dead>,
    >,
    targets: TargetQuery,
    mut damage_events: EventWriter<DamageEvent>,
    mut cues: EventWriter<PresentationCue>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, mut controller, stats, faction, mut hurtbox, mut steering) in
        casters.iter_mut()
    {
        let progress = controller.advance(now);
        let opened_this_tick = progress.activated.is_some();

        if let Some(session) = progress.activated {
            if let Targeting::WindowedHitbox { hitbox_strength, .. } = session.ability.targeting {
                match hurtbox.as_deref_mut() {
                    Some(hurtbox) => {
                        let inside = hurtbox_overlaps(&targets, entity, *faction, transform, hurtbox);
                        hurtbox.open(hitbox_strength, inside);
                    }
                    None => warn_once!("{:?} cast a windowed ability without a hurtbox", entity),
                }

                if let Some(duration) = session.ability.effect_duration {
                    cues.send(PresentationCue::VisualEffect {
                        kind: EffectKind::Slash,
                        position: transform.translation,
                        rotation: transform.rotation,
                        scale: 1.0 + hitbox_strength / 2.0,
                        duration,
                    });
                }
            }
        }

        let Some(session) = progress.finished else {
            continue;
        };

        match session.ability.targeting {
            Targeting::InstantPoint => {
                let hit_point =
                    instant_hit_point(transform.translation, flat_forward(transform), stats.attack_range);
                let hits = instant_point_hits(
                    hit_point,
                    stats.attack_range,
                    opposing_candidates(&targets, entity, *faction),
                );
                for target in hits {
                    damage_events.send(DamageEvent {
                        target,
                        source: entity,
                        amount: stats.attack_damage,
                    });
                }

                if let Some(duration) = session.ability.effect_duration {
                    cues.send(PresentationCue::VisualEffect {
                        kind: EffectKind::Slash,
                        position: transform.translation,
                        rotation: transform.rotation,
                        scale: 1.0,
                        duration,
                    });
                }
            }
            Targeting::WindowedHitbox {
                damage_multiplier, ..
            } => {
                if let Some(hurtbox) = hurtbox.as_deref_mut() {
                    // A tick long enough to span the whole window still samples the grown box once
                    if opened_this_tick {
                        let inside = hurtbox_overlaps(&targets, entity, *faction, transform, hurtbox);
                        hurtbox.observe(inside);
                    }
                    let amount = damage_multiplier * stats.attack_damage;
                    for target in hurtbox.close() {
                        damage_events.send(DamageEvent {
                            target,
                            source: entity,
                            amount,
                        });
                    }
                }
                if let Some(agent) = steering.as_deref_mut() {
                    agent.halt(transform.translation);
                }
            }
        }
    }
}

/// Feed open hurtboxes the opposing entities currently inside them.
fn track_hurtbox_overlaps(
    mut owners: Query<(Entity, &Transform, &Faction, &mut HurtBox), Without<Dead>>,
    targets: TargetQuery,
) {
    for (entity, transform, faction, mut hurtbox) in owners.iter_mut() {
        if !hurtbox.enabled {
            continue;
        }
        let inside = hurtbox_overlaps(&targets, entity, *faction, transform, &hurtbox);
        hurtbox.observe(inside);
    }
}

/// Turn casters toward the point captured when their cast started.
fn turn_toward_cast_targets(
    time: Res<Time>,
    mut casters: Query<(&mut Transform, &CastController, &CombatStats), Without<Dead>>,
) {
    let dt = time.delta_secs();

    for (mut transform, controller, stats) in casters.iter_mut() {
        let Some(session) = controller.session() else {
            continue;
        };
        let Some(look) = flat_look_rotation(transform.translation, session.target_point) else {
            continue;
        };
        transform.rotation = smooth_toward(transform.rotation, look, stats.turning_rate, dt);
    }
}

/// Apply damage to entities.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Option<&Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
    mut cues: EventWriter<PresentationCue>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };
        if dead.is_some() {
            continue;
        }

        if health.take_damage(event.amount) > 0.0 {
            cues.send(PresentationCue::HealthChanged {
                entity: event.target,
                fraction: health.fraction(),
            });
        }

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Cancel casts, stop movement and play the death cue for new deaths.
fn handle_deaths(
    mut death_events: EventReader<DeathEvent>,
    mut combatants: Query<(
        &Transform,
        Option<&mut CastController>,
        Option<&mut HurtBox>,
        Option<&mut SteeringAgent>,
    )>,
    mut cues: EventWriter<PresentationCue>,
) {
    for event in death_events.read() {
        info!("{:?} killed by {:?}", event.entity, event.killed_by);

        let Ok((transform, controller, hurtbox, steering)) = combatants.get_mut(event.entity) else {
            continue;
        };

        if let Some(cancelled) = controller.and_then(|mut c| c.cancel()) {
            debug!(
                "{:?} died mid-cast, {:?} cancelled",
                event.entity, cancelled.ability.id
            );
        }

        // Whatever the hurtbox collected is discarded with the cast
        if let Some(mut hurtbox) = hurtbox {
            if hurtbox.enabled {
                hurtbox.close();
            }
        }

        if let Some(mut agent) = steering {
            agent.halt(transform.translation);
            agent.set_enabled(false);
        }

        cues.send(PresentationCue::DeathAnimation {
            entity: event.entity,
        });
    }
}
