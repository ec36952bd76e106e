//! Spawn director systems and monster construction.

use bevy::log::warn_once;
use bevy::prelude::*;

use super::components::{Monster, PrimaryTarget};
use super::data::MonsterArchetype;
use super::director::{difficulty_bonus, pick_spawn_position, surface_relocation, SpawnDirector};
use crate::combat::{combatant_bundle, CastController, Dead, Faction};
use crate::core::{flat_look_rotation, EffectKind, PresentationCue, SessionClock, SimRng, SimulationConfig};
use crate::player::Player;
use crate::world::{NavMesh, SteeringAgent};

/// Place a spawn director unless the host already created one.
pub fn setup_spawn_director(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<SimulationConfig>,
    existing: Query<(), With<SpawnDirector>>,
) {
    if !existing.is_empty() {
        return;
    }

    let spawner = config.spawner.clone();
    let position = spawner.director_position();
    commands.spawn((
        Name::new("Spawn Director"),
        Transform::from_translation(position),
        SpawnDirector::new(spawner, time.elapsed_secs()),
        PrimaryTarget::default(),
    ));
    info!("Spawn director placed at {}", position);
}

/// Spawn a monster at `position`, facing `face_toward` when known.
pub fn spawn_monster(
    commands: &mut Commands,
    archetype: &MonsterArchetype,
    position: Vec3,
    face_toward: Option<Vec3>,
    target: Option<Entity>,
    now: f32,
) -> Entity {
    let rotation = face_toward
        .and_then(|point| flat_look_rotation(position, point))
        .unwrap_or(Quat::IDENTITY);

    commands
        .spawn((
            Name::new("Monster"),
            Monster,
            Transform::from_translation(position).with_rotation(rotation),
            combatant_bundle(&archetype.profile, Faction::Monster, archetype.body_radius),
            PrimaryTarget(target),
        ))
        // A fresh monster holds still before its first pursuit
        .insert(CastController::holding_movement_until(now + archetype.initial_move_delay))
        .id()
}

/// Run every director's wave decision and any due spawn burst.
pub fn run_spawn_directors(
    mut commands: Commands,
    time: Res<Time>,
    clock: Res<SessionClock>,
    config: Res<SimulationConfig>,
    nav: Option<Res<NavMesh>>,
    mut rng: ResMut<SimRng>,
    mut directors: Query<(&Transform, &PrimaryTarget, &mut SpawnDirector)>,
    players: Query<&Transform, With<Player>>,
    alive: Query<(), (With<Monster>, Without<Dead>)>,
    mut cues: EventWriter<PresentationCue>,
) {
    let Some(nav) = nav.as_deref() else {
        warn_once!("No NavMesh resource; spawn directors are idle");
        return;
    };

    let now = time.elapsed_secs();
    let rng = &mut **rng;

    for (transform, target, mut director) in directors.iter_mut() {
        director.purge(|entity| alive.contains(entity));

        let origin = transform.translation;
        let target_entity = target.0;
        let target_position = target_entity.and_then(|entity| players.get(entity).ok()).map(|t| t.translation);
        let near = target_position
            .is_some_and(|position| position.distance(origin) <= director.config.near_player_radius);

        let bonus = difficulty_bonus(
            clock.elapsed(now),
            director.config.bonus_per_minute,
            director.config.cap_bonus,
        );

        if let Some(size) = director.decide(now, near, bonus, rng) {
            info!(
                "Wave of {} started ({}, bonus {}, {} alive)",
                size,
                if near { "near" } else { "far" },
                bonus,
                director.live_count()
            );
        }

        let Some(burst) = director.poll_wave(now, rng) else {
            continue;
        };

        for _ in 0..burst {
            let Some(position) = pick_spawn_position(&director.config, origin, &**nav, rng) else {
                debug!("No navigable spawn position found, skipping placement");
                continue;
            };

            let monster = spawn_monster(
                &mut commands,
                &config.monster,
                position,
                target_position,
                target_entity,
                now,
            );
            director.track(monster);

            cues.send(PresentationCue::VisualEffect {
                kind: EffectKind::Spawn,
                position,
                rotation: Quat::IDENTITY,
                scale: 1.0,
                duration: 1.0,
            });
        }

        debug!(
            "Burst of {} placed, {} alive",
            burst,
            director.live_count()
        );
    }
}

/// Warp monsters spawned off the navigable surface back onto it.
pub fn settle_spawned_monsters(
    config: Res<SimulationConfig>,
    nav: Option<Res<NavMesh>>,
    mut spawned: Query<(Entity, &mut Transform, &mut SteeringAgent), Added<Monster>>,
) {
    let Some(nav) = nav.as_deref() else {
        return;
    };

    for (entity, mut transform, mut agent) in spawned.iter_mut() {
        if agent.is_on_navigable_surface(transform.translation, nav) {
            continue;
        }
        match surface_relocation(transform.translation, config.spawner.nav_sample_distance, &**nav) {
            Some(point) => {
                debug!("{:?} spawned off the surface, warping to {}", entity, point);
                agent.warp_to(&mut transform, point);
            }
            None => warn!("{:?} spawned off the surface with nothing walkable nearby", entity),
        }
    }
}
