//! Shared helpers for headless integration tests.

#![allow(dead_code, unused_imports)]

use ashen_horde::combat::{BodyRadius, Faction, Health};
use ashen_horde::core::{SessionEnded, SimulationConfig};
use ashen_horde::enemies::spawn_monster;
use ashen_horde::headless::create_headless_app;
pub use ashen_horde::headless::{advance_to, advance_until};
use ashen_horde::player::spawn_player;
use bevy::prelude::*;

pub const TICK_HZ: f64 = 60.0;

/// Tuning with the spawn director switched off.
pub fn quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.spawner.max_alive = 0;
    config
}

/// Headless app running on `config`.
pub fn app_with(config: SimulationConfig, seed: u64) -> App {
    app_at_rate(config, seed, TICK_HZ)
}

/// Headless app running on `config` at `tick_hz` updates per second.
pub fn app_at_rate(config: SimulationConfig, seed: u64, tick_hz: f64) -> App {
    let mut app = create_headless_app(seed, tick_hz);
    app.insert_resource(config)
        .init_resource::<SessionEndCount>()
        .add_systems(Update, count_session_ends);
    app
}

pub fn now(app: &App) -> f32 {
    app.world().resource::<Time>().elapsed_secs()
}

pub fn add_player(app: &mut App, position: Vec3) -> Entity {
    let config = app.world().resource::<SimulationConfig>().clone();
    let entity = spawn_player(&mut app.world_mut().commands(), &config, position);
    app.world_mut().flush();
    entity
}

/// Monster with full AI, facing `face_toward`.
pub fn add_monster(app: &mut App, position: Vec3, face_toward: Vec3) -> Entity {
    let archetype = app.world().resource::<SimulationConfig>().monster.clone();
    let t = now(app);
    let entity = spawn_monster(
        &mut app.world_mut().commands(),
        &archetype,
        position,
        Some(face_toward),
        None,
        t,
    );
    app.world_mut().flush();
    entity
}

/// A monster-side damage target with no behaviour at all.
pub fn add_dummy(app: &mut App, position: Vec3, health: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            Health::new(health),
            BodyRadius(0.5),
            Faction::Monster,
        ))
        .id()
}

pub fn health(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<Health>(entity)
        .map(|health| health.current)
        .unwrap_or(f32::NAN)
}

#[derive(Resource, Default)]
pub struct SessionEndCount(pub u32);

fn count_session_ends(mut count: ResMut<SessionEndCount>, mut events: EventReader<SessionEnded>) {
    count.0 += events.read().count() as u32;
}
