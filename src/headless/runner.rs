//! Headless runner: loads tuning, scripts a player and reports the outcome.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::fmt;

use super::app::{advance_until, create_headless_app};
use super::autopilot::AutopilotPlugin;
use super::cli::Args;
use crate::combat::{Dead, DeathEvent, Health};
use crate::core::{SessionEnded, SimulationConfig};
use crate::enemies::Monster;
use crate::player::{spawn_player, Player};

/// Offset from the spawn director at which the player starts.
const PLAYER_START_OFFSET: Vec3 = Vec3::new(3.0, 0.0, 0.0);

/// Outcome of a headless run.
#[derive(Resource, Debug, Default, Clone)]
pub struct RunStats {
    pub seed: u64,
    pub simulated_seconds: f32,
    pub ticks: u64,
    pub monsters_alive: usize,
    pub monsters_killed: u32,
    pub player_health: Option<f32>,
    pub session_ended: bool,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run complete (seed {})", self.seed)?;
        writeln!(f, "  Simulated: {:.1}s over {} ticks", self.simulated_seconds, self.ticks)?;
        writeln!(f, "  Monsters alive: {}", self.monsters_alive)?;
        writeln!(f, "  Monsters killed: {}", self.monsters_killed)?;
        match self.player_health {
            Some(health) => writeln!(f, "  Player health: {:.0}", health)?,
            None => writeln!(f, "  Player health: -")?,
        }
        write!(f, "  Session ended: {}", self.session_ended)
    }
}

fn tally_kills(
    mut stats: ResMut<RunStats>,
    mut death_events: EventReader<DeathEvent>,
    monsters: Query<(), With<Monster>>,
) {
    for event in death_events.read() {
        if monsters.contains(event.entity) {
            stats.monsters_killed += 1;
        }
    }
}

fn note_session_end(mut stats: ResMut<RunStats>, mut session_ended: EventReader<SessionEnded>) {
    if session_ended.read().next().is_some() {
        stats.session_ended = true;
    }
}

/// Run the simulation described by `args` to completion.
pub fn run(args: &Args) -> RunStats {
    let config = SimulationConfig::load_or_default(&args.config_dir);
    let home = config.spawner.director_position() + PLAYER_START_OFFSET;

    let mut app = create_headless_app(args.seed, args.tick_hz);
    app.add_plugins(LogPlugin {
        level: args.log_level.into(),
        ..default()
    })
    .insert_resource(config.clone())
    .insert_resource(RunStats {
        seed: args.seed,
        ..default()
    })
    .add_plugins(AutopilotPlugin { home })
    .add_systems(Update, (tally_kills, note_session_end));

    spawn_player(&mut app.world_mut().commands(), &config, home);
    app.world_mut().flush();

    let limit = args.seconds.max(0.0);
    let mut ticks = 0;
    advance_until(&mut app, u64::MAX, |world| {
        ticks += 1;
        world.resource::<Time>().elapsed_secs() >= limit || world.resource::<RunStats>().session_ended
    });

    let world = app.world_mut();
    let elapsed = world.resource::<Time>().elapsed_secs();
    let monsters_alive = world
        .query_filtered::<(), (With<Monster>, Without<Dead>)>()
        .iter(world)
        .count();
    let player_health = world
        .query_filtered::<&Health, With<Player>>()
        .iter(world)
        .next()
        .map(|health| health.current);

    let mut stats = world.resource::<RunStats>().clone();
    stats.simulated_seconds = elapsed;
    stats.ticks = ticks;
    stats.monsters_alive = monsters_alive;
    stats.player_health = player_health;
    stats
}
