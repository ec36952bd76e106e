//! Scripted player for headless runs.
//!
//! Holds ground at a home point and swings at whatever comes close:
//! `Cleave` by default, `TwoHandSlash` when crowded and off its own timer.

use bevy::prelude::*;

use crate::combat::{AbilityId, CastController, CombatSet, CombatStats, Dead};
use crate::enemies::Monster;
use crate::player::{apply_player_commands, Player, PlayerCommand};

/// Monsters within this multiple of attack range count as "in reach".
const REACH_FACTOR: f32 = 1.5;

/// The player wanders back home once farther than this.
const HOME_LEASH: f32 = 1.0;

#[derive(Resource, Debug, Clone)]
pub struct Autopilot {
    pub home: Vec3,
    /// Monsters in reach before the heavy swing is used
    pub crowd_size: usize,
    /// Seconds between heavy swings
    pub heavy_every: f32,
    next_heavy_at: f32,
}

impl Autopilot {
    pub fn new(home: Vec3) -> Self {
        Self {
            home,
            crowd_size: 3,
            heavy_every: 8.0,
            next_heavy_at: 0.0,
        }
    }
}

pub struct AutopilotPlugin {
    pub home: Vec3,
}

impl Plugin for AutopilotPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Autopilot::new(self.home))
            .add_systems(
                Update,
                drive_autopilot
                    .before(apply_player_commands)
                    .in_set(CombatSet::Input),
            );
    }
}

fn drive_autopilot(
    time: Res<Time>,
    mut autopilot: ResMut<Autopilot>,
    players: Query<(&Transform, &CastController, &CombatStats), (With<Player>, Without<Dead>)>,
    monsters: Query<&Transform, (With<Monster>, Without<Dead>)>,
    mut player_commands: EventWriter<PlayerCommand>,
) {
    let now = time.elapsed_secs();
    let Ok((transform, controller, stats)) = players.get_single() else {
        return;
    };
    if controller.is_casting() {
        return;
    }

    let position = transform.translation;
    let reach = stats.attack_range * REACH_FACTOR;
    let nearest = monsters
        .iter()
        .map(|monster| monster.translation)
        .min_by(|a, b| a.distance_squared(position).total_cmp(&b.distance_squared(position)));

    if let Some(target) = nearest.filter(|target| target.distance(position) <= reach) {
        if !controller.can_cast(now) {
            return;
        }

        let crowd = monsters
            .iter()
            .filter(|monster| monster.translation.distance(position) <= reach)
            .count();
        let ability = if crowd >= autopilot.crowd_size && now >= autopilot.next_heavy_at {
            autopilot.next_heavy_at = now + autopilot.heavy_every;
            AbilityId::TwoHandSlash
        } else {
            AbilityId::Cleave
        };

        player_commands.send(PlayerCommand::Cast {
            ability,
            target_point: target,
        });
        return;
    }

    if position.distance(autopilot.home) > HOME_LEASH && controller.can_move(now) {
        player_commands.send(PlayerCommand::MoveTo(autopilot.home));
    }
}
