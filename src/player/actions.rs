//! Player spawning, command handling and the death-to-restart countdown.

use bevy::prelude::*;

use super::components::*;
use crate::combat::{
    combatant_bundle, BodyRadius, CastController, CastRequest, CombatSet, Dead, DeathEvent, Faction,
    HurtBox,
};
use crate::core::{GameState, SessionEnded, SimulationConfig};
use crate::world::SteeringAgent;

/// Set up player systems.
pub fn setup_player_systems(app: &mut App) {
    app.add_event::<PlayerCommand>()
        .add_systems(
            Update,
            apply_player_commands.in_set(CombatSet::Input),
        )
        .add_systems(
            Update,
            (start_restart_countdown, tick_restart_countdown)
                .chain()
                .in_set(CombatSet::Cleanup),
        );
}

/// Spawn the player at `position` from the configured profile.
pub fn spawn_player(commands: &mut Commands, config: &SimulationConfig, position: Vec3) -> Entity {
    let entity = commands
        .spawn((
            Name::new("Player"),
            Player,
            Transform::from_translation(position),
            combatant_bundle(&config.player, Faction::Player, BodyRadius::default().0),
            HurtBox::default(),
        ))
        .id();
    info!("Player spawned at {}", position);
    entity
}

/// Turn player commands into movement and cast requests.
pub fn apply_player_commands(
    time: Res<Time>,
    mut player_commands: EventReader<PlayerCommand>,
    mut players: Query<(Entity, &CastController, &mut SteeringAgent), (With<Player>, Without<Dead>)>,
    mut cast_requests: EventWriter<CastRequest>,
) {
    let now = time.elapsed_secs();
    let Ok((entity, controller, mut agent)) = players.get_single_mut() else {
        // Dead or absent players accept nothing
        player_commands.clear();
        return;
    };

    for command in player_commands.read() {
        match command {
            PlayerCommand::MoveTo(point) => {
                if controller.can_move(now) {
                    agent.set_destination(*point);
                } else {
                    trace!("Move to {} ignored, movement locked until t={:.2}", point, controller.can_move_at);
                }
            }
            PlayerCommand::Cast { ability, target_point } => {
                cast_requests.send(CastRequest {
                    caster: entity,
                    ability: *ability,
                    target_point: *target_point,
                });
            }
        }
    }
}

/// Begin the restart countdown when the player dies.
fn start_restart_countdown(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    players: Query<(), (With<Player>, Without<RestartCountdown>)>,
) {
    for event in death_events.read() {
        if players.contains(event.entity) {
            info!("Player died, session ends in {:.1}s", RestartCountdown::DELAY);
            commands.entity(event.entity).insert(RestartCountdown::new());
        }
    }
}

/// Emit `SessionEnded` once the countdown runs out, then leave the session.
fn tick_restart_countdown(
    time: Res<Time>,
    mut countdowns: Query<(Entity, &mut RestartCountdown)>,
    mut session_ended: EventWriter<SessionEnded>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (entity, mut countdown) in countdowns.iter_mut() {
        if countdown.notified {
            continue;
        }

        countdown.timer.tick(time.delta());
        if countdown.timer.finished() {
            countdown.notified = true;
            session_ended.send(SessionEnded { player: entity });
            next_state.set(GameState::GameOver);
            info!("Session ended");
        }
    }
}
