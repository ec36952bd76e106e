//! Player-related components and commands.

use bevy::prelude::*;

use crate::combat::AbilityId;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Player intent, produced by whatever drives the player (input layer,
/// scripted runner, tests).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Walk toward a point. Ignored while casting or movement-locked.
    MoveTo(Vec3),
    /// Cast an ability, turning toward `target_point` while casting.
    Cast { ability: AbilityId, target_point: Vec3 },
}

/// Counts down from player death to the end of the session.
#[derive(Component)]
pub struct RestartCountdown {
    pub timer: Timer,
    /// Set once `SessionEnded` has been sent
    pub notified: bool,
}

impl RestartCountdown {
    /// Seconds between the player's death and the session end.
    pub const DELAY: f32 = 5.0;

    pub fn new() -> Self {
        Self {
            timer: Timer::from_seconds(Self::DELAY, TimerMode::Once),
            notified: false,
        }
    }
}

impl Default for RestartCountdown {
    fn default() -> Self {
        Self::new()
    }
}
