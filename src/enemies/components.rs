//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all monsters.
#[derive(Component)]
pub struct Monster;

/// Entity this monster or director reacts to.
///
/// Holds `None` until a player exists; an invalid handle is cleared and
/// re-acquired on the next tick.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PrimaryTarget(pub Option<Entity>);

/// Timer for the corpse grace period before despawn.
#[derive(Component)]
pub struct CorpseTimer(pub Timer);

impl CorpseTimer {
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

impl Default for CorpseTimer {
    fn default() -> Self {
        Self::new(5.0)
    }
}
