//! Global events used for cross-system communication.
//!
//! Combat resolution sends `DamageEvent`s, the damage system applies them and
//! reports deaths. Presentation cues are fire-and-forget notifications for an
//! animation/effects/UI layer; nothing in the simulation reads them back.

use bevy::prelude::*;

use crate::combat::AbilityId;

/// Sent when an entity should take damage.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
}

/// Sent once when an entity's health reaches 0.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that dealt the killing blow (if any)
    pub killed_by: Option<Entity>,
}

/// Kind of visual effect a presentation layer should spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Weapon slash trail
    Slash,
    /// Monster arrival burst
    Spawn,
}

/// Side-effecting notifications for animation, VFX and UI.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PresentationCue {
    /// Play the attack clip of an ability at the given playback speed.
    AttackAnimation {
        entity: Entity,
        ability: AbilityId,
        speed: f32,
    },
    /// Play the death clip.
    DeathAnimation { entity: Entity },
    /// Spawn a transient effect that removes itself after `duration` seconds.
    VisualEffect {
        kind: EffectKind,
        position: Vec3,
        rotation: Quat,
        scale: f32,
        duration: f32,
    },
    /// Health bar needs to show a new fill amount.
    HealthChanged { entity: Entity, fraction: f32 },
    /// Locomotion blend should follow a new movement speed.
    Locomotion { entity: Entity, speed: f32 },
}

/// Terminal notification: the host should restart the level.
///
/// Emitted exactly once per session, a fixed delay after the player dies.
#[derive(Event, Debug, Clone)]
pub struct SessionEnded {
    /// The player entity whose death ended the session
    pub player: Entity,
}
