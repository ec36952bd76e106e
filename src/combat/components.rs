//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent};

use super::data::CombatantProfile;

/// Component for entities that can take damage.
///
/// Invariant: `0 <= current <= maximum`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Reduce health, never below zero. Returns the amount actually removed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining health as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        (self.current / self.maximum).clamp(0.0, 1.0)
    }
}

/// Which side an entity fights for. Abilities only damage the opposing side.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Monster,
}

impl Faction {
    pub fn opposes(self, other: Faction) -> bool {
        self != other
    }
}

/// Collision geometry used by hit queries, approximated as a sphere.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyRadius(pub f32);

impl Default for BodyRadius {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Per-combatant tuning that abilities scale from.
#[derive(Component, Debug, Clone, Copy)]
pub struct CombatStats {
    pub movement_speed: f32,
    /// Casts per second; base cast duration is its inverse
    pub attacks_per_second: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Exponential facing smoothing rate while casting
    pub turning_rate: f32,
}

impl CombatStats {
    pub fn from_profile(profile: &CombatantProfile) -> Self {
        Self {
            movement_speed: profile.movement_speed,
            attacks_per_second: profile.attacks_per_second,
            attack_range: profile.attack_range,
            attack_damage: profile.attack_damage,
            turning_rate: profile.turning_rate,
        }
    }

    pub fn cast_duration(&self) -> f32 {
        1.0 / self.attacks_per_second
    }
}

/// Marker for entities that have died. Dead entities accept no commands.
#[derive(Component, Debug)]
pub struct Dead;

/// Request to start casting an ability, produced by a trigger source.
#[derive(Event, Debug, Clone)]
pub struct CastRequest {
    pub caster: Entity,
    pub ability: super::AbilityId,
    /// Point the caster turns toward while casting
    pub target_point: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_never_drives_health_negative() {
        let mut health = Health::new(100.0);
        assert_eq!(health.take_damage(30.0), 30.0);
        assert_eq!(health.current, 70.0);
        assert!(!health.is_dead());

        assert_eq!(health.take_damage(500.0), 70.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());

        assert_eq!(health.take_damage(10.0), 0.0);
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut health = Health::new(50.0);
        health.take_damage(-20.0);
        assert_eq!(health.current, 50.0);
    }

    #[test]
    fn fraction_is_clamped() {
        let mut health = Health::new(200.0);
        assert_eq!(health.fraction(), 1.0);
        health.take_damage(50.0);
        assert_eq!(health.fraction(), 0.75);
        health.current = 300.0;
        assert_eq!(health.fraction(), 1.0);
    }

    #[test]
    fn factions_oppose_each_other_only() {
        assert!(Faction::Player.opposes(Faction::Monster));
        assert!(!Faction::Monster.opposes(Faction::Monster));
    }
}
