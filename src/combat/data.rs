//! Ability definitions and combatant profiles, loadable from RON files.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::DataLoadError;

/// Identifier of an ability across both combatant variants.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityId {
    /// Monster melee swing
    Slash,
    /// Player quick swing in front
    Cleave,
    /// Player heavy overhead swing with a growing hurtbox
    TwoHandSlash,
    /// Player sliding sweep with a growing hurtbox
    SlideAttack,
}

/// How an ability selects what it damages.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Targeting {
    /// Sphere query in front of the caster at the moment the cast resolves.
    /// The cast ends at the same instant.
    InstantPoint,
    /// A hurtbox opens at the activation point, collects everything that
    /// enters it, and deals batched damage when the cast ends.
    WindowedHitbox {
        /// Cast end as a multiple of the base cast duration
        cast_end_multiplier: f32,
        /// How much the hurtbox grows when it opens
        hitbox_strength: f32,
        /// Multiplier on base attack damage applied at close
        damage_multiplier: f32,
    },
}

/// Static per-ability configuration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    /// Fraction of the base cast duration at which the ability lands
    /// (instant abilities) or opens its hurtbox (windowed abilities)
    pub activation_point: f32,
    /// Movement stays locked this long after the cast ends
    pub post_cast_lockout: f32,
    pub targeting: Targeting,
    /// Lifetime of the slash effect spawned when the ability lands
    #[serde(default)]
    pub effect_duration: Option<f32>,
}

impl AbilityDefinition {
    pub fn instant(id: AbilityId, activation_point: f32, post_cast_lockout: f32) -> Self {
        Self {
            id,
            activation_point,
            post_cast_lockout,
            targeting: Targeting::InstantPoint,
            effect_duration: None,
        }
    }

    pub fn windowed(
        id: AbilityId,
        activation_point: f32,
        post_cast_lockout: f32,
        cast_end_multiplier: f32,
        hitbox_strength: f32,
        damage_multiplier: f32,
    ) -> Self {
        Self {
            id,
            activation_point,
            post_cast_lockout,
            targeting: Targeting::WindowedHitbox {
                cast_end_multiplier,
                hitbox_strength,
                damage_multiplier,
            },
            effect_duration: None,
        }
    }

    pub fn with_effect(mut self, duration: f32) -> Self {
        self.effect_duration = Some(duration);
        self
    }

    pub fn is_windowed(&self) -> bool {
        matches!(self.targeting, Targeting::WindowedHitbox { .. })
    }

    pub fn validate(&self) -> Result<(), DataLoadError> {
        if !(0.0..=1.0).contains(&self.activation_point) {
            return Err(DataLoadError::invalid(
                "activation_point",
                format!("{:?} activation point {} is outside 0..=1", self.id, self.activation_point),
            ));
        }
        if self.post_cast_lockout < 0.0 {
            return Err(DataLoadError::invalid(
                "post_cast_lockout",
                format!("{:?} lockout {} is negative", self.id, self.post_cast_lockout),
            ));
        }
        if let Targeting::WindowedHitbox {
            cast_end_multiplier,
            ..
        } = self.targeting
        {
            if cast_end_multiplier < self.activation_point {
                return Err(DataLoadError::invalid(
                    "cast_end_multiplier",
                    format!("{:?} would close its hurtbox before opening it", self.id),
                ));
            }
        }
        Ok(())
    }
}

/// The abilities a combatant can cast.
#[derive(Component, Debug, Clone, Default)]
pub struct AbilitySet(pub Vec<AbilityDefinition>);

impl AbilitySet {
    pub fn get(&self, id: AbilityId) -> Option<&AbilityDefinition> {
        self.0.iter().find(|ability| ability.id == id)
    }

    /// The first ability; AI combatants cast this one.
    pub fn primary(&self) -> Option<&AbilityDefinition> {
        self.0.first()
    }
}

/// Full tuning for one kind of combatant.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CombatantProfile {
    pub max_health: f32,
    pub movement_speed: f32,
    pub attacks_per_second: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub turning_rate: f32,
    pub abilities: Vec<AbilityDefinition>,
}

impl CombatantProfile {
    /// Three-ability player variant.
    pub fn player() -> Self {
        Self {
            max_health: 500.0,
            movement_speed: 3.5,
            attacks_per_second: 1.0,
            attack_range: 2.0,
            attack_damage: 40.0,
            turning_rate: 10.0,
            abilities: vec![
                AbilityDefinition::instant(AbilityId::Cleave, 0.4, 0.2).with_effect(1.0),
                AbilityDefinition::windowed(AbilityId::TwoHandSlash, 0.9, 0.2, 3.25, 1.0, 1.5)
                    .with_effect(1.5),
                AbilityDefinition::windowed(AbilityId::SlideAttack, 0.6, 0.2, 2.5, 0.5, 1.0)
                    .with_effect(1.5),
            ],
        }
    }

    /// Single-ability monster variant.
    pub fn monster() -> Self {
        Self {
            max_health: 100.0,
            movement_speed: 3.5,
            attacks_per_second: 1.0,
            attack_range: 2.0,
            attack_damage: 10.0,
            turning_rate: 10.0,
            abilities: vec![AbilityDefinition::instant(AbilityId::Slash, 0.4, 1.5)],
        }
    }

    pub fn validate(&self) -> Result<(), DataLoadError> {
        if self.max_health <= 0.0 {
            return Err(DataLoadError::invalid("max_health", "must be positive"));
        }
        if self.attacks_per_second <= 0.0 {
            return Err(DataLoadError::invalid("attacks_per_second", "must be positive"));
        }
        if self.attack_range < 0.0 || self.attack_damage < 0.0 || self.movement_speed < 0.0 {
            return Err(DataLoadError::invalid(
                "attack_range/attack_damage/movement_speed",
                "must not be negative",
            ));
        }
        for ability in &self.abilities {
            ability.validate()?;
        }
        Ok(())
    }
}

impl Default for CombatantProfile {
    fn default() -> Self {
        Self::player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_profiles_are_valid() {
        CombatantProfile::player().validate().unwrap();
        CombatantProfile::monster().validate().unwrap();
    }

    #[test]
    fn player_has_two_windowed_abilities() {
        let profile = CombatantProfile::player();
        let windowed = profile.abilities.iter().filter(|a| a.is_windowed()).count();
        assert_eq!(profile.abilities.len(), 3);
        assert_eq!(windowed, 2);
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let profile = CombatantProfile {
            attacks_per_second: 0.0,
            ..CombatantProfile::monster()
        };
        assert!(matches!(
            profile.validate(),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn activation_point_must_be_a_fraction() {
        let ability = AbilityDefinition::instant(AbilityId::Slash, 1.5, 0.0);
        assert!(ability.validate().is_err());
    }

    #[test]
    fn profile_parses_from_ron_with_defaults() {
        let profile: CombatantProfile = ron::from_str(
            "(attack_damage: 25.0, abilities: [(id: Slash, activation_point: 0.5, \
             post_cast_lockout: 1.0, targeting: InstantPoint)])",
        )
        .unwrap();
        assert_eq!(profile.attack_damage, 25.0);
        assert_eq!(profile.max_health, CombatantProfile::player().max_health);
        assert_eq!(profile.abilities[0].id, AbilityId::Slash);
        assert_eq!(profile.abilities[0].effect_duration, None);
    }
}
