//! Monster archetype and spawn director tuning, loaded from RON files.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::CombatantProfile;
use crate::core::DataLoadError;

/// Everything needed to spawn one kind of monster.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct MonsterArchetype {
    pub profile: CombatantProfile,
    /// Collision radius used by hit queries
    pub body_radius: f32,
    /// Seconds a corpse lingers before it is removed
    pub corpse_delay: f32,
    /// A fresh monster may not move for this long
    pub initial_move_delay: f32,
}

impl Default for MonsterArchetype {
    fn default() -> Self {
        Self {
            profile: CombatantProfile::monster(),
            body_radius: 0.5,
            corpse_delay: 5.0,
            initial_move_delay: 1.0,
        }
    }
}

impl MonsterArchetype {
    pub fn validate(&self) -> Result<(), DataLoadError> {
        self.profile.validate()?;
        if self.profile.abilities.is_empty() {
            return Err(DataLoadError::invalid("abilities", "a monster needs at least one ability"));
        }
        if self.body_radius < 0.0 {
            return Err(DataLoadError::invalid("body_radius", "must not be negative"));
        }
        if self.corpse_delay < 0.0 || self.initial_move_delay < 0.0 {
            return Err(DataLoadError::invalid(
                "corpse_delay/initial_move_delay",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Tuning for a spawn director.
///
/// Group sizes are inclusive `(min, max)` ranges; a range given the wrong
/// way round is swapped when drawn from.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SpawnDirectorConfig {
    /// Where the director stands; proximity is measured from here
    pub position: [f32; 3],

    // Spawn shape
    pub spawn_radius: f32,
    pub min_spawn_radius: f32,
    /// Explicit spawn anchors. When empty, spawns use a ring around the director.
    pub spawn_points: Vec<[f32; 3]>,
    /// Drop sampled positions onto ground geometry below them
    pub project_to_ground: bool,

    // Wave tuning
    pub max_alive: u32,
    pub near_player_radius: f32,
    pub group_size_near: (u32, u32),
    pub group_size_far: (u32, u32),
    pub wave_cooldown_near: f32,
    pub wave_cooldown_far: f32,
    pub intra_spawn_delay: f32,

    // Ambient far spawns
    pub far_wave_roll_interval: f32,
    pub far_wave_chance: f32,

    // Difficulty scaling
    pub bonus_per_minute: u32,
    pub cap_bonus: u32,

    // Navigation sampling
    pub nav_sample_distance: f32,
    pub nav_sample_tries: u32,
}

impl Default for SpawnDirectorConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            spawn_radius: 12.0,
            min_spawn_radius: 2.0,
            spawn_points: Vec::new(),
            project_to_ground: true,
            max_alive: 25,
            near_player_radius: 15.0,
            group_size_near: (3, 6),
            group_size_far: (1, 3),
            wave_cooldown_near: 6.0,
            wave_cooldown_far: 12.0,
            intra_spawn_delay: 0.25,
            far_wave_roll_interval: 3.0,
            far_wave_chance: 0.35,
            bonus_per_minute: 1,
            cap_bonus: 15,
            nav_sample_distance: 4.0,
            nav_sample_tries: 8,
        }
    }
}

impl SpawnDirectorConfig {
    pub fn director_position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn anchors(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.spawn_points.iter().copied().map(Vec3::from_array)
    }

    pub fn validate(&self) -> Result<(), DataLoadError> {
        if self.spawn_radius < 0.0 || self.min_spawn_radius < 0.0 {
            return Err(DataLoadError::invalid("spawn_radius", "must not be negative"));
        }
        if self.near_player_radius < 0.0 {
            return Err(DataLoadError::invalid("near_player_radius", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.far_wave_chance) {
            return Err(DataLoadError::invalid("far_wave_chance", "must be within 0..=1"));
        }
        if self.far_wave_roll_interval <= 0.0 {
            return Err(DataLoadError::invalid("far_wave_roll_interval", "must be positive"));
        }
        if self.wave_cooldown_near < 0.0 || self.wave_cooldown_far < 0.0 || self.intra_spawn_delay < 0.0 {
            return Err(DataLoadError::invalid("cooldowns", "must not be negative"));
        }
        if self.nav_sample_distance < 0.0 {
            return Err(DataLoadError::invalid("nav_sample_distance", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        MonsterArchetype::default().validate().unwrap();
        SpawnDirectorConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_spawner_file_keeps_other_defaults() {
        let config: SpawnDirectorConfig = ron::from_str("(max_alive: 5, far_wave_chance: 0.0)").unwrap();
        assert_eq!(config.max_alive, 5);
        assert_eq!(config.far_wave_chance, 0.0);
        assert_eq!(config.group_size_near, (3, 6));
        assert_eq!(config.nav_sample_tries, 8);
    }

    #[test]
    fn chance_outside_unit_range_is_rejected() {
        let config = SpawnDirectorConfig {
            far_wave_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn monster_without_abilities_is_rejected() {
        let mut archetype = MonsterArchetype::default();
        archetype.profile.abilities.clear();
        assert!(archetype.validate().is_err());
    }
}
