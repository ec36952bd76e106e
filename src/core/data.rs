//! RON tuning files and the combined simulation configuration.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::combat::CombatantProfile;
use crate::enemies::{MonsterArchetype, SpawnDirectorConfig};

/// File names inside a tuning directory.
pub const PLAYER_FILE: &str = "player.ron";
pub const MONSTER_FILE: &str = "monster.ron";
pub const SPAWNER_FILE: &str = "spawner.ron";

/// Default tuning directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "assets/data";

/// Read and parse a single RON file.
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// All tuning the simulation needs, one section per data file.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimulationConfig {
    pub player: CombatantProfile,
    pub monster: MonsterArchetype,
    pub spawner: SpawnDirectorConfig,
}

impl SimulationConfig {
    /// Load every file from `dir`, failing on the first missing or bad file.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DataLoadError> {
        let config = Self {
            player: read_ron(&dir.join(PLAYER_FILE))?,
            monster: read_ron(&dir.join(MONSTER_FILE))?,
            spawner: read_ron(&dir.join(SPAWNER_FILE))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load each file from `dir`, keeping defaults for anything that fails.
    pub fn load_or_default(dir: &Path) -> Self {
        let defaults = Self::default();
        let config = Self {
            player: load_section(&dir.join(PLAYER_FILE), defaults.player),
            monster: load_section(&dir.join(MONSTER_FILE), defaults.monster),
            spawner: load_section(&dir.join(SPAWNER_FILE), defaults.spawner),
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                error!("Tuning in {:?} is invalid: {}. Using defaults.", dir, e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), DataLoadError> {
        self.player.validate()?;
        self.monster.validate()?;
        self.spawner.validate()
    }
}

fn load_section<T: DeserializeOwned>(path: &Path, fallback: T) -> T {
    match read_ron(path) {
        Ok(section) => {
            info!("Loaded tuning from {:?}", path);
            section
        }
        Err(DataLoadError::FileNotFound(_)) => {
            warn!("Tuning file {:?} not found. Using defaults.", path);
            fallback
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            fallback
        }
    }
}
