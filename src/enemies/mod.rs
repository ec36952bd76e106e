//! Enemies module - monsters, their AI, and the spawn director.

mod ai;
mod components;
pub mod data;
mod director;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{MonsterArchetype, SpawnDirectorConfig};
pub use director::{
    difficulty_bonus, draw_group_size, pick_spawn_position, surface_relocation, SpawnDirector,
    WaveRejected, WaveTask,
};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_monster;
