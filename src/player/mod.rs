//! Player module - player entity, commands and death handling.

mod actions;
mod components;
mod plugin;

pub use actions::{apply_player_commands, spawn_player};
pub use components::*;
pub use plugin::PlayerPlugin;
