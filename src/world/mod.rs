//! World module - the navigation service boundary and steering agents.

mod navigation;
mod plugin;
mod steering;

pub use navigation::{FlatArena, NavMesh, NavigationSurface};
pub use plugin::WorldPlugin;
pub use steering::{drive_steering_agents, report_locomotion, SteeringAgent};
