//! Core module - session states, events, tuning data and shared resources.
//!
//! This module provides the foundation that all other simulation systems build upon.

mod data;
mod error;
mod events;
mod facing;
mod plugin;
mod session;
mod states;

pub use data::*;
pub use error::DataLoadError;
pub use events::*;
pub use facing::*;
pub use plugin::CorePlugin;
pub use session::*;
pub use states::*;
