//! Headless mode: build and drive the simulation without a window.
//!
//! `create_headless_app` is what tests and the runner share. The runner adds
//! logging, a scripted player and a summary on top.
//!
//! ## Usage
//!
//! ```bash
//! ashen-horde --seed 7 --seconds 300 --tick-hz 30
//! ```

mod app;
mod autopilot;
mod cli;
mod runner;

pub use app::{advance_to, advance_until, create_headless_app, DEFAULT_TICK_HZ};
pub use autopilot::{Autopilot, AutopilotPlugin};
pub use cli::{parse_args, Args, LogLevel};
pub use runner::{run, RunStats};
