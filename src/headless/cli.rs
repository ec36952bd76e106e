//! Command-line interface for the headless runner.

use bevy::log::Level;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use super::app::DEFAULT_TICK_HZ;
use crate::core::DEFAULT_DATA_DIR;

/// Wave-based melee simulation, run headless with a scripted player
#[derive(Parser, Debug, Clone)]
#[command(name = "ashen-horde")]
#[command(about = "Headless wave-based melee simulation")]
#[command(version)]
pub struct Args {
    /// Seed for every random decision in the run
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Simulated seconds to run for (the run stops early if the player dies)
    #[arg(long, default_value_t = 120.0)]
    pub seconds: f32,

    /// Simulation ticks per simulated second
    #[arg(long, default_value_t = DEFAULT_TICK_HZ)]
    pub tick_hz: f64,

    /// Directory holding player.ron, monster.ron and spawner.ron
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub config_dir: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
