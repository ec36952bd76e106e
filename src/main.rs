//! Ashen Horde - Entry Point
//!
//! Runs the simulation headless with a scripted player and prints a summary.
//!
//! Example:
//! - `ashen-horde --seed 42 --seconds 120`
//! - `ashen-horde --config-dir assets/data --log-level debug`

use ashen_horde::headless::{parse_args, run};

fn main() {
    let args = parse_args();
    let stats = run(&args);

    println!("{stats}");
}
