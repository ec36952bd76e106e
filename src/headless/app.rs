//! Headless app construction and deterministic tick helpers.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::core::SimRng;
use crate::AshenHordePlugin;

/// Simulation rate used when none is given.
pub const DEFAULT_TICK_HZ: f64 = 60.0;

/// Create a headless app that advances a fixed `1 / tick_hz` seconds per
/// `update()`, with the RNG seeded from `seed`.
///
/// Resources inserted before the first `update()` (tuning, navigation
/// surface) replace the defaults.
pub fn create_headless_app(seed: u64, tick_hz: f64) -> App {
    let tick = Duration::from_secs_f64(1.0 / tick_hz.max(1.0));

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .insert_resource(SimRng::from_seed(seed))
        .add_plugins(AshenHordePlugin);

    // Virtual time clamps long frames; low tick rates must not be slowed down
    let max_delta = tick.max(Duration::from_millis(250));
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_max_delta(max_delta);

    app
}

/// Run updates until `condition` holds or `max_ticks` have passed. Returns
/// whether the condition was met.
pub fn advance_until(app: &mut App, max_ticks: u64, mut condition: impl FnMut(&mut World) -> bool) -> bool {
    for _ in 0..max_ticks {
        app.update();
        if condition(app.world_mut()) {
            return true;
        }
    }
    false
}

/// Run updates until simulation time reaches `t`. Does nothing if it
/// already has.
pub fn advance_to(app: &mut App, t: f32) {
    while app.world().resource::<Time>().elapsed_secs() < t {
        app.update();
    }
}
