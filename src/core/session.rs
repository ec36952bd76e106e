//! Session-wide resources: the seeded RNG and the session clock.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::{Deref, DerefMut};

/// Seeded RNG shared by every random decision in the simulation.
///
/// All draws go through this one stream so a run can be reproduced from its
/// seed.
#[derive(Resource)]
pub struct SimRng {
    rng: ChaCha8Rng,
    /// Seed used to initialise the stream (if deterministic)
    pub seed: Option<u64>,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Deref for SimRng {
    type Target = ChaCha8Rng;

    fn deref(&self) -> &Self::Target {
        &self.rng
    }
}

impl DerefMut for SimRng {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.rng
    }
}

/// When the current session started, in `Time` elapsed seconds.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SessionClock {
    pub started_at: f32,
}

impl SessionClock {
    /// Seconds since the session started.
    pub fn elapsed(&self, now: f32) -> f32 {
        (now - self.started_at).max(0.0)
    }
}

/// Restart the session clock when a session begins.
pub fn reset_session_clock(time: Res<Time>, mut clock: ResMut<SessionClock>) {
    clock.started_at = time.elapsed_secs();
    info!("Session started at t={:.2}", clock.started_at);
}
