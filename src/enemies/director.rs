//! Spawn director: paces monster waves against player proximity, elapsed
//! session time and a population cap.
//!
//! Waves are resumable tasks. Starting one records how many monsters were
//! requested; each time the task is due, `poll_wave` hands out the next
//! burst and schedules the following one after a jittered stagger delay.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;
use thiserror::Error;

use super::data::SpawnDirectorConfig;
use crate::world::NavigationSurface;

/// Near-wave sizes are clamped into this range after adding the bonus.
const NEAR_WAVE_MIN: u32 = 1;
const NEAR_WAVE_MAX: u32 = 20;

/// Monsters spawned per burst before the stagger delay, inclusive.
const BURST_SIZE: (u32, u32) = (2, 4);

/// Multiplier range applied to the stagger delay between bursts.
const STAGGER_JITTER: (f32, f32) = (0.6, 1.4);

/// Delay between a director's creation and its first check.
const FIRST_CHECK_DELAY: f32 = 1.0;

/// Ground probes start this far above a sampled point.
const GROUND_PROBE_HEIGHT: f32 = 10.0;
const GROUND_PROBE_DISTANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaveRejected {
    #[error("a wave of {requested} is already in progress ({spawned} spawned)")]
    InProgress { requested: u32, spawned: u32 },
}

/// Persisted state of the wave being spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveTask {
    pub requested: u32,
    /// Quota consumed so far, including placements that found no position
    pub spawned: u32,
    /// The next burst may not fire before this time
    pub resume_at: f32,
}

/// Wave-based population controller.
///
/// Monsters it creates are tracked weakly: they die on their own, and the
/// registry is purged each tick against a liveness check.
#[derive(Component, Debug, Clone)]
pub struct SpawnDirector {
    pub config: SpawnDirectorConfig,
    next_check_at: f32,
    next_far_roll_at: f32,
    wave: Option<WaveTask>,
    tracked: Vec<Entity>,
}

impl SpawnDirector {
    pub fn new(config: SpawnDirectorConfig, now: f32) -> Self {
        let next_far_roll_at = now + config.far_wave_roll_interval;
        Self {
            config,
            next_check_at: now + FIRST_CHECK_DELAY,
            next_far_roll_at,
            wave: None,
            tracked: Vec::new(),
        }
    }

    pub fn next_check_at(&self) -> f32 {
        self.next_check_at
    }

    pub fn next_far_roll_at(&self) -> f32 {
        self.next_far_roll_at
    }

    pub fn wave(&self) -> Option<&WaveTask> {
        self.wave.as_ref()
    }

    pub fn is_spawning(&self) -> bool {
        self.wave.is_some()
    }

    /// Drop registry entries that are no longer alive.
    pub fn purge(&mut self, mut is_alive: impl FnMut(Entity) -> bool) {
        self.tracked.retain(|entity| is_alive(*entity));
    }

    pub fn track(&mut self, entity: Entity) {
        self.tracked.push(entity);
    }

    pub fn live_count(&self) -> u32 {
        self.tracked.len() as u32
    }

    pub fn tracked(&self) -> &[Entity] {
        &self.tracked
    }

    /// Start a wave of `size`. Only one wave may be in flight.
    ///
    /// The first burst is due immediately.
    pub fn start_wave(&mut self, size: u32, now: f32) -> Result<(), WaveRejected> {
        if let Some(wave) = &self.wave {
            return Err(WaveRejected::InProgress {
                requested: wave.requested,
                spawned: wave.spawned,
            });
        }
        self.wave = Some(WaveTask {
            requested: size,
            spawned: 0,
            resume_at: now,
        });
        Ok(())
    }

    /// Per-tick wave decision. Returns the size of a wave started this tick.
    ///
    /// `near` is whether the primary target is within the proximity
    /// threshold; `bonus` is the current difficulty bonus.
    pub fn decide(&mut self, now: f32, near: bool, bonus: u32, rng: &mut impl Rng) -> Option<u32> {
        if self.is_spawning() || self.live_count() >= self.config.max_alive {
            return None;
        }

        if near && now >= self.next_check_at {
            let size = (draw_group_size(self.config.group_size_near, rng) + bonus)
                .clamp(NEAR_WAVE_MIN, NEAR_WAVE_MAX);
            self.start_wave(size, now).ok()?;
            self.next_check_at = now + self.config.wave_cooldown_near;
            return Some(size);
        }

        let mut started = None;
        if !near && now >= self.next_far_roll_at {
            self.next_far_roll_at = now + self.config.far_wave_roll_interval;
            if rng.gen::<f32>() < self.config.far_wave_chance {
                // No upper clamp on this branch
                let size = draw_group_size(self.config.group_size_far, rng) + bonus.saturating_sub(1);
                if self.start_wave(size, now).is_ok() {
                    started = Some(size);
                }
            }
        }

        if !near && now >= self.next_check_at {
            self.next_check_at = now + self.config.wave_cooldown_far;
        }

        started
    }

    /// Resume the wave if it is due. Returns how many monsters to place now.
    ///
    /// The wave ends (and the in-progress flag clears) once its quota is
    /// used up or the population cap is reached.
    pub fn poll_wave(&mut self, now: f32, rng: &mut impl Rng) -> Option<u32> {
        let cap = self.config.max_alive;
        let live = self.live_count();
        let delay = self.config.intra_spawn_delay;

        let wave = self.wave.as_mut()?;
        if now < wave.resume_at {
            return None;
        }

        if wave.spawned >= wave.requested || live >= cap {
            debug!(
                "Wave finished: {}/{} placed, {} alive",
                wave.spawned, wave.requested, live
            );
            self.wave = None;
            return None;
        }

        let burst = rng
            .gen_range(BURST_SIZE.0..=BURST_SIZE.1)
            .min(wave.requested - wave.spawned)
            .min(cap - live);
        wave.spawned += burst;
        wave.resume_at = now + delay * rng.gen_range(STAGGER_JITTER.0..=STAGGER_JITTER.1);
        Some(burst)
    }
}

/// Inclusive draw from a group-size range; reversed ranges are swapped.
pub fn draw_group_size(range: (u32, u32), rng: &mut impl Rng) -> u32 {
    let (lo, hi) = if range.0 > range.1 {
        (range.1, range.0)
    } else {
        range
    };
    rng.gen_range(lo..=hi)
}

/// Extra monsters per wave: whole minutes elapsed times the per-minute
/// increment, capped.
pub fn difficulty_bonus(elapsed_secs: f32, per_minute: u32, cap: u32) -> u32 {
    let minutes = (elapsed_secs.max(0.0) / 60.0).floor() as u32;
    minutes.saturating_mul(per_minute).min(cap)
}

/// Uniform point inside the unit disc.
fn inside_unit_circle(rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen::<f32>().sqrt();
    Vec2::from_angle(angle) * radius
}

fn draw_radius(config: &SpawnDirectorConfig, rng: &mut impl Rng) -> f32 {
    let (lo, hi) = if config.min_spawn_radius > config.spawn_radius {
        (config.spawn_radius, config.min_spawn_radius)
    } else {
        (config.min_spawn_radius, config.spawn_radius)
    };
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Find a navigable spawn position, trying up to `nav_sample_tries` times.
///
/// Candidates are jittered around a random anchor when anchors are
/// configured, otherwise placed on a ring around `origin`. Returns `None`
/// when every attempt misses the surface.
pub fn pick_spawn_position(
    config: &SpawnDirectorConfig,
    origin: Vec3,
    nav: &dyn NavigationSurface,
    rng: &mut impl Rng,
) -> Option<Vec3> {
    let anchors: Vec<Vec3> = config.anchors().collect();

    for _ in 0..config.nav_sample_tries.max(1) {
        let candidate = if anchors.is_empty() {
            let direction = Vec2::from_angle(rng.gen_range(0.0..TAU));
            let offset = direction * draw_radius(config, rng);
            origin + Vec3::new(offset.x, 0.0, offset.y)
        } else {
            let anchor = anchors[rng.gen_range(0..anchors.len())];
            let jitter = inside_unit_circle(rng) * draw_radius(config, rng);
            anchor + Vec3::new(jitter.x, 0.0, jitter.y)
        };

        let Some(mut position) = nav.sample_position(candidate, config.nav_sample_distance) else {
            continue;
        };

        if config.project_to_ground {
            if let Some(ground) =
                nav.probe_ground(position + Vec3::Y * GROUND_PROBE_HEIGHT, GROUND_PROBE_DISTANCE)
            {
                position = ground;
            }
        }
        return Some(position);
    }

    None
}

/// Where a freshly spawned entity standing off the navigable surface should
/// be warped to, searching twice the usual sample distance.
pub fn surface_relocation(position: Vec3, sample_distance: f32, nav: &dyn NavigationSurface) -> Option<Vec3> {
    nav.sample_position(position, sample_distance * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FlatArena;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn fake_entities(count: u32) -> Vec<Entity> {
        (0..count).map(|i| Entity::from_raw(1000 + i)).collect()
    }

    /// Drain a wave, tracking a fresh entity for every placement.
    fn run_wave(director: &mut SpawnDirector, rng: &mut ChaCha8Rng, mut now: f32) -> u32 {
        let mut placed = 0;
        let mut next_id = 5000;
        while director.is_spawning() {
            if let Some(burst) = director.poll_wave(now, rng) {
                for _ in 0..burst {
                    director.track(Entity::from_raw(next_id));
                    next_id += 1;
                    placed += 1;
                }
                assert!(director.live_count() <= director.config.max_alive);
            }
            now += 0.05;
        }
        placed
    }

    #[test]
    fn first_check_waits_one_second() {
        let mut director = SpawnDirector::new(SpawnDirectorConfig::default(), 0.0);
        let mut rng = rng();
        assert_eq!(director.decide(0.5, true, 0, &mut rng), None);
        assert!(director.decide(1.0, true, 0, &mut rng).is_some());
        assert_eq!(director.next_check_at(), 7.0);
    }

    #[test]
    fn headroom_of_one_spawns_exactly_one() {
        let mut director = SpawnDirector::new(SpawnDirectorConfig::default(), 0.0);
        for entity in fake_entities(24) {
            director.track(entity);
        }
        let mut rng = rng();
        director.start_wave(6, 0.0).unwrap();

        let placed = run_wave(&mut director, &mut rng, 0.0);
        assert_eq!(placed, 1);
        assert_eq!(director.live_count(), 25);
        assert!(!director.is_spawning());
    }

    #[test]
    fn near_wave_is_clamped_to_twenty() {
        let config = SpawnDirectorConfig {
            group_size_near: (6, 6),
            ..Default::default()
        };
        let mut director = SpawnDirector::new(config, 0.0);
        let size = director.decide(1.0, true, 15, &mut rng());
        assert_eq!(size, Some(20));
    }

    #[test]
    fn near_wave_is_at_least_one() {
        let config = SpawnDirectorConfig {
            group_size_near: (0, 0),
            ..Default::default()
        };
        let mut director = SpawnDirector::new(config, 0.0);
        assert_eq!(director.decide(1.0, true, 0, &mut rng()), Some(1));
    }

    #[test]
    fn far_wave_is_not_clamped() {
        let config = SpawnDirectorConfig {
            group_size_far: (30, 30),
            far_wave_chance: 1.0,
            ..Default::default()
        };
        let mut director = SpawnDirector::new(config, 0.0);
        assert_eq!(director.decide(3.0, false, 5, &mut rng()), Some(34));
    }

    #[test]
    fn zero_chance_never_starts_far_waves() {
        let config = SpawnDirectorConfig {
            far_wave_chance: 0.0,
            ..Default::default()
        };
        let mut director = SpawnDirector::new(config, 0.0);
        let mut rng = rng();
        let mut t = 0.0;
        while t < 3600.0 {
            assert_eq!(director.decide(t, false, 15, &mut rng), None);
            t += 0.5;
        }
    }

    #[test]
    fn far_branch_reschedules_roll_and_check() {
        let config = SpawnDirectorConfig {
            far_wave_chance: 0.0,
            ..Default::default()
        };
        let mut director = SpawnDirector::new(config, 0.0);
        let mut rng = rng();

        director.decide(1.0, false, 0, &mut rng);
        assert_eq!(director.next_check_at(), 13.0);
        assert_eq!(director.next_far_roll_at(), 3.0);

        director.decide(3.0, false, 0, &mut rng);
        assert_eq!(director.next_far_roll_at(), 6.0);
        assert_eq!(director.next_check_at(), 13.0);
    }

    #[test]
    fn only_one_wave_in_flight() {
        let mut director = SpawnDirector::new(SpawnDirectorConfig::default(), 0.0);
        director.start_wave(5, 0.0).unwrap();
        assert!(matches!(
            director.start_wave(3, 0.0),
            Err(WaveRejected::InProgress { requested: 5, .. })
        ));
        assert_eq!(director.decide(10.0, true, 0, &mut rng()), None);
        assert_eq!(director.wave().map(|w| w.requested), Some(5));
    }

    #[test]
    fn full_population_blocks_new_waves() {
        let config = SpawnDirectorConfig {
            max_alive: 3,
            ..Default::default()
        };
        let mut director = SpawnDirector::new(config, 0.0);
        for entity in fake_entities(3) {
            director.track(entity);
        }
        assert_eq!(director.decide(1.0, true, 0, &mut rng()), None);

        director.purge(|entity| entity != Entity::from_raw(1000));
        assert_eq!(director.live_count(), 2);
        assert!(director.decide(1.0, true, 0, &mut rng()).is_some());
    }

    #[test]
    fn bursts_are_two_to_four_and_staggered() {
        let mut director = SpawnDirector::new(SpawnDirectorConfig::default(), 0.0);
        let mut rng = rng();
        director.start_wave(20, 0.0).unwrap();

        let burst = director.poll_wave(0.0, &mut rng).unwrap();
        assert!((2..=4).contains(&burst));

        let resume_at = director.wave().unwrap().resume_at;
        assert!((0.15..=0.35).contains(&resume_at));
        assert_eq!(director.poll_wave(resume_at - 0.01, &mut rng), None);
        assert!(director.poll_wave(resume_at, &mut rng).is_some());
    }

    #[test]
    fn wave_places_requested_count_when_uncapped() {
        let mut director = SpawnDirector::new(SpawnDirectorConfig::default(), 0.0);
        let mut rng = rng();
        director.start_wave(20, 0.0).unwrap();
        assert_eq!(run_wave(&mut director, &mut rng, 0.0), 20);
    }

    #[test]
    fn difficulty_grows_by_whole_minutes_and_caps() {
        assert_eq!(difficulty_bonus(0.0, 1, 15), 0);
        assert_eq!(difficulty_bonus(59.9, 1, 15), 0);
        assert_eq!(difficulty_bonus(60.0, 1, 15), 1);
        assert_eq!(difficulty_bonus(150.0, 2, 15), 4);
        assert_eq!(difficulty_bonus(3600.0, 1, 15), 15);

        let mut previous = 0;
        for second in 0..2000 {
            let bonus = difficulty_bonus(second as f32, 1, 15);
            assert!(bonus >= previous);
            assert!(bonus <= 15);
            previous = bonus;
        }
    }

    #[test]
    fn reversed_group_range_is_swapped() {
        let mut rng = rng();
        for _ in 0..50 {
            let size = draw_group_size((6, 3), &mut rng);
            assert!((3..=6).contains(&size));
        }
    }

    #[test]
    fn ring_positions_respect_radius_bounds() {
        let config = SpawnDirectorConfig::default();
        let arena = FlatArena::square(40.0);
        let mut rng = rng();
        for _ in 0..50 {
            let position = pick_spawn_position(&config, Vec3::ZERO, &arena, &mut rng).unwrap();
            let distance = Vec2::new(position.x, position.z).length();
            assert!((1.99..=12.01).contains(&distance), "distance {distance}");
        }
    }

    #[test]
    fn anchor_positions_stay_near_anchors() {
        let config = SpawnDirectorConfig {
            spawn_points: vec![[20.0, 0.0, 20.0]],
            spawn_radius: 3.0,
            min_spawn_radius: 1.0,
            ..Default::default()
        };
        let arena = FlatArena::square(40.0);
        let mut rng = rng();
        for _ in 0..50 {
            let position = pick_spawn_position(&config, Vec3::ZERO, &arena, &mut rng).unwrap();
            assert!(position.distance(Vec3::new(20.0, 0.0, 20.0)) <= 3.01);
        }
    }

    #[test]
    fn unreachable_surface_yields_no_position() {
        let config = SpawnDirectorConfig {
            position: [200.0, 0.0, 200.0],
            nav_sample_distance: 1.0,
            ..Default::default()
        };
        let arena = FlatArena::square(10.0);
        let origin = config.director_position();
        assert_eq!(pick_spawn_position(&config, origin, &arena, &mut rng()), None);
    }

    #[test]
    fn relocation_searches_twice_the_sample_distance() {
        let arena = FlatArena::square(10.0);
        assert_eq!(
            surface_relocation(Vec3::new(15.0, 0.0, 0.0), 4.0, &arena),
            Some(Vec3::new(10.0, 0.0, 0.0))
        );
        assert_eq!(surface_relocation(Vec3::new(19.0, 0.0, 0.0), 4.0, &arena), None);
    }
}
