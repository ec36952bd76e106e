//! Melee hit resolution: instant sphere queries and the windowed hurtbox.

use bevy::prelude::*;
use std::collections::HashSet;

/// A damage target as seen by a hit query.
#[derive(Debug, Clone, Copy)]
pub struct HitCandidate {
    pub entity: Entity,
    pub position: Vec3,
    pub radius: f32,
}

/// Where an instant swing lands: `range` units ahead of the caster.
pub fn instant_hit_point(origin: Vec3, forward: Vec3, range: f32) -> Vec3 {
    origin + forward * range
}

/// Every candidate whose body overlaps a sphere of `range` around
/// `hit_point`, each entity at most once, in first-seen order.
///
/// Candidates may list the same entity several times (one per collider);
/// the result never does.
pub fn instant_point_hits(
    hit_point: Vec3,
    range: f32,
    candidates: impl IntoIterator<Item = HitCandidate>,
) -> Vec<Entity> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| {
            let reach = range + candidate.radius;
            candidate.position.distance_squared(hit_point) <= reach * reach
        })
        .filter_map(|candidate| seen.insert(candidate.entity).then_some(candidate.entity))
        .collect()
}

/// Growable box attached in front of its owner that accumulates targets
/// while open and releases them all at once when closed.
///
/// Only entities that *begin* overlapping while the box is open are
/// collected; anything already inside when it opens is ignored until it
/// leaves and comes back.
#[derive(Component, Debug, Clone)]
pub struct HurtBox {
    pub enabled: bool,
    /// Full extents (x: width, y: height, z: depth ahead of the owner)
    pub size: Vec3,
    pub baseline: Vec3,
    touching: HashSet<Entity>,
    targets: HashSet<Entity>,
}

impl HurtBox {
    pub const BASELINE: Vec3 = Vec3::new(0.5, 0.5, 1.0);
    /// Width/height growth per point of strength
    pub const GROWTH_PER_STRENGTH: f32 = 1.5;
    /// Depth growth when opening, regardless of strength
    pub const DEPTH_GROWTH: f32 = 0.5;

    pub fn new(baseline: Vec3) -> Self {
        Self {
            enabled: false,
            size: baseline,
            baseline,
            touching: HashSet::new(),
            targets: HashSet::new(),
        }
    }

    /// World-space centre of the box for an owner transform.
    pub fn center(&self, owner: &Transform) -> Vec3 {
        owner.translation + owner.rotation * Vec3::new(0.0, 0.0, -self.size.z * 0.5)
    }

    /// Whether a sphere at `point` with `radius` intersects the box.
    pub fn overlaps(&self, owner: &Transform, point: Vec3, radius: f32) -> bool {
        let local = owner.rotation.inverse() * (point - self.center(owner));
        let half = self.size * 0.5;
        let closest = local.clamp(-half, half);
        local.distance_squared(closest) <= radius * radius
    }

    /// Open and grow the box. `already_inside` are the entities overlapping
    /// the box before it opened.
    pub fn open(&mut self, strength: f32, already_inside: impl IntoIterator<Item = Entity>) {
        self.enabled = true;
        self.touching = already_inside.into_iter().collect();
        self.targets.clear();
        let grow = strength * Self::GROWTH_PER_STRENGTH;
        self.size += Vec3::new(grow, grow, Self::DEPTH_GROWTH);
    }

    /// Feed the current overlap set. Newly entering entities are collected.
    pub fn observe(&mut self, overlapping: impl IntoIterator<Item = Entity>) {
        if !self.enabled {
            return;
        }
        let current: HashSet<Entity> = overlapping.into_iter().collect();
        for entity in current.difference(&self.touching) {
            self.targets.insert(*entity);
        }
        self.touching = current;
    }

    /// Close the box, reset it to baseline and hand back everything collected.
    pub fn close(&mut self) -> Vec<Entity> {
        self.enabled = false;
        self.size = self.baseline;
        self.touching.clear();
        let mut drained: Vec<Entity> = self.targets.drain().collect();
        drained.sort();
        drained
    }

    /// Number of entities waiting for damage.
    pub fn pending(&self) -> usize {
        self.targets.len()
    }
}

impl Default for HurtBox {
    fn default() -> Self {
        Self::new(Self::BASELINE)
    }
}
