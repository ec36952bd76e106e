//! Navigable surface boundary.
//!
//! Pathfinding is an external service. The simulation only asks it to snap
//! points onto the walkable surface, to say whether a point is already on
//! it, and to probe down for ground geometry. `FlatArena` is a
//! self-contained implementation used by the headless runner and tests.

use bevy::prelude::*;

/// Queries the simulation makes against a navigation backend.
pub trait NavigationSurface: Send + Sync + 'static {
    /// Closest walkable point within `tolerance` of `point`, if any.
    fn sample_position(&self, point: Vec3, tolerance: f32) -> Option<Vec3>;

    /// Whether `point` already lies on the walkable surface.
    fn is_on_surface(&self, point: Vec3) -> bool;

    /// Cast straight down from `from` up to `max_distance`; returns the
    /// ground contact point.
    fn probe_ground(&self, from: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// The navigation backend used by steering and spawning.
#[derive(Resource)]
pub struct NavMesh(pub Box<dyn NavigationSurface>);

impl NavMesh {
    pub fn new(surface: impl NavigationSurface) -> Self {
        Self(Box::new(surface))
    }
}

impl std::ops::Deref for NavMesh {
    type Target = dyn NavigationSurface;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Axis-aligned flat floor.
#[derive(Debug, Clone)]
pub struct FlatArena {
    pub min: Vec2,
    pub max: Vec2,
    pub floor_height: f32,
}

impl FlatArena {
    /// Square arena of half-width `half_extent` centred on the origin.
    pub fn square(half_extent: f32) -> Self {
        Self {
            min: Vec2::splat(-half_extent),
            max: Vec2::splat(half_extent),
            floor_height: 0.0,
        }
    }

    fn walkable(&self, xz: Vec2) -> bool {
        xz.cmpge(self.min).all() && xz.cmple(self.max).all()
    }
}

impl Default for FlatArena {
    fn default() -> Self {
        Self::square(40.0)
    }
}

impl NavigationSurface for FlatArena {
    fn sample_position(&self, point: Vec3, tolerance: f32) -> Option<Vec3> {
        let xz = Vec2::new(point.x, point.z);
        let snapped = xz.clamp(self.min, self.max);
        let vertical = (point.y - self.floor_height).abs();
        let horizontal = snapped.distance(xz);
        if horizontal.hypot(vertical) > tolerance {
            return None;
        }
        Some(Vec3::new(snapped.x, self.floor_height, snapped.y))
    }

    fn is_on_surface(&self, point: Vec3) -> bool {
        (point.y - self.floor_height).abs() < 1e-3 && self.walkable(Vec2::new(point.x, point.z))
    }

    fn probe_ground(&self, from: Vec3, max_distance: f32) -> Option<Vec3> {
        let drop = from.y - self.floor_height;
        let over_floor = self.walkable(Vec2::new(from.x, from.z));
        (over_floor && (0.0..=max_distance).contains(&drop))
            .then(|| Vec3::new(from.x, self.floor_height, from.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_snaps_nearby_points_onto_floor() {
        let arena = FlatArena::square(10.0);
        let sampled = arena.sample_position(Vec3::new(11.0, 0.5, 0.0), 2.0).unwrap();
        assert_eq!(sampled, Vec3::new(10.0, 0.0, 0.0));
        assert!(arena.is_on_surface(sampled));
    }

    #[test]
    fn sample_fails_beyond_tolerance() {
        let arena = FlatArena::square(10.0);
        assert!(arena.sample_position(Vec3::new(20.0, 0.0, 0.0), 4.0).is_none());
    }

    #[test]
    fn raised_points_are_not_on_surface() {
        let arena = FlatArena::square(10.0);
        assert!(!arena.is_on_surface(Vec3::new(1.0, 0.5, 1.0)));
        assert!(arena.is_on_surface(Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn ground_probe_hits_floor_only_within_range() {
        let arena = FlatArena::square(10.0);
        assert_eq!(
            arena.probe_ground(Vec3::new(1.0, 10.0, 1.0), 50.0),
            Some(Vec3::new(1.0, 0.0, 1.0))
        );
        assert!(arena.probe_ground(Vec3::new(1.0, 60.0, 1.0), 50.0).is_none());
        assert!(arena.probe_ground(Vec3::new(30.0, 10.0, 1.0), 50.0).is_none());
    }
}
