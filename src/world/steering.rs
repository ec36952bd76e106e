//! Steering agents: the movement half of the navigation service.
//!
//! Gameplay code only sets destinations, toggles agents and warps them.
//! `drive_steering_agents` stands in for the engine's path follower: it moves
//! each agent straight toward its destination at a bounded speed and keeps it
//! on the walkable surface.

use bevy::log::warn_once;
use bevy::prelude::*;

use super::navigation::NavMesh;
use crate::combat::Dead;
use crate::core::PresentationCue;

/// Agents closer than this to their destination stop.
const ARRIVAL_DISTANCE: f32 = 0.05;

/// How far a moved agent may be snapped back onto the surface.
const SURFACE_SNAP_TOLERANCE: f32 = 1.0;

/// Speed changes smaller than this are not reported.
const SPEED_REPORT_EPSILON: f32 = 0.01;

/// Per-entity movement agent.
#[derive(Component, Debug, Clone)]
pub struct SteeringAgent {
    pub speed: f32,
    enabled: bool,
    destination: Option<Vec3>,
    velocity: Vec3,
    reported_speed: f32,
}

impl SteeringAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            enabled: true,
            destination: None,
            velocity: Vec3::ZERO,
            reported_speed: 0.0,
        }
    }

    pub fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.velocity = Vec3::ZERO;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Teleport to `point` and forget the current destination.
    pub fn warp_to(&mut self, transform: &mut Transform, point: Vec3) {
        transform.translation = point;
        self.destination = None;
        self.velocity = Vec3::ZERO;
    }

    /// Stop where the agent currently stands.
    pub fn halt(&mut self, position: Vec3) {
        self.destination = Some(position);
        self.velocity = Vec3::ZERO;
    }

    pub fn is_on_navigable_surface(&self, position: Vec3, nav: &NavMesh) -> bool {
        nav.is_on_surface(position)
    }

    pub fn current_velocity_magnitude(&self) -> f32 {
        self.velocity.length()
    }
}

/// Move agents toward their destinations.
pub fn drive_steering_agents(
    time: Res<Time>,
    nav: Option<Res<NavMesh>>,
    mut agents: Query<(&mut Transform, &mut SteeringAgent), Without<Dead>>,
) {
    let dt = time.delta_secs();
    if nav.is_none() {
        warn_once!("No NavMesh resource; steering agents move without surface checks");
    }

    for (mut transform, mut agent) in agents.iter_mut() {
        if !agent.enabled || dt <= 0.0 {
            agent.velocity = Vec3::ZERO;
            continue;
        }

        let Some(destination) = agent.destination else {
            agent.velocity = Vec3::ZERO;
            continue;
        };

        let to_goal = destination - transform.translation;
        let distance = to_goal.length();
        if distance <= ARRIVAL_DISTANCE {
            agent.velocity = Vec3::ZERO;
            continue;
        }

        let step = (agent.speed * dt).min(distance);
        let mut next = transform.translation + to_goal / distance * step;
        if let Some(nav) = nav.as_deref() {
            match nav.sample_position(next, SURFACE_SNAP_TOLERANCE) {
                Some(on_surface) => next = on_surface,
                None => {
                    agent.velocity = Vec3::ZERO;
                    continue;
                }
            }
        }

        agent.velocity = (next - transform.translation) / dt;
        transform.translation = next;
    }
}

/// Tell presentation about agents whose speed changed this tick.
pub fn report_locomotion(
    mut agents: Query<(Entity, &mut SteeringAgent)>,
    mut cues: EventWriter<PresentationCue>,
) {
    for (entity, mut agent) in agents.iter_mut() {
        let speed = agent.current_velocity_magnitude();
        if (speed - agent.reported_speed).abs() < SPEED_REPORT_EPSILON {
            continue;
        }
        agent.reported_speed = speed;
        cues.send(PresentationCue::Locomotion { entity, speed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FlatArena;

    #[test]
    fn halt_pins_destination_to_current_position() {
        let mut agent = SteeringAgent::new(3.0);
        agent.set_destination(Vec3::new(5.0, 0.0, 0.0));
        agent.halt(Vec3::ONE);
        assert_eq!(agent.destination(), Some(Vec3::ONE));
        assert_eq!(agent.current_velocity_magnitude(), 0.0);
    }

    #[test]
    fn warp_moves_transform_and_clears_destination() {
        let mut agent = SteeringAgent::new(3.0);
        let mut transform = Transform::default();
        agent.set_destination(Vec3::X);
        agent.warp_to(&mut transform, Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(transform.translation, Vec3::new(2.0, 0.0, 2.0));
        assert!(agent.destination().is_none());
    }

    #[test]
    fn surface_check_delegates_to_nav_mesh() {
        let nav = NavMesh::new(FlatArena::square(5.0));
        let agent = SteeringAgent::new(1.0);
        assert!(agent.is_on_navigable_surface(Vec3::ZERO, &nav));
        assert!(!agent.is_on_navigable_surface(Vec3::new(9.0, 0.0, 0.0), &nav));
    }
}
