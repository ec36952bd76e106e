//! Facing helpers: flat look rotations and exponential turn smoothing.

use bevy::prelude::*;

/// Rotation that looks from `from` toward `to` on the horizontal plane.
///
/// Returns `None` when the two points coincide horizontally, since there is
/// no meaningful direction to face.
pub fn flat_look_rotation(from: Vec3, to: Vec3) -> Option<Quat> {
    let direction = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if direction.length_squared() < 1e-6 {
        return None;
    }
    Some(Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation)
}

/// Move `current` a fraction of the way toward `target`.
///
/// The fraction is `turning_rate * dt`, capped at 1, so turning speed depends
/// only on the rate and the frame time.
pub fn smooth_toward(current: Quat, target: Quat, turning_rate: f32, dt: f32) -> Quat {
    let t = (turning_rate * dt).clamp(0.0, 1.0);
    current.slerp(target, t)
}

/// Horizontal forward direction of a transform.
pub fn flat_forward(transform: &Transform) -> Vec3 {
    let forward = transform.forward().as_vec3();
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    flat.try_normalize().unwrap_or(Vec3::NEG_Z)
}
