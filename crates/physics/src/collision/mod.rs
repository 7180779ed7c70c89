//! # Collision Detection and Response
//!
//! Narrow-phase detection between a body's bounding sphere and static
//! colliders, plus the response that keeps the body outside solid geometry.

mod broad_phase;

pub use broad_phase::*;

use crate::body::RigidBody;
use crate::world::Collider;
use glam::Vec3;

/// Contact information for collision response
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Contact point on the collider surface in world space
    pub point: Vec3,
    /// Contact normal pointing from the collider towards the body
    pub normal: Vec3,
    /// Penetration depth
    pub depth: f32,
}

/// Detect overlap between a sphere and a collider.
#[must_use]
pub fn detect_sphere_collider(center: Vec3, radius: f32, collider: &Collider) -> Option<Contact> {
    let closest = collider.closest_point(center);
    let delta = center - closest;
    let distance_squared = delta.length_squared();
    if distance_squared >= radius * radius {
        return None;
    }

    let distance = distance_squared.sqrt();
    let normal = if distance > 1e-4 {
        delta / distance
    } else {
        // Centre is inside the collider; push out along the line from its origin
        (center - collider.transform.translation)
            .try_normalize()
            .unwrap_or(Vec3::Y)
    };

    Some(Contact {
        point: closest,
        normal,
        depth: radius - distance,
    })
}

/// Push a body out of a static solid and cancel its velocity into the surface.
pub fn resolve_static_contact(body: &mut RigidBody, contact: &Contact) {
    const POSITION_CORRECTION_SLOP: f32 = 1e-4;

    let velocity_along_normal = body.velocity.dot(contact.normal);
    if velocity_along_normal < 0.0 {
        body.velocity -= contact.normal * velocity_along_normal;
    }

    let correction = (contact.depth - POSITION_CORRECTION_SLOP).max(0.0);
    body.position += contact.normal * correction;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;
    use crate::transform::Transform;
    use crate::types::{ColliderKind, ColliderTag};

    fn floor() -> Collider {
        Collider::new(
            Shape::Box { half_extents: Vec3::new(5.0, 0.5, 5.0) },
            Transform::from_translation(Vec3::new(0.0, -0.5, 0.0)),
            ColliderKind::Solid,
            ColliderTag::Boundary,
        )
    }

    #[test]
    fn sphere_above_floor_has_no_contact() {
        assert!(detect_sphere_collider(Vec3::new(0.0, 1.0, 0.0), 0.5, &floor()).is_none());
    }

    #[test]
    fn resting_penetration_is_resolved_upwards() {
        let contact = detect_sphere_collider(Vec3::new(0.0, 0.3, 0.0), 0.5, &floor())
            .expect("sphere overlaps floor");
        assert!((contact.normal - Vec3::Y).length() < 1e-6);
        assert!((contact.depth - 0.2).abs() < 1e-6);

        let mut body = RigidBody::new(Vec3::new(0.0, 0.3, 0.0), 1.0);
        body.velocity = Vec3::new(1.0, -2.0, 0.0);
        resolve_static_contact(&mut body, &contact);
        assert!(body.position.y > 0.49);
        assert!(body.velocity.y.abs() < 1e-6);
        assert!((body.velocity.x - 1.0).abs() < 1e-6);
    }
}
