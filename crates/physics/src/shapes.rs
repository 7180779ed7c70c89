//! Collision shapes expressed in their own local frame.

use crate::error::PhysicsError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Box centred on the local origin.
    Box { half_extents: Vec3 },
    /// Cylinder centred on the local origin with its axis along local +Y.
    Cylinder { radius: f32, half_height: f32 },
}

impl Shape {
    /// Reject shapes with non-positive or non-finite dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidShape`] describing the offending dimension.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        match *self {
            Shape::Sphere { radius } if !valid(radius) => {
                Err(PhysicsError::InvalidShape("sphere radius must be positive"))
            }
            Shape::Box { half_extents }
                if !(valid(half_extents.x) && valid(half_extents.y) && valid(half_extents.z)) =>
            {
                Err(PhysicsError::InvalidShape("box half extents must be positive"))
            }
            Shape::Cylinder { radius, half_height } if !(valid(radius) && valid(half_height)) => {
                Err(PhysicsError::InvalidShape("cylinder radius and half height must be positive"))
            }
            _ => Ok(()),
        }
    }

    /// Closest point on or inside the shape to `point`, both in local space.
    ///
    /// Points already inside the shape are returned unchanged.
    #[must_use]
    pub fn closest_point_local(&self, point: Vec3) -> Vec3 {
        match *self {
            Shape::Sphere { radius } => {
                let distance = point.length();
                if distance <= radius {
                    point
                } else {
                    point * (radius / distance)
                }
            }
            Shape::Box { half_extents } => point.clamp(-half_extents, half_extents),
            Shape::Cylinder { radius, half_height } => {
                let y = point.y.clamp(-half_height, half_height);
                let radial = Vec3::new(point.x, 0.0, point.z);
                let radial_len = radial.length();
                let radial = if radial_len > radius {
                    radial * (radius / radial_len)
                } else {
                    radial
                };
                Vec3::new(radial.x, y, radial.z)
            }
        }
    }

    /// Radius of a sphere around the local origin enclosing the shape.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::Box { half_extents } => half_extents.length(),
            Shape::Cylinder { radius, half_height } => {
                (radius * radius + half_height * half_height).sqrt()
            }
        }
    }
}
