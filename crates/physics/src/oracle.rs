//! Interfaces between simulation logic and whatever physics backend hosts it.
//!
//! [`crate::PhysicsWorld`] and [`crate::RigidBody`] implement these traits;
//! tests substitute their own recording fakes.

use crate::transform::Transform;
use crate::types::{ColliderId, ColliderTag};
use glam::Vec3;

/// Synchronous, side-effect-free queries plus collider state switches.
pub trait PhysicsOracle {
    /// Active colliders whose volume intersects the sphere, in ascending id order.
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderId>;

    /// Closest point on the collider's volume to `point`; `point` itself when inside.
    fn closest_point(&self, collider: ColliderId, point: Vec3) -> Option<Vec3>;

    fn tag(&self, collider: ColliderId) -> Option<ColliderTag>;

    /// Make a collider inert (`false`) or collidable again (`true`).
    fn set_collider_active(&mut self, collider: ColliderId, active: bool);

    fn set_collider_transform(&mut self, collider: ColliderId, transform: Transform);
}

/// Primitives the agent needs from its rigid body.
pub trait Body {
    fn pose(&self) -> Transform;
    fn set_pose(&mut self, pose: Transform);
    fn add_force(&mut self, force: Vec3);
    fn set_velocity(&mut self, velocity: Vec3);
    fn set_angular_velocity(&mut self, angular_velocity: Vec3);
    fn velocity(&self) -> Vec3;
    fn sleep(&mut self);
    fn wake_up(&mut self);
    fn is_sleeping(&self) -> bool;
}
