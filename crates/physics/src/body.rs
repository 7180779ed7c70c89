//! # Rigid Body Integration
//!
//! A single force-driven rigid body advanced with semi-implicit Euler steps.

use crate::oracle::Body;
use crate::transform::Transform;
use glam::{Quat, Vec3};

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

#[derive(Clone, Debug)]
pub struct RigidBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Linear damping coefficient per second
    pub drag: f32,
    /// Angular damping coefficient per second
    pub angular_drag: f32,
    pub use_gravity: bool,
    sleeping: bool,
    accumulated_force: Vec3,
}

impl RigidBody {
    #[must_use]
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            drag: 0.0,
            angular_drag: 0.05,
            use_gravity: false,
            sleeping: false,
            accumulated_force: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn with_drag(mut self, drag: f32, angular_drag: f32) -> Self {
        self.drag = drag;
        self.angular_drag = angular_drag;
        self
    }

    #[must_use]
    pub fn accumulated_force(&self) -> Vec3 {
        self.accumulated_force
    }

    /// Advance the body by `dt` seconds and clear the force accumulator.
    pub fn integrate(&mut self, dt: f32) {
        if self.sleeping {
            self.accumulated_force = Vec3::ZERO;
            return;
        }

        let mut acceleration = self.accumulated_force / self.mass;
        if self.use_gravity {
            acceleration += GRAVITY;
        }
        self.velocity += acceleration * dt;
        self.velocity *= 1.0 / (1.0 + self.drag * dt);
        self.position += self.velocity * dt;

        self.angular_velocity *= 1.0 / (1.0 + self.angular_drag * dt);
        let spin = Quat::from_scaled_axis(self.angular_velocity * dt);
        self.rotation = (spin * self.rotation).normalize();

        self.accumulated_force = Vec3::ZERO;
    }
}

impl Body for RigidBody {
    fn pose(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    fn set_pose(&mut self, pose: Transform) {
        self.position = pose.translation;
        self.rotation = pose.rotation;
    }

    fn add_force(&mut self, force: Vec3) {
        self.sleeping = false;
        self.accumulated_force += force;
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity = angular_velocity;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn sleep(&mut self) {
        self.sleeping = true;
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.accumulated_force = Vec3::ZERO;
    }

    fn wake_up(&mut self) {
        self.sleeping = false;
    }

    fn is_sleeping(&self) -> bool {
        self.sleeping
    }
}
