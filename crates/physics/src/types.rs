use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a collider registered with a [`crate::PhysicsWorld`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

impl ColliderId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collider#{}", self.0)
    }
}

/// Gameplay tag attached to a collider and delivered with contact events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderTag {
    #[default]
    Untagged,
    /// Feeding zone of a flower.
    Nectar,
    /// Arena walls, floor and ceiling.
    Boundary,
    /// Solid body of a flower.
    Flower,
}

/// Whether a collider blocks bodies or only reports overlaps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderKind {
    Solid,
    Trigger,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn around_sphere(center: Vec3, radius: f32) -> Self {
        let r = Vec3::splat(radius);
        Self { min: center - r, max: center + r }
    }
}
