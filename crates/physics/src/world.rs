//! # Collider World
//!
//! Owns every static collider in the arena and answers overlap and
//! closest-point queries through a broad-phase [`SpatialGrid`].

use crate::collision::{detect_sphere_collider, Contact, SpatialGrid};
use crate::error::PhysicsError;
use crate::oracle::PhysicsOracle;
use crate::shapes::Shape;
use crate::transform::Transform;
use crate::types::{BoundingBox, ColliderId, ColliderKind, ColliderTag};
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct Collider {
    pub shape: Shape,
    pub transform: Transform,
    pub kind: ColliderKind,
    pub tag: ColliderTag,
    pub active: bool,
}

impl Collider {
    #[must_use]
    pub fn new(shape: Shape, transform: Transform, kind: ColliderKind, tag: ColliderTag) -> Self {
        Self { shape, transform, kind, tag, active: true }
    }

    /// Closest point on or inside the collider to a world-space point.
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let local = self.transform.inverse_transform_point(point);
        self.transform.transform_point(self.shape.closest_point_local(local))
    }

    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::around_sphere(self.transform.translation, self.shape.bounding_radius())
    }
}

pub struct PhysicsWorld {
    colliders: Vec<Collider>,
    grid: SpatialGrid,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world with a grid sized for a 20 m arena.
    #[must_use]
    pub fn new() -> Self {
        let bounds = BoundingBox {
            min: Vec3::new(-12.0, -2.0, -12.0),
            max: Vec3::new(12.0, 10.0, 12.0),
        };
        Self::with_grid(1.0, bounds)
    }

    #[must_use]
    pub fn with_grid(cell_size: f32, bounds: BoundingBox) -> Self {
        Self {
            colliders: Vec::new(),
            grid: SpatialGrid::new(cell_size, bounds),
        }
    }

    /// Register a collider and return its handle.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidShape`] if the shape has degenerate dimensions.
    pub fn add_collider(&mut self, collider: Collider) -> Result<ColliderId, PhysicsError> {
        collider.shape.validate()?;
        let index = self.colliders.len();
        let id = ColliderId(u32::try_from(index).map_err(|_| PhysicsError::InvalidShape("too many colliders"))?);
        self.grid.insert(index, collider.bounds());
        self.colliders.push(collider);
        Ok(id)
    }

    #[must_use]
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id.index())
    }

    pub fn colliders(&self) -> impl Iterator<Item = (ColliderId, &Collider)> + '_ {
        self.colliders
            .iter()
            .enumerate()
            .map(|(i, c)| (ColliderId(i as u32), c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownCollider`] for a handle this world never issued.
    pub fn try_set_active(&mut self, id: ColliderId, active: bool) -> Result<(), PhysicsError> {
        let collider = self
            .colliders
            .get_mut(id.index())
            .ok_or(PhysicsError::UnknownCollider(id))?;
        collider.active = active;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownCollider`] for a handle this world never issued.
    pub fn try_set_transform(&mut self, id: ColliderId, transform: Transform) -> Result<(), PhysicsError> {
        let index = id.index();
        let collider = self
            .colliders
            .get_mut(index)
            .ok_or(PhysicsError::UnknownCollider(id))?;
        let old_bounds = collider.bounds();
        collider.transform = transform;
        let new_bounds = collider.bounds();
        self.grid.remove(index, old_bounds);
        self.grid.insert(index, new_bounds);
        Ok(())
    }

    /// Active colliders of `kind` touched by the sphere, paired with narrow-phase contacts.
    #[must_use]
    pub fn sphere_contacts(&self, center: Vec3, radius: f32, kind: ColliderKind) -> Vec<(ColliderId, Contact)> {
        self.candidates(center, radius)
            .filter(|(_, c)| c.kind == kind)
            .filter_map(|(id, c)| detect_sphere_collider(center, radius, c).map(|contact| (id, contact)))
            .collect()
    }

    fn candidates(&self, center: Vec3, radius: f32) -> impl Iterator<Item = (ColliderId, &Collider)> + '_ {
        self.grid
            .query(BoundingBox::around_sphere(center, radius))
            .into_iter()
            .map(move |index| (ColliderId(index as u32), &self.colliders[index]))
            .filter(|(_, c)| c.active)
    }
}

impl PhysicsOracle for PhysicsWorld {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderId> {
        self.candidates(center, radius)
            .filter(|(_, c)| c.intersects_sphere(center, radius))
            .map(|(id, _)| id)
            .collect()
    }

    fn closest_point(&self, collider: ColliderId, point: Vec3) -> Option<Vec3> {
        self.collider(collider).map(|c| c.closest_point(point))
    }

    fn tag(&self, collider: ColliderId) -> Option<ColliderTag> {
        self.collider(collider).map(|c| c.tag)
    }

    fn set_collider_active(&mut self, collider: ColliderId, active: bool) {
        if let Err(e) = self.try_set_active(collider, active) {
            tracing::warn!("set_collider_active ignored: {e}");
        }
    }

    fn set_collider_transform(&mut self, collider: ColliderId, transform: Transform) {
        if let Err(e) = self.try_set_transform(collider, transform) {
            tracing::warn!("set_collider_transform ignored: {e}");
        }
    }
}
