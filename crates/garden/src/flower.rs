//! A single nectar-bearing flower.

use crate::error::GardenError;
use crate::scene::{NodeId, SceneGraph};
use physics::{ColliderId, Transform, Vec3};

pub const FLOWER_COLLIDER_NAME: &str = "FlowerCollider";
pub const NECTAR_COLLIDER_NAME: &str = "FlowerNectarCollider";

/// Visual state signalled to whatever renders the flower.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlowerColor {
    Full,
    Empty,
}

impl FlowerColor {
    #[must_use]
    pub const fn rgb(self) -> [f32; 3] {
        match self {
            FlowerColor::Full => [1.0, 0.0, 0.3],
            FlowerColor::Empty => [0.5, 0.0, 1.0],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Flower {
    node: NodeId,
    nectar_node: NodeId,
    flower_collider: ColliderId,
    nectar_collider: ColliderId,
    nectar_amount: f32,
    active: bool,
    color: FlowerColor,
    frame: Transform,
    nectar_frame: Transform,
}

impl Flower {
    /// Bind a flower to its scene node and the two collider children below it.
    ///
    /// The flower starts full and active.
    ///
    /// # Errors
    ///
    /// Fails if either collider child is missing or carries no collider.
    pub fn from_scene(scene: &SceneGraph, node: NodeId) -> Result<Self, GardenError> {
        let collider_of = |name: &'static str| -> Result<(NodeId, ColliderId), GardenError> {
            let child = scene
                .find_child(node, name)
                .ok_or(GardenError::MissingChild { flower: node, child: name })?;
            let collider = scene
                .node(child)?
                .collider
                .ok_or(GardenError::MissingCollider(child))?;
            Ok((child, collider))
        };
        let (_, flower_collider) = collider_of(FLOWER_COLLIDER_NAME)?;
        let (nectar_node, nectar_collider) = collider_of(NECTAR_COLLIDER_NAME)?;

        let mut flower = Self {
            node,
            nectar_node,
            flower_collider,
            nectar_collider,
            nectar_amount: 1.0,
            active: true,
            color: FlowerColor::Full,
            frame: Transform::IDENTITY,
            nectar_frame: Transform::IDENTITY,
        };
        flower.refresh_frames(scene)?;
        Ok(flower)
    }

    /// Take up to `amount` nectar and return how much was actually available.
    ///
    /// The stored amount drops by the full request and is floored at zero.
    /// A flower that has run dry, or that yields nothing, is deactivated
    /// and turns [`FlowerColor::Empty`].
    pub fn feed(&mut self, amount: f32) -> f32 {
        let nectar_taken = amount.clamp(0.0, self.nectar_amount);
        self.nectar_amount -= amount;

        if nectar_taken <= 0.0 || self.nectar_amount <= 0.0 {
            self.nectar_amount = 0.0;
            self.active = false;
            self.color = FlowerColor::Empty;
        }

        nectar_taken
    }

    /// Refill the flower and make it collidable again.
    pub fn reset(&mut self) {
        self.nectar_amount = 1.0;
        self.active = true;
        self.color = FlowerColor::Full;
    }

    /// Recompute the cached world frames after the scene moved.
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] if the flower's nodes were removed.
    pub fn refresh_frames(&mut self, scene: &SceneGraph) -> Result<(), GardenError> {
        self.frame = scene.world_transform(self.node)?;
        self.nectar_frame = scene.world_transform(self.nectar_node)?;
        Ok(())
    }

    #[must_use]
    pub fn nectar_amount(&self) -> f32 {
        self.nectar_amount
    }

    #[must_use]
    pub fn has_nectar(&self) -> bool {
        self.nectar_amount > 0.0
    }

    /// Whether both colliders should currently be collidable.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn color(&self) -> FlowerColor {
        self.color
    }

    /// Up axis of the nectar zone.
    #[must_use]
    pub fn up_vector(&self) -> Vec3 {
        self.nectar_frame.up()
    }

    /// Centre of the nectar zone.
    #[must_use]
    pub fn center_position(&self) -> Vec3 {
        self.nectar_frame.translation
    }

    /// World frame of the flower node itself.
    #[must_use]
    pub fn frame(&self) -> Transform {
        self.frame
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.frame.translation
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[must_use]
    pub fn nectar_collider(&self) -> ColliderId {
        self.nectar_collider
    }

    #[must_use]
    pub fn flower_collider(&self) -> ColliderId {
        self.flower_collider
    }

    #[must_use]
    pub fn colliders(&self) -> [ColliderId; 2] {
        [self.flower_collider, self.nectar_collider]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flower() -> Flower {
        let mut scene = SceneGraph::new();
        let root = scene.add_root("flower", Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let body = scene.add_child(root, FLOWER_COLLIDER_NAME, Transform::IDENTITY).unwrap();
        let nectar = scene
            .add_child(root, NECTAR_COLLIDER_NAME, Transform::from_translation(Vec3::new(0.0, 0.1, 0.0)))
            .unwrap();
        scene.attach_collider(body, ColliderId(0)).unwrap();
        scene.attach_collider(nectar, ColliderId(1)).unwrap();
        scene.mark_flower(root).unwrap();
        Flower::from_scene(&scene, root).unwrap()
    }

    #[test]
    fn new_flower_is_full() {
        let f = flower();
        assert!(f.has_nectar());
        assert!(f.is_active());
        assert_eq!(f.color(), FlowerColor::Full);
        assert!((f.center_position() - Vec3::new(1.0, 2.1, 3.0)).length() < 1e-6);
        assert!((f.up_vector() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn partial_feed_takes_requested_amount() {
        let mut f = flower();
        let taken = f.feed(0.25);
        assert!((taken - 0.25).abs() < 1e-6);
        assert!((f.nectar_amount() - 0.75).abs() < 1e-6);
        assert!(f.is_active());
    }

    #[test]
    fn overfeeding_empties_and_deactivates() {
        let mut f = flower();
        f.feed(0.6);
        let before = f.nectar_amount();
        let taken = f.feed(0.9);
        assert!((taken - before).abs() < 1e-6);
        assert!(taken <= 0.9);
        assert_eq!(f.nectar_amount(), 0.0);
        assert!(!f.has_nectar());
        assert!(!f.is_active());
        assert_eq!(f.color(), FlowerColor::Empty);
    }

    #[test]
    fn feeding_an_empty_flower_yields_nothing() {
        let mut f = flower();
        f.feed(1.0);
        assert_eq!(f.feed(0.01), 0.0);
        assert_eq!(f.nectar_amount(), 0.0);
    }

    #[test]
    fn zero_request_empties_the_flower() {
        let mut f = flower();
        assert_eq!(f.feed(0.0), 0.0);
        assert_eq!(f.nectar_amount(), 0.0);
        assert!(!f.is_active());
    }

    #[test]
    fn hundred_small_feeds_drain_a_flower() {
        let mut f = flower();
        let mut total = 0.0;
        let mut feeds = 0;
        while f.is_active() {
            total += f.feed(0.01);
            feeds += 1;
            assert!(feeds <= 101);
        }
        assert!((total - 1.0).abs() < 1e-4, "total {total}");
    }

    #[test]
    fn reset_restores_full_state() {
        let mut f = flower();
        f.feed(2.0);
        f.reset();
        assert_eq!(f.nectar_amount(), 1.0);
        assert!(f.has_nectar());
        assert!(f.is_active());
        assert_eq!(f.color(), FlowerColor::Full);
    }

    #[test]
    fn missing_nectar_child_is_reported() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root("flower", Transform::IDENTITY);
        let body = scene.add_child(root, FLOWER_COLLIDER_NAME, Transform::IDENTITY).unwrap();
        scene.attach_collider(body, ColliderId(0)).unwrap();
        let err = Flower::from_scene(&scene, root).unwrap_err();
        assert_eq!(err, GardenError::MissingChild { flower: root, child: NECTAR_COLLIDER_NAME });
    }
}
