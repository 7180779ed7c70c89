//! # Flower Area
//!
//! Owns the flowers of one arena together with the scene subtree they live
//! in. The flower list and the nectar-collider index are built once from a
//! [`discover_flowers`] pass and never change afterwards.

use crate::error::GardenError;
use crate::flower::Flower;
use crate::rng::range_f32;
use crate::scene::{discover_flowers, NodeId, SceneGraph};
use fastrand::Rng;
use physics::{quat_from_euler_degrees, ColliderId, PhysicsOracle, Quat, Transform, Vec3};
use std::collections::HashMap;

/// Diameter used to normalise distances in observations.
pub const AREA_DIAMETER: f32 = 20.0;

/// Maximum plant tilt about X and Z on reset, in degrees.
pub const MAX_PLANT_TILT: f32 = 5.0;

/// Position of a flower in [`FlowerArea::flowers`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowerId(pub usize);

pub struct FlowerArea {
    scene: SceneGraph,
    root: NodeId,
    plants: Vec<NodeId>,
    flowers: Vec<Flower>,
    nectar_index: HashMap<ColliderId, FlowerId>,
}

impl FlowerArea {
    /// Discover every flower below `root` and index them by nectar collider.
    ///
    /// # Errors
    ///
    /// Fails when a flower node is malformed, when two flowers share a nectar
    /// collider, or when no flower exists at all.
    pub fn new(scene: SceneGraph, root: NodeId) -> Result<Self, GardenError> {
        scene.node(root)?;
        let discovery = discover_flowers(&scene, root);

        let mut flowers = Vec::with_capacity(discovery.flowers.len());
        let mut nectar_index = HashMap::with_capacity(discovery.flowers.len());
        for node in discovery.flowers {
            let flower = Flower::from_scene(&scene, node)?;
            let id = FlowerId(flowers.len());
            if nectar_index.insert(flower.nectar_collider(), id).is_some() {
                return Err(GardenError::DuplicateNectar(flower.nectar_collider()));
            }
            flowers.push(flower);
        }
        if flowers.is_empty() {
            return Err(GardenError::EmptyArena);
        }

        tracing::debug!(
            plants = discovery.plants.len(),
            flowers = flowers.len(),
            "flower area discovered"
        );

        Ok(Self {
            scene,
            root,
            plants: discovery.plants,
            flowers,
            nectar_index,
        })
    }

    /// Start-of-episode reset.
    ///
    /// First every plant gets a fresh pose (tilt within ±5° about X and Z,
    /// any yaw), and the new collider placements are pushed to `oracle`.
    /// Only then is every flower refilled and reactivated.
    pub fn reset_flowers(&mut self, rng: &mut Rng, oracle: &mut impl PhysicsOracle) {
        for &plant in &self.plants {
            let x_rot = range_f32(rng, -MAX_PLANT_TILT, MAX_PLANT_TILT);
            let y_rot = range_f32(rng, -180.0, 180.0);
            let z_rot = range_f32(rng, -MAX_PLANT_TILT, MAX_PLANT_TILT);
            if let Ok(node) = self.scene.node_mut(plant) {
                node.local.rotation = quat_from_euler_degrees(x_rot, y_rot, z_rot);
            }
        }
        self.sync_transforms(oracle);

        for flower in &mut self.flowers {
            flower.reset();
            for collider in flower.colliders() {
                oracle.set_collider_active(collider, true);
            }
        }
    }

    /// Recompute flower frames and push every collider's world transform to `oracle`.
    pub fn sync_transforms(&mut self, oracle: &mut impl PhysicsOracle) {
        for node in self.scene.descendants(self.root) {
            let Ok(scene_node) = self.scene.node(node) else { continue };
            if let Some(collider) = scene_node.collider {
                if let Ok(world) = self.scene.world_transform(node) {
                    oracle.set_collider_transform(collider, world);
                }
            }
        }
        for flower in &mut self.flowers {
            if let Err(e) = flower.refresh_frames(&self.scene) {
                tracing::warn!("flower frame refresh failed: {e}");
            }
        }
    }

    /// Feed from a flower and switch its colliders off if it ran dry.
    pub fn feed(&mut self, id: FlowerId, amount: f32, oracle: &mut impl PhysicsOracle) -> f32 {
        let flower = &mut self.flowers[id.0];
        let taken = flower.feed(amount);
        if !flower.is_active() {
            for collider in flower.colliders() {
                oracle.set_collider_active(collider, false);
            }
        }
        taken
    }

    /// Owner of a nectar collider.
    ///
    /// # Panics
    ///
    /// Panics if the collider was not indexed at construction; that means the
    /// scene and the physics world disagree.
    #[must_use]
    pub fn flower_from_nectar(&self, nectar: ColliderId) -> FlowerId {
        match self.nectar_index.get(&nectar) {
            Some(&id) => id,
            None => panic!("{nectar} is not the nectar collider of any flower in this area"),
        }
    }

    /// Non-panicking variant of [`FlowerArea::flower_from_nectar`].
    #[must_use]
    pub fn try_flower_from_nectar(&self, nectar: ColliderId) -> Option<FlowerId> {
        self.nectar_index.get(&nectar).copied()
    }

    #[must_use]
    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    #[must_use]
    pub fn flower(&self, id: FlowerId) -> &Flower {
        &self.flowers[id.0]
    }

    pub fn flower_ids(&self) -> impl Iterator<Item = FlowerId> {
        (0..self.flowers.len()).map(FlowerId)
    }

    #[must_use]
    pub fn flowers_with_nectar(&self) -> usize {
        self.flowers.iter().filter(|f| f.has_nectar()).count()
    }

    #[must_use]
    pub fn plants(&self) -> &[NodeId] {
        &self.plants
    }

    /// Current local rotation of a plant node.
    #[must_use]
    pub fn plant_rotation(&self, plant: NodeId) -> Option<Quat> {
        self.scene.node(plant).ok().map(|n| n.local.rotation)
    }

    /// World-space centre of the arena.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.frame().translation
    }

    /// World frame of the arena root.
    #[must_use]
    pub fn frame(&self) -> Transform {
        self.scene.world_transform(self.root).unwrap_or_default()
    }

    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }
}
