//! Procedural arena construction.
//!
//! Builds the scene hierarchy and registers the matching colliders with a
//! [`PhysicsWorld`]: a floor, four walls and a ceiling tagged
//! [`ColliderTag::Boundary`], and a ring of plants each holding a few flowers.

use crate::error::GardenError;
use crate::flower::{FLOWER_COLLIDER_NAME, NECTAR_COLLIDER_NAME};
use crate::scene::{NodeId, NodeTag, SceneGraph};
use physics::{
    Collider, ColliderKind, ColliderTag, PhysicsWorld, Quat, Shape, Transform, Vec3,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Height of the nectar zone centre above its flower's origin.
const NECTAR_OFFSET: f32 = 0.02;
/// Half height of the flower's solid cup.
const FLOWER_HALF_HEIGHT: f32 = 0.02;
/// Horizontal distance of each flower from its stem.
const FLOWER_REACH: f32 = 0.25;
/// Vertical spacing between flowers on one plant.
const FLOWER_SPACING: f32 = 0.15;
const WALL_THICKNESS: f32 = 0.1;
const STEM_RADIUS: f32 = 0.03;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaLayout {
    pub plants: usize,
    pub flowers_per_plant: usize,
    /// Distance of the plant stems from the arena centre
    pub plant_ring_radius: f32,
    /// Height of the lowest flower on each plant
    pub flower_height: f32,
    /// Half width of the square arena
    pub boundary_half_extent: f32,
    pub boundary_height: f32,
    pub nectar_radius: f32,
    pub flower_radius: f32,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            plants: 4,
            flowers_per_plant: 3,
            plant_ring_radius: 4.0,
            flower_height: 1.2,
            boundary_half_extent: 9.5,
            boundary_height: 6.0,
            nectar_radius: 0.02,
            flower_radius: 0.1,
        }
    }
}

impl ArenaLayout {
    /// Build the scene under a root node named `FlowerArea` at `origin`.
    ///
    /// # Errors
    ///
    /// Fails if the layout has no flowers or a collider dimension is degenerate.
    pub fn build(&self, world: &mut PhysicsWorld, origin: Vec3) -> Result<(SceneGraph, NodeId), GardenError> {
        if self.plants == 0 || self.flowers_per_plant == 0 {
            return Err(GardenError::EmptyArena);
        }

        let mut scene = SceneGraph::new();
        let root = scene.add_root("FlowerArea", Transform::from_translation(origin));
        self.build_boundary(&mut scene, root, world)?;

        let plants_group = scene.add_child(root, "FlowerPlants", Transform::IDENTITY)?;
        for i in 0..self.plants {
            let angle = i as f32 * TAU / self.plants as f32;
            let stem_base = Vec3::new(angle.cos(), 0.0, angle.sin()) * self.plant_ring_radius;
            self.build_plant(&mut scene, plants_group, world, i, stem_base)?;
        }

        tracing::info!(
            plants = self.plants,
            flowers = self.plants * self.flowers_per_plant,
            colliders = world.len(),
            "arena built"
        );
        Ok((scene, root))
    }

    fn build_boundary(&self, scene: &mut SceneGraph, root: NodeId, world: &mut PhysicsWorld) -> Result<(), GardenError> {
        let b = self.boundary_half_extent;
        let h = self.boundary_height;
        let t = WALL_THICKNESS;
        let group = scene.add_child(root, "Boundary", Transform::IDENTITY)?;
        let pieces = [
            ("Floor", Vec3::new(0.0, -t, 0.0), Vec3::new(b, t, b)),
            ("Ceiling", Vec3::new(0.0, h + t, 0.0), Vec3::new(b, t, b)),
            ("WallEast", Vec3::new(b + t, h * 0.5, 0.0), Vec3::new(t, h * 0.5, b)),
            ("WallWest", Vec3::new(-b - t, h * 0.5, 0.0), Vec3::new(t, h * 0.5, b)),
            ("WallNorth", Vec3::new(0.0, h * 0.5, b + t), Vec3::new(b, h * 0.5, t)),
            ("WallSouth", Vec3::new(0.0, h * 0.5, -b - t), Vec3::new(b, h * 0.5, t)),
        ];
        for (name, center, half_extents) in pieces {
            let node = scene.add_child(group, name, Transform::from_translation(center))?;
            add_collider(
                scene,
                world,
                node,
                Shape::Box { half_extents },
                ColliderKind::Solid,
                ColliderTag::Boundary,
            )?;
        }
        Ok(())
    }

    fn build_plant(
        &self,
        scene: &mut SceneGraph,
        parent: NodeId,
        world: &mut PhysicsWorld,
        index: usize,
        stem_base: Vec3,
    ) -> Result<(), GardenError> {
        let plant = scene.add_child(parent, format!("FlowerPlant{index}"), Transform::from_translation(stem_base))?;
        scene.set_tag(plant, NodeTag::FlowerPlant)?;

        let stem_top = self.flower_height + FLOWER_SPACING * self.flowers_per_plant as f32;
        let stem = scene.add_child(plant, "Stem", Transform::from_translation(Vec3::Y * stem_top * 0.5))?;
        add_collider(
            scene,
            world,
            stem,
            Shape::Cylinder { radius: STEM_RADIUS, half_height: stem_top * 0.5 },
            ColliderKind::Solid,
            ColliderTag::Untagged,
        )?;

        for j in 0..self.flowers_per_plant {
            let angle = j as f32 * TAU / self.flowers_per_plant as f32;
            let outward = Vec3::new(angle.cos(), 0.0, angle.sin());
            let local_pos = outward * FLOWER_REACH + Vec3::Y * (self.flower_height + FLOWER_SPACING * j as f32);
            let facing = (outward * 0.7 + Vec3::Y).normalize();
            let local = Transform::new(local_pos, Quat::from_rotation_arc(Vec3::Y, facing));

            let flower = scene.add_child(plant, format!("Flower{j}"), local)?;
            scene.mark_flower(flower)?;

            let cup = scene.add_child(flower, FLOWER_COLLIDER_NAME, Transform::IDENTITY)?;
            add_collider(
                scene,
                world,
                cup,
                Shape::Cylinder { radius: self.flower_radius, half_height: FLOWER_HALF_HEIGHT },
                ColliderKind::Solid,
                ColliderTag::Flower,
            )?;

            let nectar = scene.add_child(
                flower,
                NECTAR_COLLIDER_NAME,
                Transform::from_translation(Vec3::Y * NECTAR_OFFSET),
            )?;
            add_collider(
                scene,
                world,
                nectar,
                Shape::Sphere { radius: self.nectar_radius },
                ColliderKind::Trigger,
                ColliderTag::Nectar,
            )?;
        }
        Ok(())
    }
}

fn add_collider(
    scene: &mut SceneGraph,
    world: &mut PhysicsWorld,
    node: NodeId,
    shape: Shape,
    kind: ColliderKind,
    tag: ColliderTag,
) -> Result<(), GardenError> {
    let transform = scene.world_transform(node)?;
    let id = world.add_collider(Collider::new(shape, transform, kind, tag))?;
    scene.attach_collider(node, id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::discover_flowers;

    #[test]
    fn default_layout_builds_expected_flowers() {
        let mut world = PhysicsWorld::new();
        let (scene, root) = ArenaLayout::default().build(&mut world, Vec3::ZERO).unwrap();
        let found = discover_flowers(&scene, root);
        assert_eq!(found.plants.len(), 4);
        assert_eq!(found.flowers.len(), 12);
        // 6 boundary pieces, and per plant a stem plus two colliders per flower
        assert_eq!(world.len(), 6 + 4 * (1 + 3 * 2));
    }

    #[test]
    fn empty_layout_is_rejected() {
        let mut world = PhysicsWorld::new();
        let layout = ArenaLayout { plants: 0, ..ArenaLayout::default() };
        assert_eq!(layout.build(&mut world, Vec3::ZERO).unwrap_err(), GardenError::EmptyArena);
    }
}
