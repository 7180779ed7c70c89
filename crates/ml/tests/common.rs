#![allow(dead_code)]

use garden::{ArenaLayout, FlowerArea, FlowerId};
use ml::{AgentConfig, HummingbirdAgent};
use physics::{look_rotation, Body, PhysicsWorld, RigidBody, Transform, Vec3};

pub fn arena() -> (PhysicsWorld, FlowerArea) {
    let mut world = PhysicsWorld::new();
    let (scene, root) = ArenaLayout::default().build(&mut world, Vec3::ZERO).unwrap();
    let mut area = FlowerArea::new(scene, root).unwrap();
    area.sync_transforms(&mut world);
    (world, area)
}

pub fn agent(training: bool) -> HummingbirdAgent<RigidBody> {
    let config = AgentConfig { training_mode: training, ..AgentConfig::default() };
    let body = RigidBody::new(Vec3::new(0.0, 2.0, 0.0), config.mass).with_drag(config.drag, config.angular_drag);
    HummingbirdAgent::new(config, body)
}

/// Pose whose beak tip (0.1 ahead) sits on the flower's nectar centre,
/// looking straight into the opening.
pub fn feeding_pose(area: &FlowerArea, id: FlowerId) -> Transform {
    let flower = area.flower(id);
    let up = flower.up_vector();
    let position = flower.center_position() + up * 0.1;
    Transform::new(position, look_rotation(-up, Vec3::Y))
}

pub fn place(agent: &mut HummingbirdAgent<RigidBody>, area: &FlowerArea, pose: Transform) {
    agent.body_mut().set_pose(pose);
    agent.update_nearest_flower(area);
}

/// Two flowers directly on the X axis at `-1` and `+1`, discovered in that order.
pub fn mirrored_pair() -> FlowerArea {
    use garden::{SceneGraph, FLOWER_COLLIDER_NAME, NECTAR_COLLIDER_NAME};
    use physics::ColliderId;

    let mut scene = SceneGraph::new();
    let root = scene.add_root("FlowerArea", Transform::IDENTITY);
    for (i, x) in [-1.0_f32, 1.0].into_iter().enumerate() {
        let flower = scene
            .add_child(root, format!("Flower{i}"), Transform::from_translation(Vec3::X * x))
            .unwrap();
        scene.mark_flower(flower).unwrap();
        let cup = scene.add_child(flower, FLOWER_COLLIDER_NAME, Transform::IDENTITY).unwrap();
        let nectar = scene.add_child(flower, NECTAR_COLLIDER_NAME, Transform::IDENTITY).unwrap();
        let base = u32::try_from(i * 2).unwrap();
        scene.attach_collider(cup, ColliderId(base)).unwrap();
        scene.attach_collider(nectar, ColliderId(base + 1)).unwrap();
    }
    FlowerArea::new(scene, root).unwrap()
}
