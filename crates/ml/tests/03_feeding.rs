mod common;

use garden::{FlowerColor, FlowerId};
use ml::{ALIGNMENT_BONUS, BOUNDARY_PENALTY, FEED_REWARD, NECTAR_PER_FEED};
use physics::{Body, ColliderTag, PhysicsOracle, Vec3};

#[test]
fn aligned_feed_earns_full_bonus() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    let id = FlowerId(4);
    common::place(&mut agent, &area, common::feeding_pose(&area, id));

    let nectar = area.flower(id).nectar_collider();
    let received = agent.trigger_enter_or_stay(nectar, &mut area, &mut world);

    assert_eq!(received, Some(NECTAR_PER_FEED));
    assert!((agent.nectar_obtained() - NECTAR_PER_FEED).abs() < 1e-6);
    assert!((area.flower(id).nectar_amount() - (1.0 - NECTAR_PER_FEED)).abs() < 1e-6);
    let reward = agent.take_reward();
    assert!((reward - (FEED_REWARD + ALIGNMENT_BONUS)).abs() < 1e-5, "reward {reward}");
    assert_eq!(agent.take_reward(), 0.0);
}

#[test]
fn beak_facing_away_earns_base_reward_only() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    let id = FlowerId(1);
    let mut pose = common::feeding_pose(&area, id);
    // Turn around the beak tip so it stays in the nectar.
    let tip = agent.config().beak_tip_offset;
    pose.rotation = glam::Quat::from_rotation_arc(Vec3::Z, area.flower(id).up_vector());
    pose.translation = area.flower(id).center_position() - pose.rotation * tip;
    common::place(&mut agent, &area, pose);

    let nectar = area.flower(id).nectar_collider();
    assert!(agent.trigger_enter_or_stay(nectar, &mut area, &mut world).is_some());
    assert!((agent.take_reward() - FEED_REWARD).abs() < 1e-5);
}

#[test]
fn beak_outside_nectar_does_not_feed() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    let id = FlowerId(0);
    let mut pose = common::feeding_pose(&area, id);
    pose.translation += area.flower(id).up_vector() * 0.05;
    common::place(&mut agent, &area, pose);

    let nectar = area.flower(id).nectar_collider();
    assert_eq!(agent.trigger_enter_or_stay(nectar, &mut area, &mut world), None);
    assert_eq!(agent.take_reward(), 0.0);
    assert_eq!(area.flower(id).nectar_amount(), 1.0);
}

#[test]
fn non_nectar_trigger_is_ignored() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    let id = FlowerId(0);
    common::place(&mut agent, &area, common::feeding_pose(&area, id));

    let cup = area.flower(id).flower_collider();
    assert_eq!(agent.trigger_enter_or_stay(cup, &mut area, &mut world), None);
    assert_eq!(agent.nectar_obtained(), 0.0);
}

#[test]
fn gameplay_feeds_without_reward() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(false);
    let id = FlowerId(6);
    common::place(&mut agent, &area, common::feeding_pose(&area, id));

    let nectar = area.flower(id).nectar_collider();
    assert_eq!(agent.trigger_enter_or_stay(nectar, &mut area, &mut world), Some(NECTAR_PER_FEED));
    assert_eq!(agent.take_reward(), 0.0);
    assert!(agent.nectar_obtained() > 0.0);
}

#[test]
fn draining_a_flower_disables_it_and_retargets() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    let id = FlowerId(9);
    common::place(&mut agent, &area, common::feeding_pose(&area, id));
    let nectar = area.flower(id).nectar_collider();

    let mut total = 0.0;
    for _ in 0..200 {
        match agent.trigger_enter_or_stay(nectar, &mut area, &mut world) {
            Some(received) => total += received,
            None => break,
        }
        if !area.flower(id).has_nectar() {
            break;
        }
    }

    let flower = area.flower(id);
    assert!((total - 1.0).abs() < 1e-3, "total {total}");
    assert_eq!(flower.nectar_amount(), 0.0);
    assert!(!flower.is_active());
    assert_eq!(flower.color(), FlowerColor::Empty);
    assert!(!world.collider(nectar).unwrap().active);
    assert!(world.overlap_sphere(agent.beak_tip(), 0.01).iter().all(|&c| c != nectar));
    assert_ne!(agent.nearest_flower(), Some(id));
}

#[test]
fn boundary_collision_is_penalised_in_training_only() {
    let mut training = common::agent(true);
    training.on_collision_enter(ColliderTag::Flower);
    assert_eq!(training.take_reward(), 0.0);
    training.on_collision_enter(ColliderTag::Boundary);
    assert_eq!(training.take_reward(), BOUNDARY_PENALTY);
    assert_eq!(training.cumulative_reward(), BOUNDARY_PENALTY);

    let mut gameplay = common::agent(false);
    gameplay.on_collision_enter(ColliderTag::Boundary);
    assert_eq!(gameplay.take_reward(), 0.0);
}

#[test]
fn agent_body_position_is_untouched_by_feeding() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    let pose = common::feeding_pose(&area, FlowerId(10));
    common::place(&mut agent, &area, pose);
    let nectar = area.flower(FlowerId(10)).nectar_collider();
    agent.trigger_enter_or_stay(nectar, &mut area, &mut world);
    assert_eq!(agent.body().pose(), pose);
}
