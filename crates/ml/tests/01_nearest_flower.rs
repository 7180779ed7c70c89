mod common;

use garden::FlowerId;
use ml::AgentError;

#[test]
fn targets_flower_closest_to_beak() {
    let (_world, area) = common::arena();
    let mut agent = common::agent(true);
    for id in [FlowerId(0), FlowerId(5), FlowerId(11)] {
        common::place(&mut agent, &area, common::feeding_pose(&area, id));
        assert_eq!(agent.nearest_flower(), Some(id));
    }
}

#[test]
fn equidistant_flowers_resolve_to_first_discovered() {
    let area = common::mirrored_pair();
    let mut agent = common::agent(true);
    // Beak tip sits 0.1 ahead of the body, so this puts it on the origin.
    let pose = physics::Transform::from_translation(physics::Vec3::new(0.0, 0.0, -0.1));
    common::place(&mut agent, &area, pose);

    let d0 = area.flower(FlowerId(0)).position().distance(agent.beak_tip());
    let d1 = area.flower(FlowerId(1)).position().distance(agent.beak_tip());
    assert_eq!(d0, d1);
    assert_eq!(agent.nearest_flower(), Some(FlowerId(0)));
}

#[test]
fn empty_flowers_are_skipped() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    common::place(&mut agent, &area, common::feeding_pose(&area, FlowerId(3)));

    area.feed(FlowerId(3), 1.0, &mut world);
    agent.update_nearest_flower(&area);

    let target = agent.nearest_flower().unwrap();
    assert_ne!(target, FlowerId(3));
    assert!(area.flower(target).has_nectar());
}

#[test]
fn fixed_update_retargets_after_flower_runs_dry() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    common::place(&mut agent, &area, common::feeding_pose(&area, FlowerId(7)));

    area.feed(FlowerId(7), 1.0, &mut world);
    assert_eq!(agent.nearest_flower(), Some(FlowerId(7)));
    agent.fixed_update(&area);
    assert_ne!(agent.nearest_flower(), Some(FlowerId(7)));
}

#[test]
fn no_target_once_every_flower_is_empty() {
    let (mut world, mut area) = common::arena();
    let mut agent = common::agent(true);
    let ids: Vec<_> = area.flower_ids().collect();
    for id in ids {
        area.feed(id, 1.0, &mut world);
    }
    agent.update_nearest_flower(&area);

    assert_eq!(agent.nearest_flower(), None);
    assert!(agent.debug_line(&area).is_none());
    assert!(matches!(agent.collect_observations(&area), Err(AgentError::NoNearestFlower)));
}

#[test]
fn observation_looking_into_flower() {
    let (_world, area) = common::arena();
    let mut agent = common::agent(true);
    let id = FlowerId(2);
    // Back off along the flower axis so the direction to the nectar is defined.
    let mut pose = common::feeding_pose(&area, id);
    pose.translation += area.flower(id).up_vector() * 0.5;
    common::place(&mut agent, &area, pose);

    let obs = agent.collect_observations(&area).unwrap();
    assert_eq!(obs.as_slice().len(), ml::OBSERVATION_SIZE);
    let q = glam::Quat::from_array(obs.rotation);
    assert!((q.length() - 1.0).abs() < 1e-4);
    assert!((obs.beak_alignment - 1.0).abs() < 1e-4);
    assert!((obs.approach_alignment - 1.0).abs() < 1e-4);
    assert!((obs.distance - 0.5 / garden::AREA_DIAMETER).abs() < 1e-4);

    let (from, to) = agent.debug_line(&area).unwrap();
    assert!((to - area.flower(id).center_position()).length() < 1e-6);
    assert!((from - agent.beak_tip()).length() < 1e-6);
}
