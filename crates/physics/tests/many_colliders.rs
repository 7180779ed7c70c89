use physics::{Collider, ColliderKind, ColliderTag, PhysicsOracle, PhysicsWorld, Shape, Transform, Vec3};

/// Grid-accelerated queries must agree with a brute-force scan.
#[test]
fn grid_queries_match_brute_force() {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut world = PhysicsWorld::new();
    for _ in 0..300 {
        let pos = Vec3::new(rng.f32() * 20.0 - 10.0, rng.f32() * 6.0, rng.f32() * 20.0 - 10.0);
        let shape = if rng.bool() {
            Shape::Sphere { radius: 0.05 + rng.f32() * 0.3 }
        } else {
            Shape::Cylinder { radius: 0.05 + rng.f32() * 0.2, half_height: 0.1 + rng.f32() }
        };
        world
            .add_collider(Collider::new(shape, Transform::from_translation(pos), ColliderKind::Solid, ColliderTag::Flower))
            .unwrap();
    }

    for _ in 0..200 {
        let center = Vec3::new(rng.f32() * 24.0 - 12.0, rng.f32() * 8.0 - 1.0, rng.f32() * 24.0 - 12.0);
        let radius = rng.f32() * 0.8;
        let expected: Vec<_> = world
            .colliders()
            .filter(|(_, c)| c.intersects_sphere(center, radius))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(world.overlap_sphere(center, radius), expected);
    }
}
