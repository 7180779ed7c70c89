use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fastrand::Rng;
use physics::{Collider, ColliderKind, ColliderTag, PhysicsOracle, PhysicsWorld, Shape, Transform, Vec3};

fn scattered_world(count: usize) -> PhysicsWorld {
    let mut rng = Rng::with_seed(12);
    let mut world = PhysicsWorld::new();
    for _ in 0..count {
        let position = Vec3::new(rng.f32() * 20.0 - 10.0, rng.f32() * 6.0, rng.f32() * 20.0 - 10.0);
        world
            .add_collider(Collider::new(
                Shape::Sphere { radius: 0.05 },
                Transform::from_translation(position),
                ColliderKind::Trigger,
                ColliderTag::Nectar,
            ))
            .unwrap();
    }
    world
}

fn bench_overlap_sphere(c: &mut Criterion) {
    let world = scattered_world(1000);
    let mut rng = Rng::with_seed(3);
    c.bench_function("overlap_sphere_1000", |b| {
        b.iter(|| {
            let probe = Vec3::new(rng.f32() * 20.0 - 10.0, rng.f32() * 6.0, rng.f32() * 20.0 - 10.0);
            black_box(world.overlap_sphere(probe, 0.05))
        });
    });
}

criterion_group!(benches, bench_overlap_sphere);
criterion_main!(benches);
