use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ml::{EnvConfig, HummingbirdEnv, Policy, SeekPolicy};

fn bench_env_step(c: &mut Criterion) {
    let mut env = HummingbirdEnv::new(EnvConfig::default()).unwrap();
    let mut policy = SeekPolicy::default();
    env.begin_episode();

    c.bench_function("hummingbird_env_step", |b| {
        b.iter(|| {
            let action = policy.act(&env.policy_context());
            let result = env.step_action(black_box(&action));
            if result.done {
                env.begin_episode();
            }
            black_box(result.reward)
        });
    });
}

fn bench_episode_begin(c: &mut Criterion) {
    let mut env = HummingbirdEnv::new(EnvConfig::default()).unwrap();
    c.bench_function("hummingbird_episode_begin", |b| b.iter(|| black_box(env.begin_episode())));
}

criterion_group!(benches, bench_env_step, bench_episode_begin);
criterion_main!(benches);
