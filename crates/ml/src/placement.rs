//! Spawn-pose sampling for the agent.

use fastrand::Rng;
use garden::{range_f32, FlowerArea, FlowerId};
use physics::{look_rotation, quat_from_euler_degrees, PhysicsOracle, Quat, Transform, Vec3};

/// Candidate poses tried before giving up on a collision-free spawn.
pub const SPAWN_ATTEMPTS: usize = 100;
/// Radius that must be free of colliders around a candidate spawn.
pub const SPAWN_CLEARANCE: f32 = 0.05;

const FLOWER_FRONT_DISTANCE: (f32, f32) = (0.1, 0.2);
const FREE_HEIGHT: (f32, f32) = (1.2, 2.5);
const FREE_RADIUS: (f32, f32) = (2.0, 7.0);
const FREE_PITCH: f32 = 60.0;

/// Sample one candidate pose.
///
/// In front of a flower the pose sits 10-20 cm out along the flower's up
/// vector, looking at the nectar. Otherwise it is a random point above the
/// arena floor with a random heading and a pitch within ±60°.
///
/// Falls back to free flight when the arena has no flowers.
pub fn sample_pose(in_front_of_flower: bool, area: &FlowerArea, rng: &mut Rng) -> Transform {
    let flower_count = area.flowers().len();
    if in_front_of_flower && flower_count > 0 {
        let flower = area.flower(FlowerId(rng.usize(..flower_count)));
        let distance = range_f32(rng, FLOWER_FRONT_DISTANCE.0, FLOWER_FRONT_DISTANCE.1);
        let position = flower.position() + flower.up_vector() * distance;
        let rotation = look_rotation(flower.center_position() - position, Vec3::Y);
        return Transform::new(position, rotation);
    }

    let height = range_f32(rng, FREE_HEIGHT.0, FREE_HEIGHT.1);
    let radius = range_f32(rng, FREE_RADIUS.0, FREE_RADIUS.1);
    let direction = Quat::from_rotation_y(range_f32(rng, -180.0, 180.0).to_radians()) * Vec3::X;
    let position = area.center() + Vec3::Y * height + direction * radius;

    let pitch = range_f32(rng, -FREE_PITCH, FREE_PITCH);
    let yaw = range_f32(rng, -180.0, 180.0);
    Transform::new(position, quat_from_euler_degrees(pitch, yaw, 0.0))
}

/// Sample until a candidate's clearance sphere overlaps nothing.
///
/// Returns the pose and whether it is safe. After [`SPAWN_ATTEMPTS`] failures
/// the last candidate is returned anyway.
pub fn find_safe_pose(
    in_front_of_flower: bool,
    area: &FlowerArea,
    oracle: &impl PhysicsOracle,
    rng: &mut Rng,
) -> (Transform, bool) {
    let mut candidate = Transform::IDENTITY;
    for _ in 0..SPAWN_ATTEMPTS {
        candidate = sample_pose(in_front_of_flower, area, rng);
        if oracle.overlap_sphere(candidate.translation, SPAWN_CLEARANCE).is_empty() {
            return (candidate, true);
        }
    }
    tracing::error!(
        attempts = SPAWN_ATTEMPTS,
        position = ?candidate.translation,
        "could not find a safe position to spawn"
    );
    (candidate, false)
}
