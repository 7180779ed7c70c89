use fastrand::Rng;

/// Uniform sample in `[min, max]`.
#[must_use]
pub fn range_f32(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.f32()
}
