use crate::error::AgentError;
use glam::Vec3;

pub const ACTION_SIZE: usize = 5;

/// Continuous control vector, each channel in `[-1, 1]`.
///
/// | index | meaning |
/// |---|---|
/// | 0 | move x (1 = right, -1 = left) |
/// | 1 | move y (1 = up, -1 = down) |
/// | 2 | move z (1 = forward, -1 = backward) |
/// | 3 | pitch (1 = up, -1 = down) |
/// | 4 | yaw (1 = right, -1 = left) |
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Action(pub [f32; ACTION_SIZE]);

impl Action {
    /// Build an action, clipping every channel into `[-1, 1]`. NaN becomes 0.
    #[must_use]
    pub fn new(values: [f32; ACTION_SIZE]) -> Self {
        Self(values.map(|v| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }))
    }

    #[must_use]
    pub fn from_parts(movement: Vec3, pitch: f32, yaw: f32) -> Self {
        Self::new([movement.x, movement.y, movement.z, pitch, yaw])
    }

    #[must_use]
    pub fn movement(&self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.0[3]
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.0[4]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl TryFrom<&[f32]> for Action {
    type Error = AgentError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        let array: [f32; ACTION_SIZE] = values.try_into().map_err(|_| AgentError::ActionSize {
            expected: ACTION_SIZE,
            got: values.len(),
        })?;
        Ok(Self::new(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_clipped() {
        let a = Action::new([2.0, -3.0, 0.5, f32::NAN, 1.0]);
        assert_eq!(a.0, [1.0, -1.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = Action::try_from(&[0.0_f32; 3][..]).unwrap_err();
        assert!(matches!(err, AgentError::ActionSize { expected: 5, got: 3 }));
    }
}
