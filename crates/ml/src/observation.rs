use bytemuck::{Pod, Zeroable};

pub const OBSERVATION_SIZE: usize = 10;

/// Fixed-layout observation handed to the learner each decision step.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Observation {
    /// Agent orientation relative to the arena as a unit quaternion `(x, y, z, w)`
    pub rotation: [f32; 4],
    /// Unit vector from the beak tip to the target flower's nectar centre
    pub to_flower: [f32; 3],
    /// `to_flower` dotted with the negated flower up axis; 1 when directly above the opening
    pub approach_alignment: f32,
    /// Beak forward dotted with the negated flower up axis; 1 when pointing into the opening
    pub beak_alignment: f32,
    /// Beak-to-flower distance divided by the arena diameter
    pub distance: f32,
}

impl Observation {
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f32> {
        self.as_slice().to_vec()
    }
}
