//! Rigid transforms and Euler-angle conventions.
//!
//! Axes follow the arena convention: +X is right, +Y is up and +Z is forward.
//! Euler angles are applied yaw (Y) first, then pitch (X), then roll (Z),
//! which is [`EulerRot::YXZ`] in `glam` terms. Angles exchanged with callers
//! are in degrees.

use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of a frame in its parent's space.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Map a point from local space into parent space.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }

    /// Map a point from parent space into local space.
    #[must_use]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.translation)
    }

    /// Compose `self` (parent) with `child` (expressed in `self`'s space).
    #[must_use]
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }
}

/// Rotation from pitch (X), yaw (Y) and roll (Z) angles in degrees.
#[must_use]
pub fn quat_from_euler_degrees(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}

/// Euler angles of `rotation` in degrees as `(pitch, yaw, roll)`, each in `[0, 360)`.
#[must_use]
pub fn euler_degrees(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(
        positive_degrees(pitch.to_degrees()),
        positive_degrees(yaw.to_degrees()),
        positive_degrees(roll.to_degrees()),
    )
}

fn positive_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotation whose forward axis points along `forward` and whose up axis is as
/// close to `up` as possible.
///
/// Falls back to the identity for a zero `forward` and picks an alternate
/// reference axis when `forward` is parallel to `up`.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(fwd) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let right = up.cross(fwd).try_normalize().unwrap_or_else(|| {
        let alternate = if fwd.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
        alternate.cross(fwd).normalize()
    });
    let true_up = fwd.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, fwd)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_axes() {
        let t = Transform::IDENTITY;
        assert!(approx(t.up(), Vec3::Y));
        assert!(approx(t.forward(), Vec3::Z));
        assert!(approx(t.right(), Vec3::X));
    }

    #[test]
    fn positive_pitch_tilts_nose_down() {
        let t = Transform::new(Vec3::ZERO, quat_from_euler_degrees(90.0, 0.0, 0.0));
        assert!(approx(t.forward(), Vec3::NEG_Y));
    }

    #[test]
    fn euler_round_trip_in_positive_range() {
        let q = quat_from_euler_degrees(-30.0, 120.0, 0.0);
        let e = euler_degrees(q);
        assert!((e.x - 330.0).abs() < 1e-3, "pitch {}", e.x);
        assert!((e.y - 120.0).abs() < 1e-3, "yaw {}", e.y);
        assert!(e.z.abs() < 1e-3 || (e.z - 360.0).abs() < 1e-3);
    }

    #[test]
    fn look_rotation_points_forward() {
        let dir = Vec3::new(1.0, -0.5, 2.0);
        let q = look_rotation(dir, Vec3::Y);
        assert!(approx(q * Vec3::Z, dir.normalize()));
        // Up stays in the vertical plane containing forward
        assert!((q * Vec3::X).y.abs() < 1e-5);
    }

    #[test]
    fn look_rotation_straight_up_is_finite() {
        let q = look_rotation(Vec3::Y, Vec3::Y);
        assert!(approx(q * Vec3::Z, Vec3::Y));
        assert!(q.is_finite());
    }

    #[test]
    fn compose_and_invert() {
        let parent = Transform::new(Vec3::new(1.0, 2.0, 3.0), quat_from_euler_degrees(0.0, 90.0, 0.0));
        let child = Transform::from_translation(Vec3::new(0.0, 0.0, 1.0));
        let world = parent.mul_transform(&child);
        assert!(approx(world.translation, Vec3::new(2.0, 2.0, 3.0)));
        assert!(approx(parent.inverse_transform_point(world.translation), child.translation));
    }
}
