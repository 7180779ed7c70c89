//! Decision makers that turn the agent's view of the arena into an [`Action`].
//!
//! A learner normally supplies actions from outside through [`crate::Env`].
//! These policies cover the rest: keyboard control, random exploration, a
//! hand-written seeker used for smoke runs and benchmarks, and doing nothing.

use crate::action::{Action, ACTION_SIZE};
use crate::observation::Observation;
use fastrand::Rng;
use glam::Vec3;
use physics::{euler_degrees, Transform};
use std::collections::HashSet;

/// Everything a policy may look at when choosing an action.
#[derive(Copy, Clone, Debug, Default)]
pub struct PolicyContext {
    /// `None` when there is no flower with nectar to target
    pub observation: Option<Observation>,
    pub pose: Transform,
    pub beak_tip: Vec3,
    pub velocity: Vec3,
    /// Nectar centre of the target flower
    pub target: Option<Vec3>,
    /// Up vector of the target flower
    pub target_up: Option<Vec3>,
}

pub trait Policy {
    fn act(&mut self, ctx: &PolicyContext) -> Action;
}

/// Keys read by [`HeuristicPolicy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    E,
    C,
    Up,
    Down,
    Left,
    Right,
}

/// Source of held-down keys.
pub trait InputSource {
    fn is_pressed(&self, key: Key) -> bool;
}

impl InputSource for HashSet<Key> {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

/// Manual control.
///
/// W/S fly forward and back, A/D left and right, E/C up and down, all in the
/// agent's own frame. The combined direction is normalised. The arrow keys
/// drive the pitch (up/down) and yaw (left/right) channels at full strength.
pub struct HeuristicPolicy<I: InputSource> {
    input: I,
}

impl<I: InputSource> HeuristicPolicy<I> {
    #[must_use]
    pub fn new(input: I) -> Self {
        Self { input }
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    fn axis(&self, positive: Key, negative: Key) -> f32 {
        if self.input.is_pressed(positive) {
            1.0
        } else if self.input.is_pressed(negative) {
            -1.0
        } else {
            0.0
        }
    }
}

impl<I: InputSource> Policy for HeuristicPolicy<I> {
    fn act(&mut self, ctx: &PolicyContext) -> Action {
        let forward = ctx.pose.forward() * self.axis(Key::W, Key::S);
        let right = ctx.pose.right() * -self.axis(Key::A, Key::D);
        let up = ctx.pose.up() * self.axis(Key::E, Key::C);
        let movement = (forward + right + up).normalize_or_zero();

        let pitch = self.axis(Key::Up, Key::Down);
        let yaw = -self.axis(Key::Left, Key::Right);

        Action::from_parts(movement, pitch, yaw)
    }
}

/// Uniform noise on every channel.
pub struct RandomPolicy {
    rng: Rng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: Rng::with_seed(seed) }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _ctx: &PolicyContext) -> Action {
        let mut values = [0.0; ACTION_SIZE];
        for v in &mut values {
            *v = self.rng.f32() * 2.0 - 1.0;
        }
        Action::new(values)
    }
}

/// Always the zero action.
#[derive(Default)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn act(&mut self, _ctx: &PolicyContext) -> Action {
        Action::default()
    }
}

/// Proportional controller that flies the beak into the target flower.
///
/// The rotation channels are crossed on purpose: the agent turns its heading
/// from channel 3 and its pitch from channel 4.
#[derive(Clone, Debug)]
pub struct SeekPolicy {
    /// Degrees of heading error that saturate a rotation channel
    pub angle_gain: f32,
    /// Scale from beak-to-target offset to movement input
    pub position_gain: f32,
    /// Scale from velocity to braking input
    pub damping: f32,
}

impl Default for SeekPolicy {
    fn default() -> Self {
        Self { angle_gain: 30.0, position_gain: 4.0, damping: 1.0 }
    }
}

impl Policy for SeekPolicy {
    fn act(&mut self, ctx: &PolicyContext) -> Action {
        let Some(target) = ctx.target else {
            return Action::from_parts(-ctx.velocity * self.damping, 0.0, 0.0);
        };

        // Approach along the flower's axis so the beak enters the opening.
        let approach = ctx.target_up.map_or(target, |up| {
            let offset = target - ctx.beak_tip;
            if offset.length() > 0.3 { target + up.normalize_or_zero() * 0.1 } else { target }
        });
        let offset = approach - ctx.beak_tip;
        let movement = offset * self.position_gain - ctx.velocity * self.damping;

        let look = target - ctx.pose.translation;
        let horizontal = Vec3::new(look.x, 0.0, look.z).length();
        let desired_yaw = look.x.atan2(look.z).to_degrees();
        let desired_pitch = (-look.y).atan2(horizontal).to_degrees();

        let current = euler_degrees(ctx.pose.rotation);
        let yaw_error = wrap_degrees(desired_yaw - current.y);
        let pitch_error = wrap_degrees(desired_pitch - wrap_degrees(current.x));

        Action::from_parts(movement, yaw_error / self.angle_gain, pitch_error / self.angle_gain)
    }
}

/// Map an angle in degrees to `(-180, 180]`.
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}
