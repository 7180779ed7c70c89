//! # Hummingbird Agent
//!
//! The per-step simulation core of a flying agent that learns to feed from
//! flowers: action application, nearest-flower tracking, feeding, reward
//! shaping and episode resets with collision-checked spawning.
//!
//! The agent owns its rigid body but only borrows the [`FlowerArea`] and the
//! [`PhysicsOracle`] for the duration of each call. Its target flower is kept
//! as a [`FlowerId`] into the area's flower list, never as a reference.

use crate::action::Action;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::observation::Observation;
use crate::placement::find_safe_pose;
use fastrand::Rng;
use garden::{FlowerArea, FlowerId, AREA_DIAMETER};
use physics::{euler_degrees, quat_from_euler_degrees, Body, ColliderId, ColliderTag, PhysicsOracle, Transform, Vec3};

/// Pitch limit in degrees, either side of level flight.
pub const MAX_PITCH_ANGLE: f32 = 80.0;
/// How close the beak tip must be to a nectar volume to feed.
pub const BEAK_TIP_RADIUS: f32 = 0.008;
/// Nectar requested from a flower per feeding contact.
pub const NECTAR_PER_FEED: f32 = 0.01;
/// Reward for each successful feeding contact.
pub const FEED_REWARD: f32 = 0.01;
/// Extra reward at perfect alignment with the flower opening.
pub const ALIGNMENT_BONUS: f32 = 0.02;
/// Reward for flying into the arena boundary.
pub const BOUNDARY_PENALTY: f32 = -0.5;

/// Lifecycle of the agent within and between episodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentState {
    /// No episode has begun yet
    Idle,
    Running,
    /// Paused by gameplay code; actions are ignored
    Frozen,
}

pub struct HummingbirdAgent<B: Body> {
    config: AgentConfig,
    body: B,
    nearest_flower: Option<FlowerId>,
    nectar_obtained: f32,
    smooth_pitch_change: f32,
    smooth_yaw_change: f32,
    frozen: bool,
    started: bool,
    max_step: u32,
    step_count: u32,
    pending_reward: f32,
    cumulative_reward: f32,
    episodes: u32,
}

impl<B: Body> HummingbirdAgent<B> {
    /// Bind the agent to its body. Gameplay mode ignores the configured step
    /// budget and runs until stopped from outside.
    #[must_use]
    pub fn new(config: AgentConfig, body: B) -> Self {
        let max_step = if config.training_mode { config.max_steps } else { 0 };
        Self {
            config,
            body,
            nearest_flower: None,
            nectar_obtained: 0.0,
            smooth_pitch_change: 0.0,
            smooth_yaw_change: 0.0,
            frozen: false,
            started: false,
            max_step,
            step_count: 0,
            pending_reward: 0.0,
            cumulative_reward: 0.0,
            episodes: 0,
        }
    }

    /// Start a new episode.
    ///
    /// In training mode the flowers are reset and the spawn is in front of a
    /// flower or free-flying with equal odds; gameplay always spawns in front
    /// of a flower.
    pub fn on_episode_begin(&mut self, area: &mut FlowerArea, oracle: &mut impl PhysicsOracle, rng: &mut Rng) {
        if self.config.training_mode {
            area.reset_flowers(rng, oracle);
        }

        self.nectar_obtained = 0.0;
        self.body.set_velocity(Vec3::ZERO);
        self.body.set_angular_velocity(Vec3::ZERO);
        self.step_count = 0;
        self.pending_reward = 0.0;
        self.cumulative_reward = 0.0;
        self.episodes += 1;
        self.started = true;

        let in_front_of_flower = if self.config.training_mode { rng.f32() > 0.5 } else { true };
        let safe = self.move_to_safe_random_position(in_front_of_flower, &*area, &*oracle, rng);

        self.update_nearest_flower(area);

        tracing::debug!(
            episode = self.episodes,
            in_front_of_flower,
            safe,
            position = ?self.body.pose().translation,
            "episode begin"
        );
    }

    /// Apply one decision: a world-space force and a smoothed pitch/yaw change.
    pub fn on_action_received(&mut self, action: &Action, dt: f32) {
        if self.frozen {
            return;
        }

        self.body.add_force(action.movement() * self.config.move_force);

        let pose = self.body.pose();
        let rotation = euler_degrees(pose.rotation);

        let max_delta = dt * self.config.smoothing_rate;
        self.smooth_pitch_change = move_towards(self.smooth_pitch_change, action.pitch(), max_delta);
        self.smooth_yaw_change = move_towards(self.smooth_yaw_change, action.yaw(), max_delta);

        // The yaw channel drives pitch and the pitch channel drives yaw.
        // Trained policies depend on this mapping.
        let mut pitch = rotation.x + self.smooth_yaw_change * dt * self.config.pitch_speed;
        if pitch > 180.0 {
            pitch -= 360.0;
        }
        let pitch = pitch.clamp(-MAX_PITCH_ANGLE, MAX_PITCH_ANGLE);
        let yaw = rotation.y + self.smooth_pitch_change * dt * self.config.yaw_speed;

        self.body.set_pose(Transform::new(pose.translation, quat_from_euler_degrees(pitch, yaw, 0.0)));
    }

    /// Build the observation vector for the current target flower.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoNearestFlower`] when no flower with nectar is targeted.
    pub fn collect_observations(&self, area: &FlowerArea) -> Result<Observation, AgentError> {
        let target = self.nearest_flower.ok_or(AgentError::NoNearestFlower)?;
        let flower = area.flower(target);

        let pose = self.body.pose();
        let local_rotation = (area.frame().rotation.inverse() * pose.rotation).normalize();
        let to_flower = flower.center_position() - self.beak_tip();
        let direction = to_flower.normalize_or_zero();
        let into_flower = -flower.up_vector().normalize_or_zero();

        Ok(Observation {
            rotation: local_rotation.to_array(),
            to_flower: direction.to_array(),
            approach_alignment: direction.dot(into_flower),
            beak_alignment: pose.forward().normalize_or_zero().dot(into_flower),
            distance: to_flower.length() / AREA_DIAMETER,
        })
    }

    /// Pause the agent (gameplay only).
    ///
    /// # Panics
    ///
    /// Panics in training mode.
    pub fn freeze(&mut self) {
        assert!(!self.config.training_mode, "freeze/unfreeze not supported in training mode");
        self.frozen = true;
        self.body.sleep();
    }

    /// Resume a frozen agent (gameplay only).
    ///
    /// # Panics
    ///
    /// Panics in training mode.
    pub fn unfreeze(&mut self) {
        assert!(!self.config.training_mode, "freeze/unfreeze not supported in training mode");
        self.frozen = false;
        self.body.wake_up();
    }

    /// Target the flower with nectar closest to the beak tip.
    ///
    /// Ties go to the flower discovered first. Clears the target when no
    /// flower has nectar left.
    pub fn update_nearest_flower(&mut self, area: &FlowerArea) {
        let beak_tip = self.beak_tip();
        let mut best: Option<(FlowerId, f32)> = None;
        for (id, flower) in area.flower_ids().zip(area.flowers()) {
            if !flower.has_nectar() {
                continue;
            }
            let distance = flower.position().distance(beak_tip);
            match best {
                Some((_, closest)) if distance >= closest => {}
                _ => best = Some((id, distance)),
            }
        }
        self.nearest_flower = best.map(|(id, _)| id);
    }

    /// Handle the beak tip entering or staying inside a trigger.
    ///
    /// Feeds when the trigger is a nectar zone whose volume lies within
    /// [`BEAK_TIP_RADIUS`] of the beak tip, and returns the nectar received.
    ///
    /// # Panics
    ///
    /// Panics if a nectar collider does not belong to `area`.
    pub fn trigger_enter_or_stay(
        &mut self,
        collider: ColliderId,
        area: &mut FlowerArea,
        oracle: &mut impl PhysicsOracle,
    ) -> Option<f32> {
        if oracle.tag(collider) != Some(ColliderTag::Nectar) {
            return None;
        }

        let beak_tip = self.beak_tip();
        let closest = oracle.closest_point(collider, beak_tip)?;
        if beak_tip.distance(closest) >= BEAK_TIP_RADIUS {
            return None;
        }

        let fed = area.flower_from_nectar(collider);
        let nectar_received = area.feed(fed, NECTAR_PER_FEED, oracle);
        self.nectar_obtained += nectar_received;

        if self.config.training_mode {
            let target = area.flower(self.nearest_flower.unwrap_or(fed));
            let into_flower = -target.up_vector().normalize_or_zero();
            let alignment = self.body.pose().forward().normalize_or_zero().dot(into_flower);
            self.add_reward(FEED_REWARD + ALIGNMENT_BONUS * alignment.clamp(0.0, 1.0));
        }

        tracing::trace!(flower = fed.0, nectar_received, "fed");

        if !area.flower(fed).has_nectar() {
            self.update_nearest_flower(area);
        }
        Some(nectar_received)
    }

    /// Handle the body starting to touch a solid collider.
    pub fn on_collision_enter(&mut self, tag: ColliderTag) {
        if self.config.training_mode && tag == ColliderTag::Boundary {
            tracing::debug!("boundary collision");
            self.add_reward(BOUNDARY_PENALTY);
        }
    }

    /// Fixed-tick maintenance: retarget if the current flower was emptied
    /// by someone else.
    pub fn fixed_update(&mut self, area: &FlowerArea) {
        if let Some(target) = self.nearest_flower {
            if !area.flower(target).has_nectar() {
                self.update_nearest_flower(area);
            }
        }
    }

    /// Teleport to a collision-free random pose. Returns `false` (and keeps
    /// the last unsafe candidate) if every attempt hit something.
    pub fn move_to_safe_random_position(
        &mut self,
        in_front_of_flower: bool,
        area: &FlowerArea,
        oracle: &impl PhysicsOracle,
        rng: &mut Rng,
    ) -> bool {
        let (pose, safe) = find_safe_pose(in_front_of_flower, area, oracle, rng);
        self.body.set_pose(pose);
        safe
    }

    /// Beak-tip to target-centre segment for debug drawing.
    #[must_use]
    pub fn debug_line(&self, area: &FlowerArea) -> Option<(Vec3, Vec3)> {
        self.nearest_flower
            .map(|id| (self.beak_tip(), area.flower(id).center_position()))
    }

    pub fn add_reward(&mut self, reward: f32) {
        self.pending_reward += reward;
        self.cumulative_reward += reward;
    }

    /// Drain the reward accumulated since the last call.
    pub fn take_reward(&mut self) -> f32 {
        std::mem::take(&mut self.pending_reward)
    }

    /// Count one environment step.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Whether the training step budget is used up.
    #[must_use]
    pub fn episode_done(&self) -> bool {
        self.max_step > 0 && self.step_count >= self.max_step
    }

    #[must_use]
    pub fn beak_tip(&self) -> Vec3 {
        self.body.pose().transform_point(self.config.beak_tip_offset)
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        if self.frozen {
            AgentState::Frozen
        } else if self.started {
            AgentState::Running
        } else {
            AgentState::Idle
        }
    }

    #[must_use]
    pub fn nearest_flower(&self) -> Option<FlowerId> {
        self.nearest_flower
    }

    #[must_use]
    pub fn nectar_obtained(&self) -> f32 {
        self.nectar_obtained
    }

    #[must_use]
    pub fn cumulative_reward(&self) -> f32 {
        self.cumulative_reward
    }

    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    #[must_use]
    pub fn max_step(&self) -> u32 {
        self.max_step
    }

    #[must_use]
    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn smoothed_rotation_inputs(&self) -> (f32, f32) {
        (self.smooth_pitch_change, self.smooth_yaw_change)
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[must_use]
    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
}

/// Step `current` towards `target` by at most `max_delta`.
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
