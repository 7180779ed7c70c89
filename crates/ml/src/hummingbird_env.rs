//! # Hummingbird Environment
//!
//! Wires one [`HummingbirdAgent`], its [`FlowerArea`] and a [`PhysicsWorld`]
//! together and advances them one fixed tick per decision.
//!
//! Each [`HummingbirdEnv::step_action`] runs, in order:
//!
//! 1.  agent fixed update (retarget if the target ran dry);
//! 2.  action application (force plus smoothed rotation);
//! 3.  body integration over `fixed_dt`;
//! 4.  solid contacts: push-out, then collision-enter callbacks;
//! 5.  beak-tip trigger contacts: enter/stay feeding callbacks;
//! 6.  reward drain, observation and termination.

use crate::action::{Action, ACTION_SIZE};
use crate::agent::HummingbirdAgent;
use crate::config::EnvConfig;
use crate::env::Env;
use crate::error::AgentError;
use crate::observation::{Observation, OBSERVATION_SIZE};
use crate::policy::PolicyContext;
use fastrand::Rng;
use garden::FlowerArea;
use physics::{
    resolve_static_contact, Body, ColliderKind, ContactPhase, ContactTracker, PhysicsWorld, RigidBody, Transform, Vec3,
};

/// Radius of the probe sphere swept with the beak tip to find nectar triggers.
pub const BEAK_PROBE_RADIUS: f32 = 0.01;

/// Outcome of one environment tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepResult {
    /// `None` once no flower has nectar left
    pub observation: Option<Observation>,
    pub reward: f32,
    pub done: bool,
    pub nectar_received: f32,
}

pub struct HummingbirdEnv {
    config: EnvConfig,
    world: PhysicsWorld,
    area: FlowerArea,
    agent: HummingbirdAgent<RigidBody>,
    rng: Rng,
    solid_contacts: ContactTracker,
    beak_contacts: ContactTracker,
}

impl HummingbirdEnv {
    /// Build the arena from `config.layout` and place an idle agent above its centre.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or the arena cannot be assembled.
    pub fn new(config: EnvConfig) -> Result<Self, AgentError> {
        config.validate()?;

        let mut world = PhysicsWorld::new();
        let (scene, root) = config.layout.build(&mut world, Vec3::ZERO)?;
        let mut area = FlowerArea::new(scene, root)?;
        area.sync_transforms(&mut world);

        let body = RigidBody::new(area.center() + Vec3::Y * 1.5, config.agent.mass)
            .with_drag(config.agent.drag, config.agent.angular_drag);
        let agent = HummingbirdAgent::new(config.agent.clone(), body);

        tracing::info!(
            flowers = area.flowers().len(),
            colliders = world.len(),
            training = config.agent.training_mode,
            seed = config.seed,
            "hummingbird environment ready"
        );

        Ok(Self {
            rng: Rng::with_seed(config.seed),
            config,
            world,
            area,
            agent,
            solid_contacts: ContactTracker::new(),
            beak_contacts: ContactTracker::new(),
        })
    }

    /// Begin a new episode and return its first observation.
    pub fn begin_episode(&mut self) -> Option<Observation> {
        self.agent.on_episode_begin(&mut self.area, &mut self.world, &mut self.rng);
        self.solid_contacts.clear();
        self.beak_contacts.clear();
        self.agent.collect_observations(&self.area).ok()
    }

    /// Advance one fixed tick under `action`.
    pub fn step_action(&mut self, action: &Action) -> StepResult {
        let dt = self.config.fixed_dt;

        self.agent.fixed_update(&self.area);
        self.agent.on_action_received(action, dt);
        self.agent.body_mut().integrate(dt);
        self.agent.record_step();

        self.resolve_solid_contacts();
        let nectar_received = self.feed_from_triggers();

        let reward = self.agent.take_reward();
        let observation = match self.agent.collect_observations(&self.area) {
            Ok(obs) => Some(obs),
            Err(e) => {
                tracing::debug!("ending episode: {e}");
                None
            }
        };
        let done = observation.is_none() || self.agent.episode_done();

        StepResult { observation, reward, done, nectar_received }
    }

    fn resolve_solid_contacts(&mut self) {
        let radius = self.config.agent.body_radius;
        let contacts = self
            .world
            .sphere_contacts(self.agent.body().position, radius, ColliderKind::Solid);

        let mut touching = Vec::with_capacity(contacts.len());
        for (id, contact) in &contacts {
            resolve_static_contact(self.agent.body_mut(), contact);
            if let Some(collider) = self.world.collider(*id) {
                touching.push((*id, collider.tag, collider.kind));
            }
        }

        for event in self.solid_contacts.update(touching) {
            if event.phase == ContactPhase::Enter {
                self.agent.on_collision_enter(event.tag);
            }
        }
    }

    fn feed_from_triggers(&mut self) -> f32 {
        let touching: Vec<_> = self
            .world
            .sphere_contacts(self.agent.beak_tip(), BEAK_PROBE_RADIUS, ColliderKind::Trigger)
            .into_iter()
            .filter_map(|(id, _)| self.world.collider(id).map(|c| (id, c.tag, c.kind)))
            .collect();

        let mut nectar = 0.0;
        for event in self.beak_contacts.update(touching) {
            if matches!(event.phase, ContactPhase::Enter | ContactPhase::Stay) {
                if let Some(received) =
                    self.agent
                        .trigger_enter_or_stay(event.collider, &mut self.area, &mut self.world)
                {
                    nectar += received;
                }
            }
        }
        nectar
    }

    /// Teleport the agent at rest and retarget from its new beak position.
    pub fn place_agent(&mut self, pose: Transform) {
        let body = self.agent.body_mut();
        body.set_pose(pose);
        body.set_velocity(Vec3::ZERO);
        body.set_angular_velocity(Vec3::ZERO);
        self.agent.update_nearest_flower(&self.area);
    }

    /// Snapshot handed to a [`crate::Policy`].
    #[must_use]
    pub fn policy_context(&self) -> PolicyContext {
        let target = self.agent.nearest_flower().map(|id| self.area.flower(id));
        let body = self.agent.body();
        PolicyContext {
            observation: self.agent.collect_observations(&self.area).ok(),
            pose: body.pose(),
            beak_tip: self.agent.beak_tip(),
            velocity: body.velocity(),
            target: target.map(garden::Flower::center_position),
            target_up: target.map(garden::Flower::up_vector),
        }
    }

    /// Beak-tip to target segment, when there is a target.
    #[must_use]
    pub fn debug_line(&self) -> Option<(Vec3, Vec3)> {
        self.agent.debug_line(&self.area)
    }

    #[must_use]
    pub fn agent(&self) -> &HummingbirdAgent<RigidBody> {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut HummingbirdAgent<RigidBody> {
        &mut self.agent
    }

    #[must_use]
    pub fn area(&self) -> &FlowerArea {
        &self.area
    }

    /// The area together with the world it is registered in.
    pub fn area_and_world_mut(&mut self) -> (&mut FlowerArea, &mut PhysicsWorld) {
        (&mut self.area, &mut self.world)
    }

    #[must_use]
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}

impl Env for HummingbirdEnv {
    fn step(&mut self, action: &[f32]) -> (Vec<f32>, f32, bool) {
        let action = Action::try_from(action).unwrap_or_else(|e| {
            tracing::warn!("replacing malformed action with zeros: {e}");
            Action::default()
        });
        let result = self.step_action(&action);
        let obs = result.observation.map_or_else(|| vec![0.0; OBSERVATION_SIZE], |o| o.to_vec());
        (obs, result.reward, result.done)
    }

    fn reset(&mut self) -> Vec<f32> {
        self.begin_episode()
            .map_or_else(|| vec![0.0; OBSERVATION_SIZE], |o| o.to_vec())
    }

    fn obs_size(&self) -> usize {
        OBSERVATION_SIZE
    }

    fn action_size(&self) -> usize {
        ACTION_SIZE
    }
}
