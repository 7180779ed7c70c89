#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # Hummingbird Agent Core
//!
//! The learning-facing half of the hummingbird arena: an agent that flies
//! with forces and smoothed rotations, feeds from flowers through its beak
//! tip and is rewarded for feeding cleanly from the front.
//!
//! -   [`HummingbirdAgent`]: per-step action application, observations,
//!     nearest-flower tracking, feeding rewards and episode resets.
//! -   [`HummingbirdEnv`]: the agent, a [`garden::FlowerArea`] and a
//!     [`physics::PhysicsWorld`] stepped together behind the [`Env`] trait.
//! -   [`Policy`] implementations for manual, random, scripted and idle control.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ml::{Env, EnvConfig, HummingbirdEnv};
//!
//! let mut env = HummingbirdEnv::new(EnvConfig::default()).unwrap();
//! let obs = env.reset();
//! assert_eq!(obs.len(), env.obs_size());
//! let (_obs, _reward, _done) = env.step(&[0.0, 0.0, 1.0, 0.0, 0.0]);
//! ```

pub mod action;
pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod hummingbird_env;
pub mod observation;
pub mod placement;
pub mod policy;

pub use action::{Action, ACTION_SIZE};
pub use agent::{
    move_towards, AgentState, HummingbirdAgent, ALIGNMENT_BONUS, BEAK_TIP_RADIUS, BOUNDARY_PENALTY, FEED_REWARD,
    MAX_PITCH_ANGLE, NECTAR_PER_FEED,
};
pub use config::{AgentConfig, EnvConfig};
pub use env::Env;
pub use error::{AgentError, ConfigError};
pub use hummingbird_env::{HummingbirdEnv, StepResult, BEAK_PROBE_RADIUS};
pub use observation::{Observation, OBSERVATION_SIZE};
pub use placement::{find_safe_pose, sample_pose, SPAWN_ATTEMPTS, SPAWN_CLEARANCE};
pub use policy::{HeuristicPolicy, IdlePolicy, InputSource, Key, Policy, PolicyContext, RandomPolicy, SeekPolicy};
