//! Tunable parameters for the agent and its environment.

use crate::error::ConfigError;
use garden::ArenaLayout;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`crate::HummingbirdAgent`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Force applied per unit of movement action
    pub move_force: f32,
    /// Degrees per second of pitch at full smoothed input
    pub pitch_speed: f32,
    /// Degrees per second of yaw at full smoothed input
    pub yaw_speed: f32,
    /// Training mode resets flowers, randomises spawns and grants rewards
    pub training_mode: bool,
    /// Step budget per episode in training mode (0 = unbounded)
    pub max_steps: u32,
    /// Maximum change per second of the smoothed pitch/yaw inputs
    pub smoothing_rate: f32,
    /// Beak tip position in the agent's local frame
    pub beak_tip_offset: Vec3,
    /// Radius of the agent's body sphere
    pub body_radius: f32,
    pub mass: f32,
    pub drag: f32,
    pub angular_drag: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            move_force: 2.0,
            pitch_speed: 100.0,
            yaw_speed: 100.0,
            training_mode: true,
            max_steps: 5000,
            smoothing_rate: 2.0,
            beak_tip_offset: Vec3::new(0.0, 0.0, 0.1),
            body_radius: 0.05,
            mass: 1.0,
            drag: 2.0,
            angular_drag: 2.0,
        }
    }
}

/// Configuration for a [`crate::HummingbirdEnv`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub agent: AgentConfig,
    pub layout: ArenaLayout,
    /// Length of one physics tick in seconds
    pub fixed_dt: f32,
    pub seed: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            layout: ArenaLayout::default(),
            fixed_dt: 0.02,
            seed: 0,
        }
    }
}

impl EnvConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for values that fail [`EnvConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EnvConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_owned()));
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return invalid("fixed_dt must be positive");
        }
        if self.layout.plants == 0 || self.layout.flowers_per_plant == 0 {
            return invalid("layout must contain at least one flower");
        }
        let agent = &self.agent;
        if agent.move_force < 0.0 || agent.pitch_speed < 0.0 || agent.yaw_speed < 0.0 {
            return invalid("agent force and turn speeds must not be negative");
        }
        if !agent.mass.is_finite() || agent.mass <= 0.0 {
            return invalid("agent mass must be positive");
        }
        if !agent.body_radius.is_finite() || agent.body_radius <= 0.0 {
            return invalid("agent body_radius must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EnvConfig::from_json_str(r#"{ "seed": 9, "agent": { "training_mode": false } }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert!(!config.agent.training_mode);
        assert_eq!(config.agent.move_force, 2.0);
        assert_eq!(config.layout, ArenaLayout::default());
    }

    #[test]
    fn beak_offset_parses_as_array() {
        let config = EnvConfig::from_json_str(r#"{ "agent": { "beak_tip_offset": [0.0, 0.01, 0.2] } }"#).unwrap();
        assert_eq!(config.agent.beak_tip_offset, Vec3::new(0.0, 0.01, 0.2));
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let err = EnvConfig::from_json_str(r#"{ "fixed_dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(EnvConfig::from_json_str("{ seed"), Err(ConfigError::Parse(_))));
    }
}
