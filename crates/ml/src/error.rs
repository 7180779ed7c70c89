use garden::GardenError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("no flower with nectar is selected as the agent's target")]
    NoNearestFlower,
    #[error("expected {expected} action values, got {got}")]
    ActionSize { expected: usize, got: usize },
    #[error(transparent)]
    Garden(#[from] GardenError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
