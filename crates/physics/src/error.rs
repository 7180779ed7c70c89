use crate::types::ColliderId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("unknown collider: {0}")]
    UnknownCollider(ColliderId),
    #[error("invalid shape: {0}")]
    InvalidShape(&'static str),
}
