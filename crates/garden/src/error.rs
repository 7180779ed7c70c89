use crate::scene::NodeId;
use physics::{ColliderId, PhysicsError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GardenError {
    #[error("unknown scene node {0:?}")]
    UnknownNode(NodeId),
    #[error("flower node {flower:?} has no child named {child}")]
    MissingChild { flower: NodeId, child: &'static str },
    #[error("node {0:?} carries no collider")]
    MissingCollider(NodeId),
    #[error("nectar collider {0} is indexed by two flowers")]
    DuplicateNectar(ColliderId),
    #[error("arena contains no flowers")]
    EmptyArena,
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}
