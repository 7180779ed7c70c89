#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
//! # Arena Physics
//!
//! A small collision and rigid-body layer for the hummingbird arena.
//!
//! The simulation logic in the `ml` crate never talks to this crate's concrete
//! types directly: it consumes the [`PhysicsOracle`] and [`Body`] traits, so a
//! different engine (or a test fake) can stand in.
//!
//! ## Key Components
//!
//! -   **Transforms:** [`Transform`] plus the Euler conventions used across the
//!     workspace ([`quat_from_euler_degrees`], [`euler_degrees`], [`look_rotation`]).
//! -   **Colliders:** [`Shape`]s placed by a [`Transform`] and stored in a
//!     [`PhysicsWorld`], which answers overlap and closest-point queries using
//!     a uniform [`SpatialGrid`].
//! -   **Bodies:** [`RigidBody`], a force-driven body integrated with
//!     semi-implicit Euler steps that can be put to sleep and woken up.
//! -   **Events:** [`ContactTracker`] turns per-tick overlap sets into
//!     enter/stay/exit [`ContactEvent`]s.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{Collider, ColliderKind, ColliderTag, PhysicsOracle, PhysicsWorld, Shape, Transform};
//! use glam::Vec3;
//!
//! let mut world = PhysicsWorld::new();
//! let id = world
//!     .add_collider(Collider::new(
//!         Shape::Sphere { radius: 0.5 },
//!         Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
//!         ColliderKind::Trigger,
//!         ColliderTag::Nectar,
//!     ))
//!     .unwrap();
//! assert_eq!(world.overlap_sphere(Vec3::new(0.0, 1.4, 0.0), 0.2), vec![id]);
//! ```

pub mod body;
pub mod collision;
pub mod error;
pub mod events;
pub mod oracle;
pub mod shapes;
pub mod transform;
pub mod types;
pub mod world;

pub use body::RigidBody;
pub use collision::{detect_sphere_collider, resolve_static_contact, Contact, SpatialGrid};
pub use error::PhysicsError;
pub use events::{ContactEvent, ContactPhase, ContactTracker};
pub use oracle::{Body, PhysicsOracle};
pub use shapes::Shape;
pub use transform::{euler_degrees, look_rotation, quat_from_euler_degrees, Transform};
pub use types::{BoundingBox, ColliderId, ColliderKind, ColliderTag};
pub use world::{Collider, PhysicsWorld};

pub use glam::{Quat, Vec3};
