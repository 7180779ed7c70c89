#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # Garden
//!
//! Flowers and the arena that holds them.
//!
//! -   [`Flower`]: depletable nectar with an active/inactive state and a
//!     full/empty colour signal.
//! -   [`FlowerArea`]: owns the flowers of one arena, resets them between
//!     episodes and maps a nectar collider back to its flower.
//! -   [`SceneGraph`] and [`discover_flowers`]: the hierarchy flowers are
//!     discovered in, independent of any engine.
//! -   [`ArenaLayout`]: procedural construction of a complete arena.

pub mod area;
pub mod error;
pub mod flower;
pub mod layout;
pub mod rng;
pub mod scene;

pub use area::{FlowerArea, FlowerId, AREA_DIAMETER, MAX_PLANT_TILT};
pub use error::GardenError;
pub use flower::{Flower, FlowerColor, FLOWER_COLLIDER_NAME, NECTAR_COLLIDER_NAME};
pub use layout::ArenaLayout;
pub use rng::range_f32;
pub use scene::{discover_flowers, Discovery, NodeId, NodeTag, SceneGraph, SceneNode};
