//! # Hummingbird
//!
//! A simulation core for training a flying agent to feed from flowers.
//!
//! ## Overview
//!
//! An arena holds plants, each carrying a few flowers with a depletable
//! nectar supply. A hummingbird agent flies around the arena with forces and
//! smoothed pitch/yaw changes, tracks the nearest flower that still has
//! nectar, and is rewarded for feeding with its beak aligned to the flower
//! opening. Flying into the arena boundary is penalised.
//!
//! ## The Crates
//!
//! -   **`hummingbird`:** The crate you are currently viewing. It is the
//!     documentation entry point and a headless binary that runs episodes
//!     with a scripted, random or idle policy and logs their summaries.
//! -   **[`physics`]:** Colliders, overlap and closest-point queries, a
//!     force-driven rigid body and contact enter/stay/exit tracking, all
//!     behind the `PhysicsOracle` and `Body` traits.
//! -   **[`garden`]:** Flowers, the arena that owns them, flower discovery in
//!     a scene hierarchy and procedural arena construction.
//! -   **[`ml`]:** The agent itself, its observations and actions, the
//!     per-tick environment behind the `Env` trait, and the built-in policies.
//!
//! ## Getting Started
//!
//! Start with [`ml::HummingbirdEnv`], which assembles a default arena and
//! exposes `reset`/`step`. [`ml::HummingbirdAgent`] holds the rules the
//! agent is trained under.

pub use garden;
pub use ml;
pub use physics;
