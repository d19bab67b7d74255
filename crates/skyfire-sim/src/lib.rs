//! Simulation kernel for SKYFIRE.
//!
//! Owns the entity registry (a hecs arena plus ordered category lists),
//! runs the per-tick systems in a fixed order under the level director,
//! and produces `HudSnapshot`s for the presentation layer.

pub mod engine;
pub mod levels;
pub mod registry;
pub mod state_machine;
pub mod systems;
pub mod world_setup;

pub use skyfire_core as core;
pub use engine::LevelDirector;
pub use registry::{Registry, RenderError, Renderer};
