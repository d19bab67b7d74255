//! Per-tick systems run by the level director.
//!
//! Systems are free functions (or small stateful spawners) over the
//! registry. Ordering lives in `LevelDirector::run_systems`.

pub mod collision;
pub mod damage;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod wave_spawner;
pub mod weapons;
