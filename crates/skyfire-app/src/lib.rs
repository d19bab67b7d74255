//! SKYFIRE host application.
//!
//! Drives the simulation kernel from a dedicated game-loop thread with a
//! fixed-interval tick scheduler, and owns the campaign order the kernel
//! itself never sees.

pub mod campaign;
pub mod game_loop;
pub mod scheduler;
pub mod state;

pub use skyfire_core as core;
