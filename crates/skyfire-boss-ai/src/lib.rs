//! Boss behavior for SKYFIRE.
//!
//! Implements the boss's movement-pattern cycling, the shield state
//! machine and its fire trial as pure functions over plain data.

pub mod fsm;

pub use skyfire_core as core;

#[cfg(test)]
mod tests;
