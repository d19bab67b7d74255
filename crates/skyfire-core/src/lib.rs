//! Core types and definitions for the SKYFIRE simulation kernel.
//!
//! This crate defines the vocabulary shared across all other crates:
//! actors, geometry, commands, events, HUD projections, constants and
//! configuration. It has no dependency on the ECS or any runtime loop.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::SkyfireError;
