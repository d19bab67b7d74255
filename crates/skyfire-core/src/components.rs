//! Actor data stored in the registry arena.
//!
//! A single `Actor` struct carries the shared destructible state plus a
//! kind-specific payload. Components are plain data; behavior lives in
//! the sim systems and the boss FSM.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{Faction, PowerUpEffect};
use crate::types::Body;

/// One simulated entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub body: Body,
    /// Remaining health. Projectiles and power-ups carry an implicit 1.
    pub health: i32,
    pub max_health: i32,
    /// Set once and never cleared. Removal happens in registry cleanup.
    pub destroyed: bool,
}

/// Kind tag plus kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    Player(PlayerState),
    BasicEnemy(EnemyState),
    Boss(BossState),
    Projectile(ProjectileState),
    PowerUp(PowerUpState),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Per-tick velocity set by input intents.
    pub velocity: Vec2,
    /// Pending multi-shot charges from collected power-ups.
    pub multishot_charges: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    /// Horizontal speed per tick (negative = toward the player).
    pub speed: f32,
    /// Bernoulli success probability of firing on a given tick.
    pub fire_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    pub movement: MovementPattern,
    pub shield: ShieldState,
    pub fire_rate: f64,
}

/// Shuffled multiset of vertical velocities consumed one per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementPattern {
    pub moves: Vec<f32>,
    pub cursor: usize,
    /// Consecutive picks served from the current cursor slot.
    pub same_move_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldState {
    pub active: bool,
    pub frames_active: u32,
    pub frames_since_deactivated: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub velocity: Vec2,
    pub faction: Faction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpState {
    pub effect: PowerUpEffect,
    pub fall_speed: f32,
}
