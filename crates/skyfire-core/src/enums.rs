//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Registry category. Every registered actor lives in exactly one.
///
/// The declaration order is the per-tick update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Friendly,
    Enemy,
    UserProjectile,
    EnemyProjectile,
    PowerUp,
}

impl Category {
    pub const COUNT: usize = 5;

    /// All categories in update order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Friendly,
        Category::Enemy,
        Category::UserProjectile,
        Category::EnemyProjectile,
        Category::PowerUp,
    ];

    pub fn index(self) -> usize {
        match self {
            Category::Friendly => 0,
            Category::Enemy => 1,
            Category::UserProjectile => 2,
            Category::EnemyProjectile => 3,
            Category::PowerUp => 4,
        }
    }
}

/// Overall game lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
    /// Terminal: the player was destroyed.
    GameOver,
    /// Terminal: the final boss was defeated.
    Win,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver | GameState::Win)
    }
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Effect applied to the player when a power-up is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpEffect {
    /// The next shot fires a three-way spread. One charge per pickup.
    MultiShot,
    /// Restore one health unit, capped at max health.
    Repair,
}

/// Identity of a concrete level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    /// Open skies: probabilistic spawn up to a kill target.
    One,
    /// Boss duel.
    Two,
    /// Wave assault followed by the boss.
    Three,
}

impl LevelId {
    pub fn name(self) -> &'static str {
        match self {
            LevelId::One => "Open Skies",
            LevelId::Two => "Boss Duel",
            LevelId::Three => "Wave Assault",
        }
    }
}
