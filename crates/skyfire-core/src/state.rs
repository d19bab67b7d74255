//! HUD projection: the read-only view polled by the presentation layer
//! once per tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GameState, LevelId};
use crate::events::{FeedbackEvent, LevelEvent};
use crate::types::SimTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub time: SimTime,
    pub level: LevelId,
    pub state: GameState,
    pub kills: u32,
    /// Kills needed to finish the level, when the level has such a goal.
    pub kill_target: Option<u32>,
    pub player_health: i32,
    pub player_max_health: i32,
    pub boss: Option<BossView>,
    pub live_enemies: usize,
    pub feedback: Vec<FeedbackEvent>,
    pub level_events: Vec<LevelEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub health: i32,
    pub max_health: i32,
    pub shielded: bool,
}

/// Static description of a level for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelView {
    pub level: LevelId,
    /// Asset key of the background image.
    pub background: String,
    /// Hearts shown in the health bar.
    pub hearts: i32,
    pub show_boss_health: bool,
}
