//! Events emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::LevelId;

/// Fire-and-forget damage feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackEvent {
    /// Play the hit sound.
    HitSound,
    /// Shake the camera.
    ScreenShake,
}

/// Level transition signals raised by the level director.
///
/// The kernel never names the next level; an external selector maps
/// `LevelComplete` to whatever comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LevelEvent {
    LevelComplete { level: LevelId },
    BossDefeated { level: LevelId },
    GameWon { level: LevelId },
    GameLost { level: LevelId },
}
