//! Player commands: discrete intents translated from the input device.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement ---
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    StopVertical,
    StopHorizontal,

    // --- Weapons ---
    /// Request a shot; resolved at the start of the next tick.
    Fire,

    // --- Simulation control ---
    Pause,
    Resume,
}
