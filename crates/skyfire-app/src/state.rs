//! Messages exchanged with the game-loop thread.

use skyfire_core::commands::PlayerCommand;
use skyfire_core::state::{HudSnapshot, LevelView};

/// Commands sent from the host to the game-loop thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameLoopCommand {
    /// Input intent forwarded to the level director.
    Player(PlayerCommand),
    /// Suspend tick dispatch. The world is frozen, not reset.
    Pause,
    Resume,
    /// Stop the loop thread.
    Shutdown,
}

/// Everything the game-loop thread publishes.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    LevelStarted(LevelView),
    Hud(HudSnapshot),
}

/// How the game-loop thread ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    Won,
    Lost,
    /// Shutdown was requested or the host hung up.
    Shutdown,
}
