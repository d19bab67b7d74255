//! Game-state machine: Playing, Paused, GameOver, Win.
//!
//! Records every transition and notifies subscribed observers with
//! `(old, new)`. GameOver and Win are terminal; leaving them is logged as a
//! protocol violation but still performed.

use std::fmt;

use skyfire_core::enums::GameState;
use skyfire_core::SkyfireError;

pub type StateObserver = Box<dyn FnMut(GameState, GameState)>;

#[derive(Default)]
pub struct GameStateMachine {
    current: GameState,
    transitions: Vec<(GameState, GameState)>,
    observers: Vec<StateObserver>,
}

impl fmt::Debug for GameStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameStateMachine")
            .field("current", &self.current)
            .field("transitions", &self.transitions)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> GameState {
        self.current
    }

    /// Move to `next`, returning the state that was left.
    ///
    /// `None` is rejected with `SkyfireError::MissingState` and leaves the
    /// machine untouched.
    pub fn change_state(&mut self, next: Option<GameState>) -> Result<GameState, SkyfireError> {
        let next = next.ok_or(SkyfireError::MissingState)?;
        let old = self.current;
        if old.is_terminal() {
            log::warn!("State change {old:?} -> {next:?} after the game already ended");
        }
        self.current = next;
        self.transitions.push((old, next));
        log::info!("Game state {old:?} -> {next:?}");
        for observer in &mut self.observers {
            observer(old, next);
        }
        Ok(old)
    }

    /// Register an observer called after every transition.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(GameState, GameState) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn is_game_over(&self) -> bool {
        self.current == GameState::GameOver
    }

    pub fn is_win(&self) -> bool {
        self.current == GameState::Win
    }

    pub fn is_paused(&self) -> bool {
        self.current == GameState::Paused
    }

    /// Every `(old, new)` pair recorded so far, oldest first.
    pub fn transitions(&self) -> &[(GameState, GameState)] {
        &self.transitions
    }
}
