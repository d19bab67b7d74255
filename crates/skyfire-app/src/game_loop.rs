//! Game loop thread: owns the level director and the tick scheduler.
//!
//! The director is created inside this thread and never leaves it. Commands
//! arrive over `mpsc`; HUD snapshots and level starts go back out over a
//! second channel. When a level completes, the loop asks the campaign for
//! the next level and starts it with a fresh director.

use std::cell::RefCell;
use std::io;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skyfire_core::commands::PlayerCommand;
use skyfire_core::config::SimConfig;
use skyfire_core::enums::{GameState, LevelId};
use skyfire_sim::registry::NullRenderer;
use skyfire_sim::LevelDirector;

use crate::campaign;
use crate::scheduler::TickScheduler;
use crate::state::{GameLoopCommand, LoopEvent, LoopOutcome};

/// Host side of a running game loop.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub events: mpsc::Receiver<LoopEvent>,
    thread: JoinHandle<LoopOutcome>,
}

impl GameLoopHandle {
    /// Wait for the loop thread to finish.
    pub fn join(self) -> Option<LoopOutcome> {
        match self.thread.join() {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                log::error!("Game loop thread panicked");
                None
            }
        }
    }
}

/// Spawn the game loop on a named thread, starting at `first`.
pub fn spawn_game_loop(config: SimConfig, first: LevelId) -> io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();

    let thread = std::thread::Builder::new()
        .name("skyfire-game-loop".into())
        .spawn(move || run_game_loop(config, first, &cmd_rx, &event_tx))?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        events: event_rx,
        thread,
    })
}

/// Play levels in campaign order until the game is won, lost or shut down.
pub fn run_game_loop(
    config: SimConfig,
    first: LevelId,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    event_tx: &mpsc::Sender<LoopEvent>,
) -> LoopOutcome {
    let mut level = first;
    loop {
        let director = LevelDirector::new(config.clone(), level, Box::new(NullRenderer));
        let _ = event_tx.send(LoopEvent::LevelStarted(director.view().clone()));

        let state = match play_level(director, &config, cmd_rx, event_tx) {
            Some(state) => state,
            None => return LoopOutcome::Shutdown,
        };
        match state {
            GameState::Win => return LoopOutcome::Won,
            GameState::GameOver => return LoopOutcome::Lost,
            GameState::Playing | GameState::Paused => {}
        }

        match campaign::next_level(level) {
            Some(next) => {
                log::info!("Advancing from {:?} to {:?}", level, next);
                level = next;
            }
            None => {
                log::info!("Campaign finished on {:?}", level);
                return LoopOutcome::Won;
            }
        }
    }
}

/// Tick one level until its director finishes. Returns the final game
/// state, or `None` when the host asked to shut down.
fn play_level(
    director: LevelDirector,
    config: &SimConfig,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    event_tx: &mpsc::Sender<LoopEvent>,
) -> Option<GameState> {
    let director = Rc::new(RefCell::new(director));
    let interval = Duration::from_millis(config.tick_interval_ms);

    let mut scheduler = TickScheduler::new();
    {
        let director = Rc::clone(&director);
        let event_tx = event_tx.clone();
        scheduler.initialize(
            interval,
            Box::new(move || {
                let mut director = director.borrow_mut();
                let snapshot = director.tick();
                // The host may have stopped listening; the loop keeps its own schedule.
                let _ = event_tx.send(LoopEvent::Hud(snapshot));
                if director.is_finished() {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }),
        );
    }
    scheduler.start();

    while scheduler.is_running() {
        // 1. Drain all pending commands
        loop {
            let command = match cmd_rx.try_recv() {
                Ok(command) => command,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => GameLoopCommand::Shutdown,
            };
            if apply_command(command, &director, &mut scheduler).is_break() {
                return None;
            }
        }

        // 2. Run whatever ticks are due
        scheduler.pump(Instant::now());

        // 3. Sleep until the next tick, or poll for input while paused
        let wait = scheduler
            .next_due()
            .map_or(interval, |due| due.saturating_duration_since(Instant::now()));
        if scheduler.is_running() && !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }

    let state = director.borrow().state();
    Some(state)
}

/// Apply one host command. Pause and resume act on the director and the
/// scheduler together, whichever channel they arrive on. Returns `Break`
/// on shutdown.
fn apply_command(
    command: GameLoopCommand,
    director: &RefCell<LevelDirector>,
    scheduler: &mut TickScheduler,
) -> ControlFlow<()> {
    match command {
        GameLoopCommand::Pause | GameLoopCommand::Player(PlayerCommand::Pause) => {
            director.borrow_mut().pause();
            scheduler.pause();
        }
        GameLoopCommand::Resume | GameLoopCommand::Player(PlayerCommand::Resume) => {
            director.borrow_mut().resume();
            scheduler.resume();
        }
        GameLoopCommand::Player(command) => {
            director.borrow_mut().queue_command(command);
        }
        GameLoopCommand::Shutdown => {
            scheduler.stop();
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SimConfig {
        SimConfig {
            tick_interval_ms: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::Fire)).unwrap();
        tx.send(GameLoopCommand::Pause).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                GameLoopCommand::Player(PlayerCommand::Fire),
                GameLoopCommand::Pause,
                GameLoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_shutdown_before_first_tick() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        cmd_tx.send(GameLoopCommand::Shutdown).unwrap();

        let outcome = run_game_loop(fast_config(), LevelId::One, &cmd_rx, &event_tx);

        assert_eq!(outcome, LoopOutcome::Shutdown);
        let events: Vec<_> = event_rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], LoopEvent::LevelStarted(view) if view.level == LevelId::One));
    }

    #[test]
    fn test_hung_up_host_stops_loop() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
        let (event_tx, _event_rx) = mpsc::channel();
        drop(cmd_tx);

        let outcome = run_game_loop(fast_config(), LevelId::Two, &cmd_rx, &event_tx);
        assert_eq!(outcome, LoopOutcome::Shutdown);
    }

    #[test]
    fn test_spawned_loop_publishes_snapshots() {
        let handle = spawn_game_loop(fast_config(), LevelId::One).unwrap();

        let mut huds = 0;
        while huds < 5 {
            match handle.events.recv_timeout(Duration::from_secs(5)).unwrap() {
                LoopEvent::Hud(snapshot) => {
                    assert_eq!(snapshot.level, LevelId::One);
                    huds += 1;
                }
                LoopEvent::LevelStarted(_) => {}
            }
        }

        handle.commands.send(GameLoopCommand::Shutdown).unwrap();
        assert_eq!(handle.join(), Some(LoopOutcome::Shutdown));
    }

    fn paused_pair() -> (RefCell<LevelDirector>, TickScheduler, Instant) {
        let director = RefCell::new(LevelDirector::new(
            fast_config(),
            LevelId::One,
            Box::new(NullRenderer),
        ));
        let mut scheduler = TickScheduler::new();
        scheduler.initialize(
            Duration::from_millis(1),
            Box::new(|| ControlFlow::Continue(())),
        );
        let t0 = Instant::now();
        scheduler.start_at(t0);

        let flow = apply_command(GameLoopCommand::Pause, &director, &mut scheduler);
        assert_eq!(flow, ControlFlow::Continue(()));
        assert!(scheduler.is_paused());
        assert_eq!(director.borrow().state(), GameState::Paused);
        (director, scheduler, t0)
    }

    #[test]
    fn test_player_resume_restarts_paused_scheduler() {
        let (director, mut scheduler, t0) = paused_pair();

        apply_command(
            GameLoopCommand::Player(PlayerCommand::Resume),
            &director,
            &mut scheduler,
        );

        assert!(!scheduler.is_paused());
        assert_eq!(director.borrow().state(), GameState::Playing);
        assert!(scheduler.pump(t0 + Duration::from_millis(10)) >= 1);
    }

    #[test]
    fn test_player_pause_pauses_scheduler() {
        let (director, mut scheduler, _) = paused_pair();
        apply_command(GameLoopCommand::Resume, &director, &mut scheduler);
        assert!(!scheduler.is_paused());

        apply_command(
            GameLoopCommand::Player(PlayerCommand::Pause),
            &director,
            &mut scheduler,
        );

        assert!(scheduler.is_paused());
        assert_eq!(director.borrow().state(), GameState::Paused);
    }

    #[test]
    fn test_shutdown_command_stops_scheduler() {
        let (director, mut scheduler, _) = paused_pair();
        let flow = apply_command(GameLoopCommand::Shutdown, &director, &mut scheduler);
        assert_eq!(flow, ControlFlow::Break(()));
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_tick_interval_from_config() {
        let config = SimConfig::default();
        assert_eq!(Duration::from_millis(config.tick_interval_ms), Duration::from_millis(50));
    }
}
