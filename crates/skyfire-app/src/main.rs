//! Headless SKYFIRE runner.
//!
//! Usage: `skyfire [config.json]`. Plays the campaign with a scripted pilot
//! that weaves and fires, logging the HUD once per simulated second.
//! Set `RUST_LOG` to adjust verbosity.

use std::path::Path;
use std::process::ExitCode;

use skyfire_app::campaign::FIRST_LEVEL;
use skyfire_app::game_loop::spawn_game_loop;
use skyfire_app::state::{GameLoopCommand, LoopEvent, LoopOutcome};
use skyfire_core::commands::PlayerCommand;
use skyfire_core::config::SimConfig;
use skyfire_core::constants::TICK_RATE;
use skyfire_core::state::HudSnapshot;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Cannot use config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let handle = match spawn_game_loop(config, FIRST_LEVEL) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("Failed to spawn game loop thread: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The loop drops its sender when it ends, which ends this iteration.
    for event in handle.events.iter() {
        match event {
            LoopEvent::LevelStarted(view) => {
                log::info!(
                    "Level {:?} on {} with {} hearts",
                    view.level,
                    view.background,
                    view.hearts
                );
            }
            LoopEvent::Hud(snapshot) => {
                report(&snapshot);
                for command in autopilot(snapshot.time.tick) {
                    if handle.commands.send(GameLoopCommand::Player(command)).is_err() {
                        break;
                    }
                }
            }
        }
    }

    match handle.join() {
        Some(LoopOutcome::Won) => {
            log::info!("Victory");
            ExitCode::SUCCESS
        }
        Some(LoopOutcome::Lost) => {
            log::info!("Shot down");
            ExitCode::SUCCESS
        }
        Some(LoopOutcome::Shutdown) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    }
}

/// Weave across the field and keep the trigger down.
fn autopilot(tick: u64) -> Vec<PlayerCommand> {
    let mut commands = vec![PlayerCommand::Fire];
    match tick % 80 {
        0 => commands.push(PlayerCommand::MoveUp),
        40 => commands.push(PlayerCommand::MoveDown),
        _ => {}
    }
    commands
}

fn report(snapshot: &HudSnapshot) {
    for event in &snapshot.level_events {
        log::info!("{event:?}");
    }
    if snapshot.time.tick % TICK_RATE as u64 != 0 {
        return;
    }
    let target = snapshot
        .kill_target
        .map_or_else(|| "-".to_string(), |t| t.to_string());
    let boss = snapshot.boss.map_or_else(String::new, |b| {
        format!(
            " boss {}/{}{}",
            b.health,
            b.max_health,
            if b.shielded { " [shield]" } else { "" }
        )
    });
    log::info!(
        "t={} {:?} hp {}/{} kills {}/{} enemies {}{}",
        snapshot.time.tick,
        snapshot.state,
        snapshot.player_health,
        snapshot.player_max_health,
        snapshot.kills,
        target,
        snapshot.live_enemies,
        boss
    );
}
