//! Level director: the per-tick pipeline.
//!
//! `LevelDirector` owns the registry, the game-state machine, the random
//! source and the active level policy. Each `tick` drains queued input and,
//! while playing, runs spawn, enemy fire, update, collisions, cleanup,
//! kill accounting and the game-over check, in that order. Headless and
//! deterministic for a given seed.

use std::collections::VecDeque;

use hecs::Entity;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skyfire_boss_ai::fsm::BossTuning;
use skyfire_core::commands::PlayerCommand;
use skyfire_core::components::ActorKind;
use skyfire_core::config::SimConfig;
use skyfire_core::constants::PLAYER_SPEED;
use skyfire_core::enums::{Category, GameState, LevelId};
use skyfire_core::events::{FeedbackEvent, LevelEvent};
use skyfire_core::state::{HudSnapshot, LevelView};
use skyfire_core::types::SimTime;

use crate::levels::{self, LevelContext, LevelPolicy, LevelStatus, Verdict};
use crate::registry::{Registry, Renderer};
use crate::state_machine::GameStateMachine;
use crate::systems;
use crate::systems::collision::CollisionReport;
use crate::systems::snapshot::Progress;

pub struct LevelDirector {
    registry: Registry,
    state: GameStateMachine,
    policy: Box<dyn LevelPolicy>,
    config: SimConfig,
    boss_tuning: BossTuning,
    rng: Box<dyn RngCore>,
    view: LevelView,
    player: Option<Entity>,
    time: SimTime,
    kills: u32,
    /// Set once the level has ended (advance, win or lose). No systems run after.
    finished: bool,
    fire_requested: bool,
    command_queue: VecDeque<PlayerCommand>,
    feedback: Vec<FeedbackEvent>,
    level_events: Vec<LevelEvent>,
    last_collisions: CollisionReport,
}

impl LevelDirector {
    /// Start `level` with an RNG seeded from `config.seed`.
    pub fn new(config: SimConfig, level: LevelId, renderer: Box<dyn Renderer>) -> Self {
        let rng = Box::new(ChaCha8Rng::seed_from_u64(config.seed));
        let policy = levels::build_level(level, &config);
        Self::with_policy(config, policy, renderer, rng)
    }

    /// Start an arbitrary policy with an injected random source.
    pub fn with_policy(
        config: SimConfig,
        mut policy: Box<dyn LevelPolicy>,
        renderer: Box<dyn Renderer>,
        mut rng: Box<dyn RngCore>,
    ) -> Self {
        let mut registry = Registry::new(renderer);
        let boss_tuning = BossTuning::for_field(&config.field);
        let view = policy.instantiate_view(&config);
        let player = {
            let mut ctx = LevelContext {
                registry: &mut registry,
                rng: &mut *rng,
                config: &config,
                boss_tuning: &boss_tuning,
            };
            policy.initialize_friendly_units(&mut ctx)
        };
        log::info!(
            "Level {:?} ({}) started, seed {}",
            policy.id(),
            policy.id().name(),
            config.seed
        );

        Self {
            registry,
            state: GameStateMachine::new(),
            policy,
            config,
            boss_tuning,
            rng,
            view,
            player: Some(player),
            time: SimTime::default(),
            kills: 0,
            finished: false,
            fire_requested: false,
            command_queue: VecDeque::new(),
            feedback: Vec::new(),
            level_events: Vec::new(),
            last_collisions: CollisionReport::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one tick and return the resulting snapshot.
    ///
    /// While paused or after the level has ended, only queued commands are
    /// processed and time does not advance.
    pub fn tick(&mut self) -> HudSnapshot {
        self.process_commands();

        if self.state.current() == GameState::Playing && !self.finished {
            self.run_systems();
            self.time.advance();
        }

        self.snapshot()
    }

    /// Build a snapshot, draining pending feedback and level events.
    pub fn snapshot(&mut self) -> HudSnapshot {
        let progress = Progress {
            time: self.time,
            level: self.policy.id(),
            state: self.state.current(),
            kills: self.kills,
            kill_target: self.policy.kill_target(),
        };
        systems::snapshot::build_snapshot(
            &self.registry,
            self.player,
            progress,
            std::mem::take(&mut self.feedback),
            std::mem::take(&mut self.level_events),
        )
    }

    pub fn pause(&mut self) {
        if self.state.current() == GameState::Playing {
            self.set_state(GameState::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state.current() == GameState::Paused {
            self.set_state(GameState::Playing);
        }
    }

    /// Enter `Win` once. Later calls are ignored.
    pub fn win_game(&mut self) {
        if self.state.current().is_terminal() {
            log::warn!("Ignoring win: game already ended as {:?}", self.state.current());
            return;
        }
        self.finished = true;
        self.set_state(GameState::Win);
        self.level_events.push(LevelEvent::GameWon {
            level: self.policy.id(),
        });
        log::info!("Game won on {:?} at tick {}", self.policy.id(), self.time.tick);
    }

    /// Enter `GameOver` once. Later calls are ignored.
    pub fn lose_game(&mut self) {
        if self.state.current().is_terminal() {
            log::warn!("Ignoring loss: game already ended as {:?}", self.state.current());
            return;
        }
        self.finished = true;
        self.set_state(GameState::GameOver);
        self.level_events.push(LevelEvent::GameLost {
            level: self.policy.id(),
        });
        log::info!("Game lost on {:?} at tick {}", self.policy.id(), self.time.tick);
    }

    /// Raise `LevelComplete` once and stop running systems. The next level
    /// is chosen outside the kernel.
    pub fn advance_level(&mut self) {
        if self.finished {
            log::warn!("Ignoring advance: level {:?} already ended", self.policy.id());
            return;
        }
        self.finished = true;
        self.level_events.push(LevelEvent::LevelComplete {
            level: self.policy.id(),
        });
        log::info!("Level {:?} complete with {} kills", self.policy.id(), self.kills);
    }

    /// Whether the level has ended and the scheduler should stop dispatching.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> GameState {
        self.state.current()
    }

    pub fn state_machine(&self) -> &GameStateMachine {
        &self.state
    }

    pub fn state_machine_mut(&mut self) -> &mut GameStateMachine {
        &mut self.state
    }

    pub fn level(&self) -> LevelId {
        self.policy.id()
    }

    pub fn view(&self) -> &LevelView {
        &self.view
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable registry access for scripted setups.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn last_collisions(&self) -> CollisionReport {
        self.last_collisions
    }

    fn set_state(&mut self, next: GameState) {
        if let Err(e) = self.state.change_state(Some(next)) {
            log::error!("State change to {next:?} failed: {e}");
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            PlayerCommand::Fire => {
                if self.state.current() == GameState::Playing {
                    self.fire_requested = true;
                }
            }
            steer => self.steer_player(steer),
        }
    }

    fn steer_player(&mut self, command: PlayerCommand) {
        let Some(actor) = self.player.and_then(|p| self.registry.actor_mut(p)) else {
            return;
        };
        let ActorKind::Player(player) = &mut actor.kind else {
            return;
        };
        match command {
            PlayerCommand::MoveUp => player.velocity.y = -PLAYER_SPEED,
            PlayerCommand::MoveDown => player.velocity.y = PLAYER_SPEED,
            PlayerCommand::MoveLeft => player.velocity.x = -PLAYER_SPEED,
            PlayerCommand::MoveRight => player.velocity.x = PLAYER_SPEED,
            PlayerCommand::StopVertical => player.velocity.y = 0.0,
            PlayerCommand::StopHorizontal => player.velocity.x = 0.0,
            PlayerCommand::Fire | PlayerCommand::Pause | PlayerCommand::Resume => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 0. Player shot requested by input
        if std::mem::take(&mut self.fire_requested) {
            if let Some(player) = self.player {
                systems::weapons::fire_player(&mut self.registry, player);
            }
        }

        // 1. Level spawn policy
        {
            let mut ctx = LevelContext {
                registry: &mut self.registry,
                rng: &mut *self.rng,
                config: &self.config,
                boss_tuning: &self.boss_tuning,
            };
            self.policy.spawn_enemy_units(&mut ctx);
        }

        // 2. Enemy fire trials
        systems::weapons::run_enemy_fire(&mut self.registry, &mut *self.rng);

        // 3. Movement and boss behavior
        {
            let field = &self.config.field;
            let tuning = &self.boss_tuning;
            let rng = &mut *self.rng;
            self.registry.update_all(|_, actor| {
                systems::movement::update_actor(actor, field, tuning, &mut *rng);
            });
        }

        // 4. Collisions against the pre-cleanup world
        self.last_collisions = systems::collision::resolve_all(
            &mut self.registry,
            self.player,
            &self.config.field,
            &mut self.feedback,
        );

        // 5. Cleanup
        let report = self.registry.cleanup();

        // 6. Kill accounting
        self.kills += report.removed(Category::Enemy) as u32;
        if let Some(player) = self.player {
            if !self.registry.contains(player) {
                log::info!("Player shot down at tick {}", self.time.tick);
                self.player = None;
            }
        }

        // 7. Game-over check
        let status = LevelStatus {
            player_alive: self.player.is_some(),
            kills: self.kills,
        };
        match self.policy.check_game_over(&status, &self.registry) {
            Verdict::Continue => {}
            Verdict::Lose => self.lose_game(),
            Verdict::Advance => {
                self.raise_boss_defeated();
                self.advance_level();
            }
            Verdict::Win => {
                self.raise_boss_defeated();
                self.win_game();
            }
        }
    }

    fn raise_boss_defeated(&mut self) {
        if self.policy.boss_defeated(&self.registry) {
            self.level_events.push(LevelEvent::BossDefeated {
                level: self.policy.id(),
            });
        }
    }
}
