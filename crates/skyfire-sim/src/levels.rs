//! Level policies: the four hooks the director calls into.
//!
//! A level decides how friendlies are placed, what spawns each tick, when
//! the run is over, and how the level is presented. Everything else in the
//! tick pipeline is shared.

use hecs::Entity;
use rand::RngCore;

use skyfire_boss_ai::fsm::BossTuning;
use skyfire_core::config::{LevelSettings, SimConfig};
use skyfire_core::enums::{Category, LevelId};
use skyfire_core::state::LevelView;

use crate::registry::Registry;
use crate::systems::spawner::{BoundedSpawner, PowerUpSpawner};
use crate::systems::wave_spawner::WaveSpawner;
use crate::world_setup;

/// Mutable view of the world handed to spawn hooks.
pub struct LevelContext<'a> {
    pub registry: &'a mut Registry,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a SimConfig,
    pub boss_tuning: &'a BossTuning,
}

/// Read-only facts the game-over check decides on.
#[derive(Debug, Clone, Copy)]
pub struct LevelStatus {
    pub player_alive: bool,
    pub kills: u32,
}

/// Outcome of the per-tick game-over check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    /// The player was shot down.
    Lose,
    /// This level is done; an external selector picks the next one.
    Advance,
    /// The whole game is won.
    Win,
}

pub trait LevelPolicy {
    fn id(&self) -> LevelId;

    /// Place the player (and any other friendlies). Returns the player.
    fn initialize_friendly_units(&mut self, ctx: &mut LevelContext<'_>) -> Entity {
        world_setup::spawn_player(ctx.registry, ctx.config.player_health)
    }

    fn spawn_enemy_units(&mut self, ctx: &mut LevelContext<'_>);

    fn check_game_over(&self, status: &LevelStatus, registry: &Registry) -> Verdict;

    fn instantiate_view(&self, config: &SimConfig) -> LevelView;

    /// Kills needed to finish the level, if the level counts kills.
    fn kill_target(&self) -> Option<u32> {
        None
    }

    /// The boss, once it has been introduced.
    fn boss(&self) -> Option<Entity> {
        None
    }

    /// Whether a boss was introduced and has since been purged.
    fn boss_defeated(&self, registry: &Registry) -> bool {
        self.boss().is_some_and(|boss| !registry.contains(boss))
    }
}

/// Build the policy for `id` from the run configuration.
pub fn build_level(id: LevelId, config: &SimConfig) -> Box<dyn LevelPolicy> {
    match id {
        LevelId::One => Box::new(LevelOne::new(&config.level_one)),
        LevelId::Two => Box::new(LevelTwo::new(&config.level_two)),
        LevelId::Three => Box::new(LevelThree::new(&config.level_three)),
    }
}

fn view(id: LevelId, background: &str, config: &SimConfig, show_boss_health: bool) -> LevelView {
    LevelView {
        level: id,
        background: background.to_string(),
        hearts: config.player_health,
        show_boss_health,
    }
}

/// Open skies: bounded probabilistic spawn until the kill target is met.
#[derive(Debug, Clone)]
pub struct LevelOne {
    spawner: BoundedSpawner,
    kill_target: u32,
}

impl LevelOne {
    pub fn new(settings: &LevelSettings) -> Self {
        Self {
            spawner: BoundedSpawner::from_settings(settings),
            kill_target: settings.kill_target,
        }
    }
}

impl LevelPolicy for LevelOne {
    fn id(&self) -> LevelId {
        LevelId::One
    }

    fn spawn_enemy_units(&mut self, ctx: &mut LevelContext<'_>) {
        self.spawner.run(ctx.registry, &ctx.config.field, ctx.rng);
    }

    fn check_game_over(&self, status: &LevelStatus, _registry: &Registry) -> Verdict {
        if !status.player_alive {
            Verdict::Lose
        } else if status.kills >= self.kill_target {
            Verdict::Advance
        } else {
            Verdict::Continue
        }
    }

    fn instantiate_view(&self, config: &SimConfig) -> LevelView {
        view(self.id(), "background1", config, false)
    }

    fn kill_target(&self) -> Option<u32> {
        Some(self.kill_target)
    }
}

/// Boss duel: the boss enters once the field is clear; power-ups drop meanwhile.
#[derive(Debug, Clone)]
pub struct LevelTwo {
    power_ups: PowerUpSpawner,
    boss: Option<Entity>,
}

impl LevelTwo {
    pub fn new(settings: &LevelSettings) -> Self {
        Self {
            power_ups: PowerUpSpawner::from_settings(settings),
            boss: None,
        }
    }
}

impl LevelPolicy for LevelTwo {
    fn id(&self) -> LevelId {
        LevelId::Two
    }

    fn spawn_enemy_units(&mut self, ctx: &mut LevelContext<'_>) {
        if self.boss.is_none() && ctx.registry.count(Category::Enemy) == 0 {
            self.boss = Some(world_setup::spawn_boss(
                ctx.registry,
                &ctx.config.field,
                ctx.boss_tuning,
                ctx.rng,
            ));
        }
        self.power_ups.run(ctx.registry, &ctx.config.field, ctx.rng);
    }

    fn check_game_over(&self, status: &LevelStatus, registry: &Registry) -> Verdict {
        if !status.player_alive {
            Verdict::Lose
        } else if self.boss_defeated(registry) {
            Verdict::Advance
        } else {
            Verdict::Continue
        }
    }

    fn instantiate_view(&self, config: &SimConfig) -> LevelView {
        view(self.id(), "background2", config, true)
    }

    fn boss(&self) -> Option<Entity> {
        self.boss
    }
}

/// Wave assault: quota-driven waves, then the boss. Beating it wins the game.
#[derive(Debug, Clone)]
pub struct LevelThree {
    waves: WaveSpawner,
    power_ups: PowerUpSpawner,
}

impl LevelThree {
    pub fn new(settings: &LevelSettings) -> Self {
        Self {
            waves: WaveSpawner::from_settings(settings),
            power_ups: PowerUpSpawner::from_settings(settings),
        }
    }

    pub fn waves(&self) -> &WaveSpawner {
        &self.waves
    }
}

impl LevelPolicy for LevelThree {
    fn id(&self) -> LevelId {
        LevelId::Three
    }

    fn spawn_enemy_units(&mut self, ctx: &mut LevelContext<'_>) {
        self.waves
            .run(ctx.registry, &ctx.config.field, ctx.boss_tuning, ctx.rng);
        self.power_ups.run(ctx.registry, &ctx.config.field, ctx.rng);
    }

    fn check_game_over(&self, status: &LevelStatus, registry: &Registry) -> Verdict {
        if !status.player_alive {
            Verdict::Lose
        } else if self.boss_defeated(registry) {
            Verdict::Win
        } else {
            Verdict::Continue
        }
    }

    fn instantiate_view(&self, config: &SimConfig) -> LevelView {
        view(self.id(), "background3", config, true)
    }

    fn kill_target(&self) -> Option<u32> {
        Some(self.waves.total_quota())
    }

    fn boss(&self) -> Option<Entity> {
        self.waves.boss()
    }
}
