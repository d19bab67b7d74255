//! Wave/quota spawning followed by a single boss entrance.
//!
//! Waves are consumed in order. Within a wave each tick draws at most one
//! spawn trial, capped by `min(wave remaining, total remaining)`. A wave is
//! cleared once its quota is used up and no enemy is left on the field.
//! When every wave is cleared, or the total quota is spent and the field is
//! empty, the boss enters exactly once.

use hecs::Entity;
use rand::Rng;

use skyfire_boss_ai::fsm::BossTuning;
use skyfire_core::config::{LevelSettings, PlayField};
use skyfire_core::enums::Category;

use crate::registry::Registry;
use crate::world_setup;

/// What one `run` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveProgress {
    /// Nothing changed this tick.
    Idle,
    Spawned(Entity),
    /// Wave `index` was cleared and the next one armed.
    WaveCleared(usize),
    BossIntroduced(Entity),
}

#[derive(Debug, Clone)]
pub struct WaveSpawner {
    waves: Vec<u32>,
    probability: f64,
    total_quota: u32,
    wave_index: usize,
    spawned_in_wave: u32,
    total_spawned: u32,
    boss: Option<Entity>,
}

impl WaveSpawner {
    pub fn new(waves: Vec<u32>, total_quota: u32, probability: f64) -> Self {
        Self {
            waves,
            probability,
            total_quota,
            wave_index: 0,
            spawned_in_wave: 0,
            total_spawned: 0,
            boss: None,
        }
    }

    pub fn from_settings(settings: &LevelSettings) -> Self {
        Self::new(
            settings.waves.clone(),
            settings.kill_target,
            settings.wave_spawn_probability,
        )
    }

    pub fn run<R: Rng + ?Sized>(
        &mut self,
        registry: &mut Registry,
        field: &PlayField,
        tuning: &BossTuning,
        rng: &mut R,
    ) -> WaveProgress {
        if self.boss.is_some() {
            return WaveProgress::Idle;
        }
        let field_clear = registry.count(Category::Enemy) == 0;

        if self.waves_exhausted() {
            if !field_clear {
                return WaveProgress::Idle;
            }
            let boss = world_setup::spawn_boss(registry, field, tuning, rng);
            self.boss = Some(boss);
            return WaveProgress::BossIntroduced(boss);
        }

        let cap = self.remaining_in_wave().min(self.remaining_total());
        if cap == 0 {
            if !field_clear {
                return WaveProgress::Idle;
            }
            let cleared = self.wave_index;
            self.wave_index += 1;
            self.spawned_in_wave = 0;
            log::info!("Wave {} cleared", cleared + 1);
            return WaveProgress::WaveCleared(cleared);
        }

        if !rng.gen_bool(self.probability) {
            return WaveProgress::Idle;
        }
        let entity = world_setup::spawn_enemy(registry, field, rng);
        self.spawned_in_wave += 1;
        self.total_spawned += 1;
        WaveProgress::Spawned(entity)
    }

    /// All waves cleared or the total quota fully spawned.
    pub fn waves_exhausted(&self) -> bool {
        self.wave_index >= self.waves.len() || self.total_spawned >= self.total_quota
    }

    fn remaining_in_wave(&self) -> u32 {
        self.waves
            .get(self.wave_index)
            .map_or(0, |&size| size.saturating_sub(self.spawned_in_wave))
    }

    fn remaining_total(&self) -> u32 {
        self.total_quota.saturating_sub(self.total_spawned)
    }

    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    pub fn total_quota(&self) -> u32 {
        self.total_quota
    }

    /// The boss, once introduced.
    pub fn boss(&self) -> Option<Entity> {
        self.boss
    }
}
