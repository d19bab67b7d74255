//! Probabilistic spawners: capacity-bounded enemies and power-up drops.

use hecs::Entity;
use rand::Rng;

use skyfire_core::config::{LevelSettings, PlayField};
use skyfire_core::enums::Category;

use crate::registry::Registry;
use crate::world_setup;

/// Keeps up to `capacity` enemies on the field, adding at most one per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedSpawner {
    pub capacity: usize,
    pub probability: f64,
}

impl BoundedSpawner {
    pub fn from_settings(settings: &LevelSettings) -> Self {
        Self {
            capacity: settings.enemy_capacity,
            probability: settings.enemy_spawn_probability,
        }
    }

    /// One Bernoulli trial while the enemy list is below capacity.
    /// No trial is drawn at capacity.
    pub fn run<R: Rng + ?Sized>(
        &self,
        registry: &mut Registry,
        field: &PlayField,
        rng: &mut R,
    ) -> Option<Entity> {
        if registry.count(Category::Enemy) >= self.capacity {
            return None;
        }
        if !rng.gen_bool(self.probability) {
            return None;
        }
        Some(world_setup::spawn_enemy(registry, field, rng))
    }
}

/// Low-probability power-up drop, independent of enemy spawning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSpawner {
    pub probability: f64,
}

impl PowerUpSpawner {
    pub fn from_settings(settings: &LevelSettings) -> Self {
        Self {
            probability: settings.power_up_probability,
        }
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        registry: &mut Registry,
        field: &PlayField,
        rng: &mut R,
    ) -> Option<Entity> {
        if !rng.gen_bool(self.probability) {
            return None;
        }
        let entity = world_setup::spawn_power_up(registry, field, rng);
        log::debug!("Dropped power-up {entity:?}");
        Some(entity)
    }
}
