//! Runtime configuration for a simulation run.
//!
//! Every field has a default drawn from `constants`, so a config file only
//! needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::SkyfireError;

/// Top-level configuration for starting a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub field: PlayField,
    pub player_health: i32,
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
    pub level_one: LevelSettings,
    pub level_two: LevelSettings,
    pub level_three: LevelSettings,
}

/// Dimensions of the visible play field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

/// Spawn and termination tuning for one level.
///
/// A level table present in a config file is read as a whole: fields it
/// omits take the Level One defaults, not that level's own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    /// Kills needed to finish the level (quota for wave levels).
    pub kill_target: u32,
    /// Live-enemy cap for bounded spawning.
    pub enemy_capacity: usize,
    pub enemy_spawn_probability: f64,
    pub power_up_probability: f64,
    /// Wave sizes, in order. Empty for levels without waves.
    pub waves: Vec<u32>,
    pub wave_spawn_probability: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field: PlayField::default(),
            player_health: PLAYER_INITIAL_HEALTH,
            tick_interval_ms: TICK_INTERVAL_MS,
            level_one: LevelSettings::level_one(),
            level_two: LevelSettings::level_two(),
            level_three: LevelSettings::level_three(),
        }
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self::level_one()
    }
}

impl LevelSettings {
    pub fn level_one() -> Self {
        Self {
            kill_target: LEVEL_ONE_KILL_TARGET,
            enemy_capacity: LEVEL_ONE_ENEMY_CAPACITY,
            enemy_spawn_probability: LEVEL_ONE_SPAWN_PROBABILITY,
            power_up_probability: 0.0,
            waves: Vec::new(),
            wave_spawn_probability: 0.0,
        }
    }

    pub fn level_two() -> Self {
        Self {
            kill_target: 1,
            enemy_capacity: 1,
            enemy_spawn_probability: 0.0,
            power_up_probability: LEVEL_THREE_POWER_UP_PROBABILITY,
            waves: Vec::new(),
            wave_spawn_probability: 0.0,
        }
    }

    pub fn level_three() -> Self {
        Self {
            kill_target: LEVEL_THREE_KILL_TARGET,
            enemy_capacity: 0,
            enemy_spawn_probability: 0.0,
            power_up_probability: LEVEL_THREE_POWER_UP_PROBABILITY,
            waves: LEVEL_THREE_WAVES.to_vec(),
            wave_spawn_probability: LEVEL_THREE_WAVE_SPAWN_PROBABILITY,
        }
    }

    fn validate(&self, name: &str) -> Result<(), SkyfireError> {
        for (label, p) in [
            ("enemy_spawn_probability", self.enemy_spawn_probability),
            ("power_up_probability", self.power_up_probability),
            ("wave_spawn_probability", self.wave_spawn_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SkyfireError::InvalidConfig(format!(
                    "{name}.{label} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

impl SimConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, SkyfireError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, SkyfireError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), SkyfireError> {
        if self.field.width <= 0.0 || self.field.height <= 0.0 {
            return Err(SkyfireError::InvalidConfig(format!(
                "play field must have positive size, got {}x{}",
                self.field.width, self.field.height
            )));
        }
        if self.field.width < MIN_FIELD_WIDTH || self.field.height < MIN_FIELD_HEIGHT {
            return Err(SkyfireError::InvalidConfig(format!(
                "play field {}x{} is smaller than the minimum {}x{}",
                self.field.width, self.field.height, MIN_FIELD_WIDTH, MIN_FIELD_HEIGHT
            )));
        }
        if self.player_health <= 0 {
            return Err(SkyfireError::InvalidConfig(
                "player_health must be positive".into(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(SkyfireError::InvalidConfig(
                "tick_interval_ms must be non-zero".into(),
            ));
        }
        self.level_one.validate("level_one")?;
        self.level_two.validate("level_two")?;
        self.level_three.validate("level_three")?;
        if self.level_three.waves.is_empty() {
            return Err(SkyfireError::InvalidConfig(
                "level_three.waves must list at least one wave".into(),
            ));
        }
        Ok(())
    }
}
