//! Boss behavior state machine.
//!
//! Two independent pieces of state advance once per tick: the movement
//! cursor walking a shuffled pattern of vertical velocities, and the shield
//! toggling between `Unshielded` and `Shielded`. Firing is a separate
//! Bernoulli trial with no coupling to either. No ECS dependency.

use rand::seq::SliceRandom;
use rand::Rng;

use skyfire_core::components::{BossState, MovementPattern, ShieldState};
use skyfire_core::config::PlayField;
use skyfire_core::constants::*;
use skyfire_core::types::Body;

/// Tunables for one boss archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossTuning {
    pub vertical_velocity: f32,
    pub moves_per_cycle: usize,
    pub max_frames_with_same_move: u32,
    /// Topmost allowed y of the boss's top edge.
    pub y_upper_bound: f32,
    /// Bottommost allowed y of the boss's top edge.
    pub y_lower_bound: f32,
    pub shield_probability: f64,
    pub max_frames_with_shield: u32,
    pub shield_cooldown_frames: u32,
    pub fire_rate: f64,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            vertical_velocity: BOSS_VERTICAL_VELOCITY,
            moves_per_cycle: BOSS_MOVES_PER_CYCLE,
            max_frames_with_same_move: BOSS_MAX_FRAMES_WITH_SAME_MOVE,
            y_upper_bound: BOSS_Y_UPPER_BOUND,
            y_lower_bound: BOSS_Y_LOWER_BOUND,
            shield_probability: BOSS_SHIELD_PROBABILITY,
            max_frames_with_shield: BOSS_MAX_FRAMES_WITH_SHIELD,
            shield_cooldown_frames: BOSS_SHIELD_COOLDOWN_FRAMES,
            fire_rate: BOSS_FIRE_RATE,
        }
    }
}

impl BossTuning {
    /// Default tuning with the vertical band fitted to `field`.
    pub fn for_field(field: &PlayField) -> Self {
        let defaults = Self::default();
        Self {
            y_lower_bound: (field.height - BOSS_HEIGHT).max(defaults.y_upper_bound),
            ..defaults
        }
    }
}

/// Shield state change produced by a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldTransition {
    Unchanged,
    Activated,
    Deactivated,
}

/// Result of advancing the boss by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossUpdate {
    /// The move drawn from the pattern this tick.
    pub requested_dy: f32,
    /// Whether the move kept the boss inside its band.
    pub moved: bool,
    pub shield: ShieldTransition,
}

/// Build a fresh pattern: equal counts of +V, -V and 0, randomly permuted.
pub fn new_pattern<R: Rng + ?Sized>(tuning: &BossTuning, rng: &mut R) -> MovementPattern {
    let v = tuning.vertical_velocity;
    let mut moves = Vec::with_capacity(tuning.moves_per_cycle * 3);
    for _ in 0..tuning.moves_per_cycle {
        moves.push(v);
        moves.push(-v);
        moves.push(0.0);
    }
    moves.shuffle(rng);
    MovementPattern {
        moves,
        cursor: 0,
        same_move_count: 0,
    }
}

/// Build the complete boss payload with an unshielded, cooling-down shield.
pub fn new_boss_state<R: Rng + ?Sized>(tuning: &BossTuning, rng: &mut R) -> BossState {
    BossState {
        movement: new_pattern(tuning, rng),
        shield: ShieldState::default(),
        fire_rate: tuning.fire_rate,
    }
}

/// Draw the move for this tick.
///
/// Returns `moves[cursor]` as it stood before any re-permutation. When the
/// same slot has been served `threshold` times in a row the pattern is
/// shuffled, the counter resets and the cursor advances, wrapping to 0.
pub fn next_move<R: Rng + ?Sized>(
    pattern: &mut MovementPattern,
    threshold: u32,
    rng: &mut R,
) -> f32 {
    if pattern.moves.is_empty() {
        return 0.0;
    }
    if pattern.cursor >= pattern.moves.len() {
        pattern.cursor = 0;
    }

    let current = pattern.moves[pattern.cursor];
    pattern.same_move_count += 1;
    if pattern.same_move_count >= threshold.max(1) {
        pattern.moves.shuffle(rng);
        pattern.same_move_count = 0;
        pattern.cursor += 1;
    }
    if pattern.cursor == pattern.moves.len() {
        pattern.cursor = 0;
    }
    current
}

/// Apply a vertical move, reverting it if the top edge would leave
/// `[upper, lower]`. Returns whether the move was kept.
pub fn apply_vertical_move(body: &mut Body, dy: f32, upper: f32, lower: f32) -> bool {
    let before = body.displacement.y;
    body.displacement.y += dy;
    let top = body.position().y;
    if top < upper || top > lower {
        body.displacement.y = before;
        return false;
    }
    true
}

/// Advance the shield by one tick.
///
/// `Unshielded -> Shielded` needs the cooldown to have elapsed and a
/// Bernoulli success; `Shielded -> Unshielded` happens once the shield has
/// been up for `max_frames_with_shield` ticks. Every transition zeroes
/// both counters.
pub fn update_shield<R: Rng + ?Sized>(
    shield: &mut ShieldState,
    tuning: &BossTuning,
    rng: &mut R,
) -> ShieldTransition {
    if shield.active {
        shield.frames_active += 1;
        if shield.frames_active >= tuning.max_frames_with_shield {
            *shield = ShieldState::default();
            return ShieldTransition::Deactivated;
        }
        return ShieldTransition::Unchanged;
    }

    shield.frames_since_deactivated = shield.frames_since_deactivated.saturating_add(1);
    if shield.frames_since_deactivated >= tuning.shield_cooldown_frames
        && rng.gen_bool(tuning.shield_probability)
    {
        *shield = ShieldState {
            active: true,
            frames_active: 0,
            frames_since_deactivated: 0,
        };
        return ShieldTransition::Activated;
    }
    ShieldTransition::Unchanged
}

/// Per-tick fire trial, independent of shield and movement.
pub fn should_fire<R: Rng + ?Sized>(fire_rate: f64, rng: &mut R) -> bool {
    rng.gen_bool(fire_rate)
}

/// Advance movement then shield for one tick.
pub fn step<R: Rng + ?Sized>(
    boss: &mut BossState,
    body: &mut Body,
    tuning: &BossTuning,
    rng: &mut R,
) -> BossUpdate {
    let requested_dy = next_move(&mut boss.movement, tuning.max_frames_with_same_move, rng);
    let moved = apply_vertical_move(
        body,
        requested_dy,
        tuning.y_upper_bound,
        tuning.y_lower_bound,
    );
    let shield = update_shield(&mut boss.shield, tuning, rng);
    match shield {
        ShieldTransition::Activated => log::debug!("Boss shield up"),
        ShieldTransition::Deactivated => log::debug!("Boss shield down"),
        ShieldTransition::Unchanged => {}
    }
    BossUpdate {
        requested_dy,
        moved,
        shield,
    }
}
