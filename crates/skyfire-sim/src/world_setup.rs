//! Actor factories and spawn helpers.
//!
//! Builds fully-populated `Actor`s for every kind and registers them under
//! the right category. Positions are top-left anchors in field coordinates.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use skyfire_boss_ai::fsm::{self, BossTuning};
use skyfire_core::components::*;
use skyfire_core::config::PlayField;
use skyfire_core::constants::*;
use skyfire_core::enums::{Category, Faction, PowerUpEffect};
use skyfire_core::types::Body;

use crate::registry::Registry;

/// The player's plane at its start position.
pub fn player_actor(health: i32) -> Actor {
    Actor {
        kind: ActorKind::Player(PlayerState::default()),
        body: Body::new(
            Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        ),
        health,
        max_health: health,
        destroyed: false,
    }
}

/// A basic enemy entering at `(x, y)` and flying left.
pub fn enemy_actor(x: f32, y: f32) -> Actor {
    Actor {
        kind: ActorKind::BasicEnemy(EnemyState {
            speed: ENEMY_SPEED,
            fire_rate: ENEMY_FIRE_RATE,
        }),
        body: Body::new(Vec2::new(x, y), Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT)),
        health: ENEMY_HEALTH,
        max_health: ENEMY_HEALTH,
        destroyed: false,
    }
}

/// The boss, flush with the right edge of `field` and inside its band.
pub fn boss_actor<R: Rng + ?Sized>(
    field: &PlayField,
    tuning: &BossTuning,
    rng: &mut R,
) -> Actor {
    let x = (field.width - BOSS_WIDTH).max(0.0);
    let y = BOSS_START_Y.min(tuning.y_lower_bound).max(tuning.y_upper_bound);
    Actor {
        kind: ActorKind::Boss(fsm::new_boss_state(tuning, rng)),
        body: Body::new(Vec2::new(x, y), Vec2::new(BOSS_WIDTH, BOSS_HEIGHT)),
        health: BOSS_HEALTH,
        max_health: BOSS_HEALTH,
        destroyed: false,
    }
}

/// A projectile whose vertical center sits at `muzzle.y`.
///
/// Friendly rounds start with their left edge at `muzzle.x`; hostile rounds
/// end with their right edge there, so neither overlaps its shooter.
pub fn projectile_actor(muzzle: Vec2, velocity: Vec2, faction: Faction) -> Actor {
    let x = match faction {
        Faction::Player => muzzle.x,
        Faction::Enemy => muzzle.x - PROJECTILE_WIDTH,
    };
    Actor {
        kind: ActorKind::Projectile(ProjectileState { velocity, faction }),
        body: Body::new(
            Vec2::new(x, muzzle.y - PROJECTILE_HEIGHT / 2.0),
            Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        ),
        health: 1,
        max_health: 1,
        destroyed: false,
    }
}

/// A power-up dropping from the top edge at column `x`.
pub fn power_up_actor(x: f32, effect: PowerUpEffect) -> Actor {
    Actor {
        kind: ActorKind::PowerUp(PowerUpState {
            effect,
            fall_speed: POWER_UP_FALL_SPEED,
        }),
        body: Body::new(Vec2::new(x, 0.0), Vec2::splat(POWER_UP_SIZE)),
        health: 1,
        max_health: 1,
        destroyed: false,
    }
}

pub fn spawn_player(registry: &mut Registry, health: i32) -> Entity {
    let entity = registry.spawn(player_actor(health), Category::Friendly);
    log::debug!("Spawned player {entity:?} with {health} health");
    entity
}

/// Spawn a basic enemy on the right edge at a random height.
pub fn spawn_enemy<R: Rng + ?Sized>(
    registry: &mut Registry,
    field: &PlayField,
    rng: &mut R,
) -> Entity {
    let y_max = (field.height - ENEMY_HEIGHT)
        .min(ENEMY_SPAWN_Y_MAX)
        .max(ENEMY_SPAWN_Y_MIN);
    let y = rng.gen_range(ENEMY_SPAWN_Y_MIN..=y_max);
    registry.spawn(enemy_actor(field.width, y), Category::Enemy)
}

pub fn spawn_boss<R: Rng + ?Sized>(
    registry: &mut Registry,
    field: &PlayField,
    tuning: &BossTuning,
    rng: &mut R,
) -> Entity {
    let entity = registry.spawn(boss_actor(field, tuning, rng), Category::Enemy);
    log::info!("Boss {entity:?} entered the field");
    entity
}

pub fn spawn_user_projectile(registry: &mut Registry, muzzle: Vec2, velocity: Vec2) -> Entity {
    registry.spawn(
        projectile_actor(muzzle, velocity, Faction::Player),
        Category::UserProjectile,
    )
}

pub fn spawn_enemy_projectile(registry: &mut Registry, muzzle: Vec2, speed: f32) -> Entity {
    registry.spawn(
        projectile_actor(muzzle, Vec2::new(speed, 0.0), Faction::Enemy),
        Category::EnemyProjectile,
    )
}

/// Spawn a power-up with a random effect somewhere over the middle half of the field.
pub fn spawn_power_up<R: Rng + ?Sized>(
    registry: &mut Registry,
    field: &PlayField,
    rng: &mut R,
) -> Entity {
    let lo = field.width * 0.25;
    let hi = (field.width * 0.75 - POWER_UP_SIZE).max(lo);
    let x = rng.gen_range(lo..=hi);
    let effect = if rng.gen_bool(0.5) {
        PowerUpEffect::MultiShot
    } else {
        PowerUpEffect::Repair
    };
    registry.spawn(power_up_actor(x, effect), Category::PowerUp)
}
