//! Weapon release: the player's queued shot and hostile fire trials.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use skyfire_boss_ai::fsm;
use skyfire_core::components::ActorKind;
use skyfire_core::constants::*;
use skyfire_core::enums::Category;

use crate::registry::Registry;
use crate::world_setup;

/// Fire the player's guns. A pending multi-shot charge turns the shot into
/// a three-round spread. Returns the number of projectiles spawned.
pub fn fire_player(registry: &mut Registry, player: Entity) -> usize {
    let (muzzle, spread) = {
        let Some(actor) = registry.actor_mut(player) else {
            return 0;
        };
        if actor.destroyed {
            return 0;
        }
        let bounds = actor.body.bounds();
        let muzzle = Vec2::new(bounds.max.x, actor.body.center().y);
        let spread = match &mut actor.kind {
            ActorKind::Player(state) if state.multishot_charges > 0 => {
                state.multishot_charges -= 1;
                true
            }
            _ => false,
        };
        (muzzle, spread)
    };

    let lanes = if spread {
        vec![-MULTISHOT_SPREAD, 0.0, MULTISHOT_SPREAD]
    } else {
        vec![0.0]
    };
    for &dy in &lanes {
        world_setup::spawn_user_projectile(registry, muzzle, Vec2::new(USER_PROJECTILE_SPEED, dy));
    }
    lanes.len()
}

/// Run one fire trial per live enemy and spawn the resulting projectiles.
/// Returns the number of projectiles spawned.
pub fn run_enemy_fire<R: Rng + ?Sized>(registry: &mut Registry, rng: &mut R) -> usize {
    let mut muzzles = Vec::new();
    for entity in registry.entities(Category::Enemy) {
        let Some(actor) = registry.actor(entity) else {
            continue;
        };
        if actor.destroyed {
            continue;
        }
        let muzzle = Vec2::new(actor.body.position().x, actor.body.center().y);
        match &actor.kind {
            ActorKind::BasicEnemy(enemy) => {
                if rng.gen_bool(enemy.fire_rate) {
                    muzzles.push((muzzle, ENEMY_PROJECTILE_SPEED));
                }
            }
            ActorKind::Boss(boss) => {
                if fsm::should_fire(boss.fire_rate, rng) {
                    muzzles.push((muzzle, BOSS_PROJECTILE_SPEED));
                }
            }
            _ => {}
        }
    }

    for &(muzzle, speed) in &muzzles {
        world_setup::spawn_enemy_projectile(registry, muzzle, speed);
    }
    muzzles.len()
}
