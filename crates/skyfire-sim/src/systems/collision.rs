//! Collision resolution: five passes over the pre-cleanup registry.
//!
//! Every pass reads hitboxes captured at its start, so an entity destroyed
//! by an earlier pass (or earlier in the same pass) still collides until
//! cleanup purges it. Repeated hits on a destroyed actor only push its
//! health further below zero.

use hecs::Entity;

use skyfire_core::components::{Actor, ActorKind};
use skyfire_core::config::PlayField;
use skyfire_core::constants::BOSS_HITBOX_PADDING;
use skyfire_core::enums::{Category, PowerUpEffect};
use skyfire_core::events::FeedbackEvent;
use skyfire_core::types::Aabb;

use crate::registry::Registry;
use crate::systems::damage::{self, is_shielded};

/// Hit counts per pass for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub penetrations: u32,
    pub projectile_hits: u32,
    pub player_hits: u32,
    pub plane_collisions: u32,
    pub power_ups_collected: u32,
}

/// Collision view of one actor, captured before a pass mutates anything.
#[derive(Debug, Clone, Copy)]
struct Hitbox {
    entity: Entity,
    raw: Aabb,
    effective: Aabb,
    shielded: bool,
    power_up: Option<PowerUpEffect>,
}

/// The box projectiles are tested against. Boss sprites carry transparent
/// margins, so the boss is hit only inside its padded bounds.
pub fn effective_hitbox(actor: &Actor) -> Aabb {
    let raw = actor.body.bounds();
    match actor.kind {
        ActorKind::Boss(_) => raw.shrink(BOSS_HITBOX_PADDING),
        _ => raw,
    }
}

fn hitboxes(registry: &Registry, category: Category) -> Vec<Hitbox> {
    registry
        .entities(category)
        .into_iter()
        .filter_map(|entity| {
            let actor = registry.actor(entity)?;
            let power_up = match actor.kind {
                ActorKind::PowerUp(state) => Some(state.effect),
                _ => None,
            };
            Some(Hitbox {
                entity,
                raw: actor.body.bounds(),
                effective: effective_hitbox(&actor),
                shielded: is_shielded(&actor),
                power_up,
            })
        })
        .collect()
}

fn hit(registry: &mut Registry, entity: Entity) {
    if let Some(actor) = registry.actor_mut(entity) {
        damage::take_damage(actor);
    }
}

fn signal_damage(feedback: &mut Vec<FeedbackEvent>) {
    feedback.push(FeedbackEvent::HitSound);
    feedback.push(FeedbackEvent::ScreenShake);
}

/// Run all five passes in order.
pub fn resolve_all(
    registry: &mut Registry,
    player: Option<Entity>,
    field: &PlayField,
    feedback: &mut Vec<FeedbackEvent>,
) -> CollisionReport {
    CollisionReport {
        penetrations: boundary_penetration(registry, player, field),
        projectile_hits: user_projectiles_vs_enemies(registry),
        player_hits: enemy_projectiles_vs_friendlies(registry, feedback),
        plane_collisions: planes_vs_planes(registry, feedback),
        power_ups_collected: power_ups_vs_friendlies(registry),
    }
}

/// Enemies that flew further than the field is wide have breached the
/// defense line: each is destroyed and costs the player one health.
pub fn boundary_penetration(
    registry: &mut Registry,
    player: Option<Entity>,
    field: &PlayField,
) -> u32 {
    let breached: Vec<Entity> = registry
        .entities(Category::Enemy)
        .into_iter()
        .filter(|&e| {
            registry
                .actor(e)
                .is_some_and(|a| a.body.displacement.x.abs() > field.width)
        })
        .collect();

    for &enemy in &breached {
        if let Some(actor) = registry.actor_mut(enemy) {
            damage::destroy(actor);
        }
        if let Some(player) = player {
            hit(registry, player);
        }
    }
    if !breached.is_empty() {
        log::debug!("{} enemies breached the defense line", breached.len());
    }
    breached.len() as u32
}

/// Player rounds against enemy effective hitboxes. A shielded boss
/// ignores the hit and the round flies on.
pub fn user_projectiles_vs_enemies(registry: &mut Registry) -> u32 {
    let projectiles = hitboxes(registry, Category::UserProjectile);
    let enemies = hitboxes(registry, Category::Enemy);
    let mut hits = 0;

    for projectile in &projectiles {
        for enemy in &enemies {
            if !projectile.raw.intersects(&enemy.effective) || enemy.shielded {
                continue;
            }
            hit(registry, projectile.entity);
            hit(registry, enemy.entity);
            hits += 1;
        }
    }
    hits
}

/// Hostile rounds against friendly raw bounds.
pub fn enemy_projectiles_vs_friendlies(
    registry: &mut Registry,
    feedback: &mut Vec<FeedbackEvent>,
) -> u32 {
    let projectiles = hitboxes(registry, Category::EnemyProjectile);
    let friendlies = hitboxes(registry, Category::Friendly);
    let mut hits = 0;

    for projectile in &projectiles {
        for unit in &friendlies {
            if !projectile.raw.intersects(&unit.raw) {
                continue;
            }
            hit(registry, unit.entity);
            if let Some(actor) = registry.actor_mut(projectile.entity) {
                damage::destroy(actor);
            }
            signal_damage(feedback);
            hits += 1;
        }
    }
    hits
}

/// Friendly planes ramming enemies: both sides take one damage unit.
pub fn planes_vs_planes(registry: &mut Registry, feedback: &mut Vec<FeedbackEvent>) -> u32 {
    let friendlies = hitboxes(registry, Category::Friendly);
    let enemies = hitboxes(registry, Category::Enemy);
    let mut collisions = 0;

    for unit in &friendlies {
        for enemy in &enemies {
            if !unit.raw.intersects(&enemy.raw) {
                continue;
            }
            hit(registry, unit.entity);
            hit(registry, enemy.entity);
            signal_damage(feedback);
            collisions += 1;
        }
    }
    collisions
}

/// Power-ups touching a friendly plane apply their effect and vanish.
pub fn power_ups_vs_friendlies(registry: &mut Registry) -> u32 {
    let power_ups = hitboxes(registry, Category::PowerUp);
    let friendlies = hitboxes(registry, Category::Friendly);
    let mut collected = 0;

    for power_up in &power_ups {
        let Some(effect) = power_up.power_up else {
            continue;
        };
        for unit in &friendlies {
            if !power_up.raw.intersects(&unit.raw) {
                continue;
            }
            if let Some(actor) = registry.actor_mut(unit.entity) {
                damage::apply_power_up(actor, effect);
            }
            if let Some(actor) = registry.actor_mut(power_up.entity) {
                damage::destroy(actor);
            }
            log::debug!("Power-up {effect:?} collected by {:?}", unit.entity);
            collected += 1;
        }
    }
    collected
}
