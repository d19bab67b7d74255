//! Per-kind update step invoked through `Registry::update_all`.

use rand::Rng;

use skyfire_boss_ai::fsm::{self, BossTuning};
use skyfire_core::components::{Actor, ActorKind};
use skyfire_core::config::PlayField;
use skyfire_core::types::Body;

/// Advance one live actor by one tick.
pub fn update_actor<R: Rng + ?Sized>(
    actor: &mut Actor,
    field: &PlayField,
    tuning: &BossTuning,
    rng: &mut R,
) {
    match &mut actor.kind {
        ActorKind::Player(player) => {
            move_player(&mut actor.body, player.velocity.x, player.velocity.y, field);
        }
        ActorKind::BasicEnemy(enemy) => {
            actor.body.displacement.x += enemy.speed;
        }
        ActorKind::Boss(boss) => {
            fsm::step(boss, &mut actor.body, tuning, rng);
        }
        ActorKind::Projectile(projectile) => {
            actor.body.displacement += projectile.velocity;
            let bounds = actor.body.bounds();
            if bounds.max.x < 0.0 || bounds.min.x > field.width {
                actor.destroyed = true;
            }
        }
        ActorKind::PowerUp(power_up) => {
            actor.body.displacement.y += power_up.fall_speed;
            if actor.body.position().y > field.height {
                actor.destroyed = true;
            }
        }
    }
}

/// Move the player, rejecting each axis independently if it would leave the field.
pub fn move_player(body: &mut Body, dx: f32, dy: f32, field: &PlayField) {
    let before = body.displacement;
    body.displacement.x += dx;
    let x = body.position().x;
    if x < 0.0 || x + body.size.x > field.width {
        body.displacement.x = before.x;
    }

    body.displacement.y += dy;
    let y = body.position().y;
    if y < 0.0 || y + body.size.y > field.height {
        body.displacement.y = before.y;
    }
}
