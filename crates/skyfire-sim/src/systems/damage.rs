//! Damage and power-up effects applied to a single actor.

use skyfire_core::components::{Actor, ActorKind};
use skyfire_core::enums::PowerUpEffect;

/// What a single hit did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// A shielded boss ignored the hit.
    Absorbed,
    /// Health dropped but the actor was already destroyed or is still alive.
    Damaged,
    /// The hit set the destroyed flag.
    Destroyed,
}

/// Whether the actor is a boss with its shield up.
pub fn is_shielded(actor: &Actor) -> bool {
    matches!(&actor.kind, ActorKind::Boss(boss) if boss.shield.active)
}

/// Apply one unit of damage.
///
/// Projectiles and power-ups are destroyed outright. Fighters lose one
/// health and are flagged destroyed the first time health reaches zero.
pub fn take_damage(actor: &mut Actor) -> DamageOutcome {
    if is_shielded(actor) {
        return DamageOutcome::Absorbed;
    }
    if matches!(actor.kind, ActorKind::Projectile(_) | ActorKind::PowerUp(_)) {
        actor.health = 0;
        return if destroy(actor) {
            DamageOutcome::Destroyed
        } else {
            DamageOutcome::Damaged
        };
    }

    actor.health -= 1;
    if actor.health <= 0 && destroy(actor) {
        DamageOutcome::Destroyed
    } else {
        DamageOutcome::Damaged
    }
}

/// Set the destroyed flag. Returns `true` only on the first call.
pub fn destroy(actor: &mut Actor) -> bool {
    if actor.destroyed {
        return false;
    }
    actor.destroyed = true;
    true
}

/// Apply a collected power-up to the actor that touched it.
pub fn apply_power_up(actor: &mut Actor, effect: PowerUpEffect) {
    if actor.destroyed {
        return;
    }
    match effect {
        PowerUpEffect::MultiShot => {
            if let ActorKind::Player(player) = &mut actor.kind {
                player.multishot_charges += 1;
            }
        }
        PowerUpEffect::Repair => {
            actor.health = (actor.health + 1).min(actor.max_health);
        }
    }
}
