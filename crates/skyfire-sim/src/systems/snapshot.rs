//! Snapshot system: projects registry and director state into a `HudSnapshot`.
//!
//! Read-only over the registry.

use hecs::Entity;

use skyfire_core::components::ActorKind;
use skyfire_core::enums::{Category, GameState, LevelId};
use skyfire_core::events::{FeedbackEvent, LevelEvent};
use skyfire_core::state::{BossView, HudSnapshot};
use skyfire_core::types::SimTime;

use crate::registry::Registry;
use crate::systems::damage::is_shielded;

/// Director-side counters that go into the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub time: SimTime,
    pub level: LevelId,
    pub state: GameState,
    pub kills: u32,
    pub kill_target: Option<u32>,
}

pub fn build_snapshot(
    registry: &Registry,
    player: Option<Entity>,
    progress: Progress,
    feedback: Vec<FeedbackEvent>,
    level_events: Vec<LevelEvent>,
) -> HudSnapshot {
    let (player_health, player_max_health) = player
        .and_then(|e| registry.actor(e).map(|a| (a.health.max(0), a.max_health)))
        .unwrap_or((0, 0));

    HudSnapshot {
        time: progress.time,
        level: progress.level,
        state: progress.state,
        kills: progress.kills,
        kill_target: progress.kill_target,
        player_health,
        player_max_health,
        boss: build_boss(registry),
        live_enemies: registry.live_count(Category::Enemy),
        feedback,
        level_events,
    }
}

/// First boss in the enemy list, if any.
fn build_boss(registry: &Registry) -> Option<BossView> {
    registry
        .entities(Category::Enemy)
        .into_iter()
        .find_map(|entity| {
            let actor = registry.actor(entity)?;
            let ActorKind::Boss(_) = actor.kind else {
                return None;
            };
            Some(BossView {
                health: actor.health.max(0),
                max_health: actor.max_health,
                shielded: is_shielded(&actor),
            })
        })
}
