//! Entity registry: the only owner of actors.
//!
//! Actors live in a hecs arena. Five ordered category lists record which
//! entities belong where, and a renderer receives attach/detach pushes in
//! lockstep with additions and cleanup. Destruction is a flag; entities are
//! despawned only in `cleanup`.

use std::collections::HashSet;

use hecs::{Entity, World};
use thiserror::Error;

use skyfire_core::components::Actor;
use skyfire_core::enums::Category;

/// Failure reported by the presentation layer when attaching an actor.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing asset `{0}`")]
    MissingAsset(String),
}

/// Display surface fed by the registry. The kernel only pushes, never queries.
pub trait Renderer {
    fn attach(&mut self, entity: Entity, actor: &Actor) -> Result<(), RenderError>;
    fn detach(&mut self, entity: Entity);
}

/// Renderer that draws nothing. Used by headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn attach(&mut self, _entity: Entity, _actor: &Actor) -> Result<(), RenderError> {
        Ok(())
    }

    fn detach(&mut self, _entity: Entity) {}
}

/// Number of entities purged per category by one cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    removed: [usize; Category::COUNT],
}

impl CleanupReport {
    pub fn removed(&self, category: Category) -> usize {
        self.removed[category.index()]
    }

    pub fn total(&self) -> usize {
        self.removed.iter().sum()
    }
}

pub struct Registry {
    world: World,
    categories: [Vec<Entity>; Category::COUNT],
    attached: HashSet<Entity>,
    renderer: Box<dyn Renderer>,
    despawn_buffer: Vec<Entity>,
}

impl Registry {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            world: World::new(),
            categories: Default::default(),
            attached: HashSet::new(),
            renderer,
            despawn_buffer: Vec::new(),
        }
    }

    /// Store a new actor in the arena and register it under `category`.
    pub fn spawn(&mut self, actor: Actor, category: Category) -> Entity {
        let entity = self.world.spawn((actor,));
        self.add(entity, category);
        entity
    }

    /// Register an arena entity under `category` and attach it to the renderer.
    ///
    /// No-op (returns `false`) when the entity is already listed in that
    /// category, already known to the renderer, or not in the arena.
    pub fn add(&mut self, entity: Entity, category: Category) -> bool {
        if self.categories[category.index()].contains(&entity) || self.attached.contains(&entity) {
            return false;
        }
        let Ok(actor) = self.world.get::<&Actor>(entity) else {
            log::warn!("Refusing to register {entity:?}: not in the arena");
            return false;
        };
        if let Err(e) = self.renderer.attach(entity, &actor) {
            // The presentation layer substitutes a placeholder; the actor still simulates.
            log::warn!("Renderer attach for {entity:?} failed: {e}");
        }
        drop(actor);
        self.attached.insert(entity);
        self.categories[category.index()].push(entity);
        true
    }

    /// Run `update` on every live actor, category by category in update order.
    pub fn update_all<F>(&mut self, mut update: F)
    where
        F: FnMut(Entity, &mut Actor),
    {
        for category in Category::ALL {
            for entity in self.entities(category) {
                if let Ok(actor) = self.world.query_one_mut::<&mut Actor>(entity) {
                    if !actor.destroyed {
                        update(entity, actor);
                    }
                }
            }
        }
    }

    /// Purge every destroyed actor from its category list, the renderer and
    /// the arena. Survivors keep their relative order.
    pub fn cleanup(&mut self) -> CleanupReport {
        let mut report = CleanupReport::default();
        self.despawn_buffer.clear();

        for category in Category::ALL {
            let world = &self.world;
            let buffer = &mut self.despawn_buffer;
            let before = buffer.len();
            self.categories[category.index()].retain(|&entity| {
                let destroyed = world
                    .get::<&Actor>(entity)
                    .map(|actor| actor.destroyed)
                    .unwrap_or(true);
                if destroyed {
                    buffer.push(entity);
                }
                !destroyed
            });
            report.removed[category.index()] = buffer.len() - before;
        }

        for entity in self.despawn_buffer.drain(..) {
            if self.attached.remove(&entity) {
                self.renderer.detach(entity);
            }
            if let Err(e) = self.world.despawn(entity) {
                log::warn!("Despawn of {entity:?} failed: {e}");
            }
        }

        report
    }

    /// Copy of the entities currently listed under `category`.
    pub fn entities(&self, category: Category) -> Vec<Entity> {
        self.categories[category.index()].clone()
    }

    /// Number of entities listed under `category`, destroyed ones included.
    pub fn count(&self, category: Category) -> usize {
        self.categories[category.index()].len()
    }

    /// Number of entities under `category` whose destroyed flag is clear.
    pub fn live_count(&self, category: Category) -> usize {
        self.categories[category.index()]
            .iter()
            .filter(|&&e| self.actor(e).is_some_and(|a| !a.destroyed))
            .count()
    }

    pub fn actor(&self, entity: Entity) -> Option<hecs::Ref<'_, Actor>> {
        self.world.get::<&Actor>(entity).ok()
    }

    pub fn actor_mut(&mut self, entity: Entity) -> Option<&mut Actor> {
        self.world.query_one_mut::<&mut Actor>(entity).ok()
    }

    /// Whether the entity is still in the arena (not yet purged).
    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn category_of(&self, entity: Entity) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.categories[c.index()].contains(&entity))
    }

    pub fn is_attached(&self, entity: Entity) -> bool {
        self.attached.contains(&entity)
    }

    /// Total number of actors in the arena.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}
