//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in screen space (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

/// Placement and extent of an actor.
///
/// The world position is `anchor + displacement`: the anchor is fixed at
/// spawn, the displacement accumulates the per-tick motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub anchor: Vec2,
    pub displacement: Vec2,
    pub size: Vec2,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each dispatched tick).
    pub tick: u64,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap test; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Shrink by `padding` on every side. Collapses to the center point
    /// rather than inverting when the padding exceeds half the extent.
    pub fn shrink(&self, padding: f32) -> Aabb {
        let center = (self.min + self.max) * 0.5;
        let min = (self.min + Vec2::splat(padding)).min(center);
        let max = (self.max - Vec2::splat(padding)).max(center);
        Aabb { min, max }
    }
}

impl Body {
    pub fn new(anchor: Vec2, size: Vec2) -> Self {
        Self {
            anchor,
            displacement: Vec2::ZERO,
            size,
        }
    }

    /// Current top-left corner in screen space.
    pub fn position(&self) -> Vec2 {
        self.anchor + self.displacement
    }

    /// Raw collision bounds.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.position(), self.size)
    }

    /// Center of the body, used as the muzzle reference for projectiles.
    pub fn center(&self) -> Vec2 {
        self.position() + self.size * 0.5
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
