//! Entity types
//!
//! An Entity is any rectangle the game tracks: the player, the ground, and
//! the obstacles and prizes scrolling past.

use runner_math::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::Key;

use crate::world::EntityKey;

/// What an entity is, which decides how it moves and what touching it means
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The bunny. Exactly one per run.
    Player,
    /// Scrolling hazard; touching it ends the run
    Obstacle,
    /// Scrolling bonus; touching it levels up
    Prize,
    /// Static full-width floor
    Ground,
}

impl EntityKind {
    /// Obstacles and prizes are created by the scheduler and scroll off-screen
    pub fn is_transient(self) -> bool {
        matches!(self, EntityKind::Obstacle | EntityKind::Prize)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Obstacle => "obstacle",
            EntityKind::Prize => "prize",
            EntityKind::Ground => "ground",
        }
    }
}

/// An entity in the runner world
///
/// `position` is the bottom-left corner, so the right edge is
/// `position.x + size.x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    /// Cleared when the entity is destroyed
    pub active: bool,
}

impl Entity {
    /// Create a new active entity
    pub fn new(kind: EntityKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            position,
            size,
            active: true,
        }
    }

    /// X coordinate of the right edge
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.position.x + self.size.x
    }

    /// Y coordinate of the top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Whether the entity has scrolled fully past the left edge of the screen
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.right_edge() <= 0.0
    }

    /// Copy of the drawable state, tagged with the entity's id
    pub fn snapshot(&self, key: EntityKey) -> EntitySnapshot {
        EntitySnapshot {
            id: key.data().as_ffi(),
            kind: self.kind,
            position: self.position,
            size: self.size,
            active: self.active,
        }
    }
}

/// Drawable state of one entity, handed to the renderer and host
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Stable id for the lifetime of the entity
    pub id: u64,
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    pub active: bool,
}
