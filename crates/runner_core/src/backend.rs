//! Collaborators the game loop is built on
//!
//! The loop never reaches for a global scene or physics world; the host
//! passes a [`Physics`] and a [`Renderer`] in at construction.

use runner_math::Vec2;

use crate::classify::GameEvent;
use crate::entity::{Entity, EntitySnapshot};
use crate::world::EntityKey;

/// Two entities whose bounds started touching during a physics step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactPair {
    pub a: EntityKey,
    pub b: EntityKey,
}

impl ContactPair {
    pub fn new(a: EntityKey, b: EntityKey) -> Self {
        Self { a, b }
    }
}

/// Rigid-body simulation and contact detection
///
/// Obstacles and prizes are positioned by the game loop through
/// [`set_position`](Physics::set_position); the player moves vertically under
/// the simulation's own gravity and impulses.
pub trait Physics {
    /// Start simulating an entity
    fn insert(&mut self, key: EntityKey, entity: &Entity);

    /// Stop simulating an entity. Unknown keys are ignored.
    fn remove(&mut self, key: EntityKey);

    /// Teleport an entity's body
    fn set_position(&mut self, key: EntityKey, position: Vec2);

    /// Current position of an entity's body
    fn position(&self, key: EntityKey) -> Option<Vec2>;

    /// Apply an instantaneous impulse to an entity's body
    fn apply_impulse(&mut self, key: EntityKey, impulse: Vec2);

    /// Advance the simulation by `dt` seconds, returning contacts that began
    fn step(&mut self, dt: f32) -> Vec<ContactPair>;

    /// Drop every body
    fn clear(&mut self);
}

/// Presentation of the game state
pub trait Renderer {
    /// Draw one frame from the active entities
    fn draw(&mut self, snapshots: &[EntitySnapshot]);

    /// React to a gameplay event (sound, flash, status text)
    fn on_event(&mut self, _event: GameEvent) {}
}
