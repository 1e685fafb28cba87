//! World registry for entities
//!
//! The World owns every entity of a run in one flat collection keyed by
//! generational [`EntityKey`]s.

use runner_math::Vec2;
use slotmap::{new_key_type, SlotMap};

use crate::entity::{Entity, EntityKind, EntitySnapshot};

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Keys of destroyed entities never resolve again, even after their
    /// slot is reused.
    pub struct EntityKey;
}

/// The runner world containing all entities
#[derive(Default)]
pub struct World {
    /// All entities in the world
    entities: SlotMap<EntityKey, Entity>,
    /// The unique player entity, once created
    player: Option<EntityKey>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the world, returning its key
    ///
    /// There is only ever one player; creating a second is a programming error.
    pub fn create_entity(&mut self, kind: EntityKind, position: Vec2, size: Vec2) -> EntityKey {
        debug_assert!(
            kind != EntityKind::Player || self.player.is_none(),
            "world already has a player"
        );

        let key = self.entities.insert(Entity::new(kind, position, size));
        if kind == EntityKind::Player {
            self.player = Some(key);
        }
        key
    }

    /// Remove an entity, returning it with `active` cleared
    ///
    /// Idempotent: destroying a missing or already-destroyed key returns None.
    pub fn destroy_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let mut entity = self.entities.remove(key)?;
        entity.active = false;
        if self.player == Some(key) {
            self.player = None;
        }
        Some(entity)
    }

    /// Visit every active entity of the given kind
    pub fn for_each_active<F>(&self, kind: EntityKind, mut f: F)
    where
        F: FnMut(EntityKey, &Entity),
    {
        for (key, entity) in &self.entities {
            if entity.active && entity.kind == kind {
                f(key, entity);
            }
        }
    }

    /// Visit every active entity of the given kind mutably
    pub fn for_each_active_mut<F>(&mut self, kind: EntityKind, mut f: F)
    where
        F: FnMut(EntityKey, &mut Entity),
    {
        for (key, entity) in &mut self.entities {
            if entity.active && entity.kind == kind {
                f(key, entity);
            }
        }
    }

    /// Get a reference to an entity by key
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    /// Key of the player entity
    pub fn player(&self) -> Option<EntityKey> {
        self.player
    }

    /// Get the number of entities
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of active entities of one kind
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities
            .values()
            .filter(|e| e.active && e.kind == kind)
            .count()
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Drawable state of every active entity
    pub fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.entities
            .iter()
            .filter(|(_, e)| e.active)
            .map(|(key, e)| e.snapshot(key))
            .collect()
    }

    /// Remove every entity, including the player
    pub fn clear(&mut self) {
        self.entities.clear();
        self.player = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> Vec2 {
        Vec2::new(10.0, 10.0)
    }

    #[test]
    fn test_world_new() {
        let world = World::new();
        assert!(world.is_empty());
        assert_eq!(world.len(), 0);
        assert!(world.player().is_none());
    }

    #[test]
    fn test_create_entity() {
        let mut world = World::new();
        let key = world.create_entity(EntityKind::Obstacle, Vec2::new(5.0, 30.0), size());

        let entity = world.get(key).unwrap();
        assert_eq!(entity.kind, EntityKind::Obstacle);
        assert_eq!(entity.position, Vec2::new(5.0, 30.0));
        assert!(entity.active);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_player_is_tracked() {
        let mut world = World::new();
        world.create_entity(EntityKind::Ground, Vec2::ZERO, size());
        let player = world.create_entity(EntityKind::Player, Vec2::ZERO, size());

        assert_eq!(world.player(), Some(player));
    }

    #[test]
    #[should_panic(expected = "already has a player")]
    #[cfg(debug_assertions)]
    fn test_second_player_panics_in_debug() {
        let mut world = World::new();
        world.create_entity(EntityKind::Player, Vec2::ZERO, size());
        world.create_entity(EntityKind::Player, Vec2::ZERO, size());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut world = World::new();
        let key = world.create_entity(EntityKind::Prize, Vec2::ZERO, size());

        let removed = world.destroy_entity(key).unwrap();
        assert!(!removed.active);
        assert!(world.destroy_entity(key).is_none());
        assert!(!world.contains(key));
        assert!(world.get(key).is_none());
    }

    #[test]
    fn test_stale_key_after_slot_reuse() {
        let mut world = World::new();
        let old = world.create_entity(EntityKind::Prize, Vec2::ZERO, size());
        world.destroy_entity(old);
        let new = world.create_entity(EntityKind::Obstacle, Vec2::ZERO, size());

        assert_ne!(old, new);
        assert!(world.get(old).is_none());
        assert!(world.destroy_entity(old).is_none());
        assert!(world.contains(new));
    }

    #[test]
    fn test_destroyed_entity_excluded_from_queries() {
        let mut world = World::new();
        let a = world.create_entity(EntityKind::Obstacle, Vec2::ZERO, size());
        let b = world.create_entity(EntityKind::Obstacle, Vec2::new(50.0, 0.0), size());
        world.destroy_entity(a);

        let mut seen = Vec::new();
        world.for_each_active(EntityKind::Obstacle, |key, _| seen.push(key));
        assert_eq!(seen, vec![b]);
        assert_eq!(world.count_of(EntityKind::Obstacle), 1);
        assert_eq!(world.snapshots().len(), 1);
    }

    #[test]
    fn test_for_each_active_filters_kind() {
        let mut world = World::new();
        world.create_entity(EntityKind::Obstacle, Vec2::ZERO, size());
        world.create_entity(EntityKind::Prize, Vec2::ZERO, size());
        world.create_entity(EntityKind::Prize, Vec2::ZERO, size());

        let mut prizes = 0;
        world.for_each_active(EntityKind::Prize, |_, e| {
            assert_eq!(e.kind, EntityKind::Prize);
            prizes += 1;
        });
        assert_eq!(prizes, 2);
    }

    #[test]
    fn test_for_each_active_mut() {
        let mut world = World::new();
        let key = world.create_entity(EntityKind::Obstacle, Vec2::new(10.0, 0.0), size());

        world.for_each_active_mut(EntityKind::Obstacle, |_, e| e.position.x -= 4.0);

        assert_eq!(world.get(key).unwrap().position.x, 6.0);
    }

    #[test]
    fn test_clear_removes_player() {
        let mut world = World::new();
        world.create_entity(EntityKind::Player, Vec2::ZERO, size());
        world.create_entity(EntityKind::Ground, Vec2::ZERO, size());

        world.clear();
        assert!(world.is_empty());
        assert!(world.player().is_none());

        // A new run can create its player again
        world.create_entity(EntityKind::Player, Vec2::ZERO, size());
        assert!(world.player().is_some());
    }
}
