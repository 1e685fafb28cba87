//! [`Physics`] implementation backed by `runner_physics`
//!
//! Bodies are tagged with their entity key and kind; the kind-level
//! predicates in [`classify`](crate::classify) decide which pairs are solid
//! and which report contact.

use runner_math::Vec2;
use runner_physics::{BodyKey, PairFilter, PhysicsConfig, PhysicsWorld, RigidBody2D};
use slotmap::SecondaryMap;

use crate::backend::{ContactPair, Physics};
use crate::classify::{should_physically_collide, should_report_contact};
use crate::entity::{Entity, EntityKind};
use crate::world::EntityKey;

/// User data stored on every body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyTag {
    pub entity: EntityKey,
    pub kind: EntityKind,
}

/// Routes the physics world's pair questions to the kind predicates
struct KindFilter;

impl PairFilter<BodyTag> for KindFilter {
    fn should_collide(&self, a: &BodyTag, b: &BodyTag) -> bool {
        should_physically_collide(a.kind, b.kind)
    }

    fn should_report(&self, a: &BodyTag, b: &BodyTag) -> bool {
        should_report_contact(a.kind, b.kind)
    }
}

/// Arcade-style rectangle physics
///
/// - Player: dynamic body with gravity and the configured mass
/// - Ground: static body
/// - Obstacle / Prize: kinematic bodies without gravity, placed by the game loop
pub struct ArcadePhysics {
    world: PhysicsWorld<BodyTag>,
    bodies: SecondaryMap<EntityKey, BodyKey>,
    player_mass: f32,
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl ArcadePhysics {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            world: PhysicsWorld::with_config(config),
            bodies: SecondaryMap::new(),
            player_mass: 1.0,
        }
    }

    /// Set the mass given to the player body
    pub fn with_player_mass(mut self, mass: f32) -> Self {
        self.player_mass = mass;
        self
    }

    /// The body simulating an entity
    pub fn body(&self, key: EntityKey) -> Option<&RigidBody2D<BodyTag>> {
        self.bodies.get(key).and_then(|&body| self.world.get_body(body))
    }

    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Whether two entities were touching after the last step
    pub fn is_touching(&self, a: EntityKey, b: EntityKey) -> bool {
        match (self.bodies.get(a), self.bodies.get(b)) {
            (Some(&a), Some(&b)) => self.world.is_touching(a, b),
            _ => false,
        }
    }
}

impl Physics for ArcadePhysics {
    fn insert(&mut self, key: EntityKey, entity: &Entity) {
        let tag = BodyTag {
            entity: key,
            kind: entity.kind,
        };
        let body = match entity.kind {
            EntityKind::Player => {
                RigidBody2D::new_dynamic(entity.position, entity.size, tag).with_mass(self.player_mass)
            }
            EntityKind::Ground => RigidBody2D::new_static(entity.position, entity.size, tag),
            EntityKind::Obstacle | EntityKind::Prize => {
                RigidBody2D::new_kinematic(entity.position, entity.size, tag)
            }
        };

        let body_key = self.world.add_body(body);
        if let Some(previous) = self.bodies.insert(key, body_key) {
            self.world.remove_body(previous);
        }
    }

    fn remove(&mut self, key: EntityKey) {
        if let Some(body) = self.bodies.remove(key) {
            self.world.remove_body(body);
        }
    }

    fn set_position(&mut self, key: EntityKey, position: Vec2) {
        if let Some(&body) = self.bodies.get(key) {
            self.world.set_position(body, position);
        }
    }

    fn position(&self, key: EntityKey) -> Option<Vec2> {
        self.body(key).map(|body| body.position)
    }

    fn apply_impulse(&mut self, key: EntityKey, impulse: Vec2) {
        if let Some(&body) = self.bodies.get(key) {
            self.world.apply_impulse(body, impulse);
        }
    }

    fn step(&mut self, dt: f32) -> Vec<ContactPair> {
        let began = self.world.step(dt, &KindFilter);
        began
            .into_iter()
            .filter_map(|event| {
                let a = self.world.get_body(event.a)?.tag.entity;
                let b = self.world.get_body(event.b)?.tag.entity;
                Some(ContactPair::new(a, b))
            })
            .collect()
    }

    fn clear(&mut self) {
        self.world.clear();
        self.bodies.clear();
    }
}
