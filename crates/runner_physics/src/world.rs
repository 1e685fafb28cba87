//! Physics world and simulation

use std::collections::HashSet;

use crate::body::{BodyKey, BodyType, RigidBody2D};
use crate::collision::{aabb_vs_aabb, Contact, PairFilter};
use runner_math::Vec2;
use slotmap::SlotMap;

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration (applied to Y-axis, negative = down)
    pub gravity: f32,
    /// Distance within which two boxes still count as touching
    pub contact_margin: f32,
    /// Largest time step a single `step` call will integrate
    pub max_step: f32,
    /// Longest slice integrated at once; longer steps are subdivided
    pub substep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            // 9.8 m/s² at 150 points per meter
            gravity: -1470.0,
            contact_margin: 0.05,
            max_step: 0.25,
            substep: 1.0 / 60.0,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }
}

/// A contact that started during the last step
#[derive(Clone, Copy, Debug)]
pub struct ContactEvent {
    pub a: BodyKey,
    pub b: BodyKey,
    /// Geometry of the contact, normal pointing from `b` toward `a`
    pub contact: Contact,
}

/// The physics world containing all rigid bodies
pub struct PhysicsWorld<T> {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody2D<T>>,
    /// Pairs that were touching at the end of the last step
    touching: HashSet<(BodyKey, BodyKey)>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl<T> Default for PhysicsWorld<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PhysicsWorld<T> {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            touching: HashSet::new(),
            config,
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody2D<T>) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    ///
    /// Any contact the body was part of is forgotten.
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody2D<T>> {
        let body = self.bodies.remove(key)?;
        self.touching.retain(|&(a, b)| a != key && b != key);
        Some(body)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody2D<T>> {
        self.bodies.get(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Move a body, keeping its collider in sync. Returns false for stale keys.
    pub fn set_position(&mut self, key: BodyKey, position: Vec2) -> bool {
        match self.bodies.get_mut(key) {
            Some(body) => {
                body.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Apply an impulse to a body. Returns false for stale keys.
    pub fn apply_impulse(&mut self, key: BodyKey, impulse: Vec2) -> bool {
        match self.bodies.get_mut(key) {
            Some(body) => {
                body.apply_impulse(impulse);
                true
            }
            None => false,
        }
    }

    /// Whether two bodies were touching at the end of the last step
    pub fn is_touching(&self, a: BodyKey, b: BodyKey) -> bool {
        self.touching.contains(&ordered(a, b))
    }

    /// Remove every body and forget all contacts
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.touching.clear();
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs, once per substep:
    /// 1. Gravity application and velocity integration
    /// 2. Collision resolution for pairs the filter lets collide
    ///
    /// followed by contact detection for pairs the filter lets report.
    ///
    /// Returns only the contacts that began this step; a pair that stays in
    /// contact is reported once.
    pub fn step<F: PairFilter<T>>(&mut self, dt: f32, filter: &F) -> Vec<ContactEvent> {
        let dt = dt.clamp(0.0, self.config.max_step);
        let substeps = if self.config.substep > 0.0 {
            ((dt / self.config.substep).ceil() as usize).max(1)
        } else {
            1
        };
        let h = dt / substeps as f32;

        for _ in 0..substeps {
            self.integrate(h);
            self.resolve_collisions(filter);
        }

        self.collect_began_contacts(filter)
    }

    fn integrate(&mut self, dt: f32) {
        for (_key, body) in &mut self.bodies {
            match body.body_type {
                BodyType::Static => continue,
                BodyType::Dynamic if body.affected_by_gravity => {
                    body.velocity.y += self.config.gravity * dt;
                }
                _ => {}
            }

            let displacement = body.velocity * dt;
            body.apply_correction(displacement);
        }
    }

    fn resolve_collisions<F: PairFilter<T>>(&mut self, filter: &F) {
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let (key_a, key_b) = (keys[i], keys[j]);

                let (contact, dynamic_a, dynamic_b) = {
                    let a = &self.bodies[key_a];
                    let b = &self.bodies[key_b];
                    if !a.is_dynamic() && !b.is_dynamic() {
                        continue;
                    }
                    if !filter.should_collide(&a.tag, &b.tag) {
                        continue;
                    }
                    match aabb_vs_aabb(&a.collider, &b.collider) {
                        Some(contact) if contact.is_colliding() => {
                            (contact, a.is_dynamic(), b.is_dynamic())
                        }
                        _ => continue,
                    }
                };

                // Split the correction by mass when both bodies can move
                let (share_a, share_b) = match (dynamic_a, dynamic_b) {
                    (true, true) => {
                        let mass_a = self.bodies[key_a].mass;
                        let mass_b = self.bodies[key_b].mass;
                        let total = mass_a + mass_b;
                        if total > 0.0 {
                            (mass_b / total, mass_a / total)
                        } else {
                            (0.5, 0.5)
                        }
                    }
                    (true, false) => (1.0, 0.0),
                    _ => (0.0, 1.0),
                };

                if dynamic_a {
                    push_out(&mut self.bodies[key_a], contact.normal, contact.penetration * share_a);
                }
                if dynamic_b {
                    push_out(&mut self.bodies[key_b], -contact.normal, contact.penetration * share_b);
                }
            }
        }
    }

    fn collect_began_contacts<F: PairFilter<T>>(&mut self, filter: &F) -> Vec<ContactEvent> {
        let keys: Vec<BodyKey> = self.bodies.keys().collect();
        let margin = self.config.contact_margin;
        let mut touching = HashSet::new();
        let mut began = Vec::new();

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let (key_a, key_b) = (keys[i], keys[j]);
                let a = &self.bodies[key_a];
                let b = &self.bodies[key_b];

                if a.is_static() && b.is_static() {
                    continue;
                }
                if !filter.should_report(&a.tag, &b.tag) {
                    continue;
                }

                // Solid pairs keep touching within the margin so a resting
                // body stays in contact; report-only pairs must overlap
                let contact = if filter.should_collide(&a.tag, &b.tag) {
                    aabb_vs_aabb(&a.collider.expanded(margin), &b.collider)
                } else {
                    aabb_vs_aabb(&a.collider, &b.collider).filter(Contact::is_colliding)
                };

                if let Some(contact) = contact {
                    let pair = ordered(key_a, key_b);
                    if !self.touching.contains(&pair) {
                        log::trace!("contact began between {:?} and {:?}", key_a, key_b);
                        began.push(ContactEvent {
                            a: key_a,
                            b: key_b,
                            contact,
                        });
                    }
                    touching.insert(pair);
                }
            }
        }

        self.touching = touching;
        began
    }
}

/// Canonical ordering so a pair is stored once regardless of argument order
fn ordered(a: BodyKey, b: BodyKey) -> (BodyKey, BodyKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Move a body along `normal` and cancel the velocity component driving it in
fn push_out<T>(body: &mut RigidBody2D<T>, normal: Vec2, depth: f32) {
    body.apply_correction(normal * depth);

    let velocity_along_normal = body.velocity.dot(normal);
    if velocity_along_normal < 0.0 {
        body.velocity -= normal * velocity_along_normal * (1.0 + body.restitution);
    }
}
