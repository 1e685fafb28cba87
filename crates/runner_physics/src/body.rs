//! Rigid body types for 2D physics simulation

use crate::shapes::Aabb2D;
use runner_math::Vec2;
use slotmap::new_key_type;

// Define generational key type for rigid bodies
new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing: once a body is removed, old keys return
    /// None even if the slot is reused by a later body.
    pub struct BodyKey;
}

/// How a body participates in the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyType {
    /// Integrated every step, affected by gravity and pushed out of colliders
    Dynamic,
    /// Moved only by its velocity or by explicit repositioning, never pushed
    Kinematic,
    /// Never moves
    Static,
}

/// A rectangular rigid body
///
/// `position` is the bottom-left corner of the collider. The tag is opaque
/// user data handed back to the [`PairFilter`](crate::PairFilter) and in
/// contact events.
#[derive(Clone, Debug)]
pub struct RigidBody2D<T> {
    /// Bottom-left corner in world coordinates
    pub position: Vec2,
    /// Velocity (units per second)
    pub velocity: Vec2,
    /// Mass of the body (impulses are divided by it)
    pub mass: f32,
    /// Coefficient of restitution (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
    /// Whether this body is affected by gravity
    pub affected_by_gravity: bool,
    /// Simulation role
    pub body_type: BodyType,
    /// The collision box (stores absolute world position)
    pub collider: Aabb2D,
    /// Caller data identifying the body
    pub tag: T,
}

impl<T> RigidBody2D<T> {
    /// Create a dynamic body affected by gravity
    pub fn new_dynamic(position: Vec2, size: Vec2, tag: T) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mass: 1.0,
            restitution: 0.0,
            affected_by_gravity: true,
            body_type: BodyType::Dynamic,
            collider: Aabb2D::from_min_size(position, size),
            tag,
        }
    }

    /// Create a kinematic body that ignores gravity
    pub fn new_kinematic(position: Vec2, size: Vec2, tag: T) -> Self {
        Self {
            affected_by_gravity: false,
            body_type: BodyType::Kinematic,
            ..Self::new_dynamic(position, size, tag)
        }
    }

    /// Create a static body that doesn't move
    pub fn new_static(position: Vec2, size: Vec2, tag: T) -> Self {
        Self {
            affected_by_gravity: false,
            body_type: BodyType::Static,
            ..Self::new_dynamic(position, size, tag)
        }
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the restitution (bounciness) of this body
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Set whether this body is affected by gravity
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Size of the collider
    pub fn size(&self) -> Vec2 {
        self.collider.size()
    }

    /// Update the position and sync the collider
    pub fn set_position(&mut self, position: Vec2) {
        let delta = position - self.position;
        self.position = position;
        self.collider = self.collider.translated(delta);
    }

    /// Apply a positional correction (e.g., from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec2) {
        self.position += correction;
        self.collider = self.collider.translated(correction);
    }

    /// Apply an instantaneous impulse (change in momentum)
    ///
    /// Static bodies and bodies without positive mass ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.is_static() || self.mass <= 0.0 {
            return;
        }
        self.velocity += impulse / self.mass;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dynamic_body() {
        let pos = Vec2::new(1.0, 2.0);
        let body = RigidBody2D::new_dynamic(pos, Vec2::new(2.0, 3.0), ());

        assert_eq!(body.position, pos);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.mass, 1.0);
        assert_eq!(body.restitution, 0.0);
        assert!(body.affected_by_gravity);
        assert!(body.is_dynamic());

        // Check collider is properly set
        assert_eq!(body.collider.min, pos);
        assert_eq!(body.size(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_kinematic_and_static_ignore_gravity() {
        let kinematic = RigidBody2D::new_kinematic(Vec2::ZERO, Vec2::new(1.0, 1.0), ());
        let fixed = RigidBody2D::new_static(Vec2::ZERO, Vec2::new(1.0, 1.0), ());

        assert_eq!(kinematic.body_type, BodyType::Kinematic);
        assert!(!kinematic.affected_by_gravity);
        assert!(fixed.is_static());
        assert!(!fixed.affected_by_gravity);
    }

    #[test]
    fn test_builder_methods() {
        let body = RigidBody2D::new_dynamic(Vec2::ZERO, Vec2::new(1.0, 1.0), 7u32)
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_mass(5.0)
            .with_restitution(0.8)
            .with_gravity(false);

        assert_eq!(body.velocity, Vec2::new(1.0, 2.0));
        assert_eq!(body.mass, 5.0);
        assert_eq!(body.restitution, 0.8);
        assert!(!body.affected_by_gravity);
        assert_eq!(body.tag, 7);
    }

    #[test]
    fn test_restitution_clamping() {
        let body = RigidBody2D::new_dynamic(Vec2::ZERO, Vec2::new(1.0, 1.0), ()).with_restitution(1.5);
        assert_eq!(body.restitution, 1.0);

        let body = RigidBody2D::new_dynamic(Vec2::ZERO, Vec2::new(1.0, 1.0), ()).with_restitution(-0.5);
        assert_eq!(body.restitution, 0.0);
    }

    #[test]
    fn test_set_position() {
        let mut body = RigidBody2D::new_kinematic(Vec2::ZERO, Vec2::new(1.0, 1.0), ());
        body.set_position(Vec2::new(5.0, 10.0));

        assert_eq!(body.position, Vec2::new(5.0, 10.0));
        assert_eq!(body.collider.min, Vec2::new(5.0, 10.0));
        assert_eq!(body.collider.max, Vec2::new(6.0, 11.0));
    }

    #[test]
    fn test_apply_correction() {
        let mut body = RigidBody2D::new_dynamic(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), ());
        body.apply_correction(Vec2::new(0.0, 0.5));

        assert_eq!(body.position, Vec2::new(1.0, 0.5));
        assert_eq!(body.collider.min, Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_impulse_scales_with_mass() {
        let mut body = RigidBody2D::new_dynamic(Vec2::ZERO, Vec2::new(1.0, 1.0), ()).with_mass(2.0);
        body.apply_impulse(Vec2::new(0.0, 600.0));
        assert_eq!(body.velocity, Vec2::new(0.0, 300.0));
    }

    #[test]
    fn test_static_body_ignores_impulse() {
        let mut body = RigidBody2D::new_static(Vec2::ZERO, Vec2::new(1.0, 1.0), ());
        body.apply_impulse(Vec2::new(0.0, 600.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}
