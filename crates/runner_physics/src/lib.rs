//! 2D Physics simulation for Bunny Run
//!
//! This crate provides a small rectangle-only physics world, including:
//! - Axis-aligned collision shapes
//! - Collision detection and resolution
//! - Static, kinematic and dynamic bodies with gravity and impulses
//! - Began-contact reporting filtered by a caller-supplied [`PairFilter`]

pub mod body;
pub mod collision;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBody2D};
pub use collision::{aabb_vs_aabb, AcceptAll, Contact, PairFilter};
pub use shapes::Aabb2D;
pub use world::{ContactEvent, PhysicsConfig, PhysicsWorld};
