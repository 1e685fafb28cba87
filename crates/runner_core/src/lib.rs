//! Core types for Bunny Run
//!
//! This crate provides the per-frame game loop of the runner:
//!
//! - [`Entity`] / [`EntityKind`] - Player, Obstacle, Prize and Ground records
//! - [`World`] - Registry of all entities, keyed by [`EntityKey`]
//! - [`SpawnScheduler`] - Timed, jittered creation of obstacles and prizes
//! - [`MotionSystem`] - Scrolls transient entities left and prunes them
//! - [`classify`] - Maps a contacting pair to a [`GameEvent`]
//! - [`InputLock`] - Gates jump input until the player lands
//! - [`Physics`] / [`Renderer`] - Collaborators injected into the loop
//! - [`ArcadePhysics`] - [`Physics`] backed by `runner_physics`
//! - [`GameLoop`] - Orchestrates one frame

mod arcade;
mod backend;
mod classify;
mod config;
mod entity;
mod game_loop;
mod input;
mod motion;
mod spawn;
mod world;

pub use arcade::{ArcadePhysics, BodyTag};
pub use backend::{ContactPair, Physics, Renderer};
pub use classify::{classify, classify_kinds, should_physically_collide, should_report_contact, GameEvent};
pub use config::GameConfig;
pub use entity::{Entity, EntityKind, EntitySnapshot};
pub use game_loop::{GameLoop, RunPhase, TickReport};
pub use input::{InputEvent, InputLock};
pub use motion::{MotionMode, MotionSystem};
pub use spawn::{SpawnCommand, SpawnConfig, SpawnRule, SpawnScheduler, SpawnState};
pub use world::{EntityKey, World};

// Re-export commonly used types for convenient access through runner_core
pub use runner_math::Vec2;
pub use runner_physics::PhysicsConfig;
