//! Application systems
//!
//! Host-side pieces around the game loop: the frame clock and the renderer.

mod render;
mod simulation;

pub use render::LogRenderer;
pub use simulation::SimulationSystem;
