//! Input handling module
//!
//! Produces game input events for the headless host.

mod autopilot;

pub use autopilot::Autopilot;
