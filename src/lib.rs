//! Bunny Run - headless endless runner
//!
//! Library half of the `bunny_run` binary: configuration loading, the frame
//! clock, the autopilot and the log renderer that host `runner_core`'s game
//! loop.

pub mod app;
pub mod config;
pub mod input;
pub mod systems;

pub use app::{App, SessionSummary};
pub use config::{AppConfig, ConfigError};
