//! Headless application
//!
//! Wires configuration, the frame clock, the autopilot and the log renderer
//! around a [`GameLoop`] running on [`ArcadePhysics`].

use runner_core::{ArcadePhysics, GameLoop, RunPhase, TickReport};

use crate::config::{AppConfig, ConfigError};
use crate::input::Autopilot;
use crate::systems::{LogRenderer, SimulationSystem};

/// Totals for a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub frames: u64,
    /// Simulated seconds
    pub elapsed: f64,
    /// Runs started, including the current one
    pub runs: u32,
    pub deaths: u32,
    /// Prizes picked up across all runs
    pub prizes_collected: u32,
}

/// Main application state
pub struct App {
    config: AppConfig,
    game: GameLoop<ArcadePhysics, LogRenderer>,
    clock: SimulationSystem,
    autopilot: Option<Autopilot>,
    runs: u32,
}

impl App {
    /// Build the application from a validated configuration
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let physics = ArcadePhysics::new(config.to_physics_config()).with_player_mass(config.player.mass);
        let renderer = LogRenderer::new(config.debug.summary_interval);
        let game = GameLoop::new(config.to_game_config(), physics, renderer);

        Ok(Self {
            clock: SimulationSystem::from_config(&config.simulation),
            autopilot: Autopilot::from_config(&config.autopilot),
            game,
            config,
            runs: 1,
        })
    }

    pub fn game(&self) -> &GameLoop<ArcadePhysics, LogRenderer> {
        &self.game
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run one frame: autopilot input, then the game tick
    ///
    /// A death starts a new run when `simulation.auto_restart` is set.
    pub fn step(&mut self) -> TickReport {
        let now = self.clock.advance();

        if let Some(event) = self.autopilot.and_then(|pilot| pilot.poll(self.game.world())) {
            self.game.on_input_event(event);
        }

        let report = self.game.tick(now);

        if report.died() && self.config.simulation.auto_restart {
            self.runs += 1;
            log::info!("Restarting (run {})", self.runs);
            self.game.initialize();
        }

        report
    }

    /// Run until `simulation.duration_seconds` of simulated time have
    /// passed, or until the player dies without auto-restart
    pub fn run(&mut self) -> SessionSummary {
        let duration = self.config.simulation.duration_seconds;
        log::info!(
            "Simulating {:.1}s at {} fps (autopilot {})",
            duration,
            self.config.simulation.fps,
            if self.autopilot.is_some() { "on" } else { "off" }
        );

        while self.clock.now() < duration {
            self.step();
            if self.game.phase() == RunPhase::Died {
                break;
            }
        }

        let summary = self.summary();
        log::info!(
            "Session over after {:.1}s: {} runs, {} deaths, {} prizes collected",
            summary.elapsed,
            summary.runs,
            summary.deaths,
            summary.prizes_collected
        );
        summary
    }

    pub fn summary(&self) -> SessionSummary {
        let renderer = self.game.renderer();
        SessionSummary {
            frames: self.clock.frame(),
            elapsed: self.clock.now(),
            runs: self.runs,
            deaths: renderer.deaths(),
            prizes_collected: renderer.total_prizes(),
        }
    }
}
