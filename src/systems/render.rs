//! Log-based rendering system
//!
//! The headless host has no window; frames are summarized to the log and
//! collected prizes and deaths are tallied for the end-of-session report.

use runner_core::{EntityKind, EntitySnapshot, GameEvent, Renderer};

/// Renders by writing to the `log` facade
#[derive(Debug, Default)]
pub struct LogRenderer {
    /// Frames between summaries; 0 disables them
    summary_interval: u64,
    frames: u64,
    run_prizes: u32,
    total_prizes: u32,
    deaths: u32,
}

impl LogRenderer {
    pub fn new(summary_interval: u64) -> Self {
        Self {
            summary_interval,
            ..Self::default()
        }
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Prizes collected in the current run
    pub fn run_prizes(&self) -> u32 {
        self.run_prizes
    }

    /// Prizes collected across all runs
    pub fn total_prizes(&self) -> u32 {
        self.total_prizes
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, snapshots: &[EntitySnapshot]) {
        self.frames += 1;
        if self.summary_interval == 0 || self.frames % self.summary_interval != 0 {
            return;
        }

        let count = |kind: EntityKind| snapshots.iter().filter(|s| s.kind == kind).count();
        let player_y = snapshots
            .iter()
            .find(|s| s.kind == EntityKind::Player)
            .map(|s| s.position.y)
            .unwrap_or_default();

        log::debug!(
            "frame {}: {} obstacles, {} prizes on screen, player y={:.1}, {} collected",
            self.frames,
            count(EntityKind::Obstacle),
            count(EntityKind::Prize),
            player_y,
            self.run_prizes
        );
    }

    fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Landed => log::trace!("frame {}: landed", self.frames),
            GameEvent::LeveledUp => {
                self.run_prizes += 1;
                self.total_prizes += 1;
                log::debug!("{} prizes collected this run", self.run_prizes);
            }
            GameEvent::Died => {
                self.deaths += 1;
                log::debug!("run over after collecting {} prizes", self.run_prizes);
                self.run_prizes = 0;
            }
        }
    }
}
