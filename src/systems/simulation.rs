//! Frame clock for the headless host
//!
//! Produces the monotonic timestamps handed to `GameLoop::tick`:
//! - Fixed frame duration from the configured frame rate
//! - Optional real-time pacing (sleeps until each frame is due)

use std::time::{Duration, Instant};

use crate::config::SimulationConfig;

/// Fixed-rate simulation clock
///
/// Time is derived from the frame counter, never from the wall clock, so a
/// run is reproducible whether or not it is paced.
pub struct SimulationSystem {
    fps: f64,
    frame: u64,
    real_time: bool,
    started: Instant,
}

impl SimulationSystem {
    /// Create a clock ticking `fps` times per simulated second
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            frame: 0,
            real_time: false,
            started: Instant::now(),
        }
    }

    /// Create a clock from the simulation config
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.fps).with_real_time(config.real_time)
    }

    /// Sleep so frames are emitted at wall-clock rate
    pub fn with_real_time(mut self, real_time: bool) -> Self {
        self.real_time = real_time;
        self
    }

    /// Duration of one frame in seconds
    pub fn frame_duration(&self) -> f64 {
        1.0 / self.fps
    }

    /// Frames emitted so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time of the next frame
    pub fn now(&self) -> f64 {
        self.frame as f64 / self.fps
    }

    /// Emit the next frame's timestamp
    ///
    /// The first frame is at t = 0.
    pub fn advance(&mut self) -> f64 {
        let now = self.now();
        if self.real_time {
            let due = self.started + Duration::from_secs_f64(now);
            let wait = due.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }
        self.frame += 1;
        now
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_follow_frame_rate() {
        let mut clock = SimulationSystem::new(50.0);

        assert_eq!(clock.advance(), 0.0);
        assert_eq!(clock.advance(), 0.02);
        assert_eq!(clock.frame(), 2);
        assert!((clock.now() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_default_construction() {
        let clock = SimulationSystem::default();
        assert_eq!(clock.frame(), 0);
        assert!((clock.frame_duration() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_real_time_pacing_waits() {
        let mut clock = SimulationSystem::new(100.0).with_real_time(true);
        let start = Instant::now();

        for _ in 0..6 {
            clock.advance();
        }

        // Frame 5 is due 50 ms after the clock was created
        assert!(start.elapsed() >= Duration::from_millis(45));
    }
}
