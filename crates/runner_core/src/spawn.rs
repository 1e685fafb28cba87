//! Spawn scheduling for obstacles and prizes
//!
//! Each kind has a target frequency. After a spawn the "last spawn" time is
//! pushed forward by a random jitter in `[0, frequency)`, so spawns are
//! staggered rather than periodic while the gap between two spawns of the
//! same kind stays within `[frequency, 2 × frequency)` (plus one tick of
//! granularity).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use runner_math::Vec2;

use crate::entity::EntityKind;

/// Default screen width the spawn positions are derived from
const DEFAULT_SCREEN_WIDTH: f32 = 800.0;

/// When and where one kind of transient entity is created
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRule {
    pub kind: EntityKind,
    /// Target interval between spawns (same units as tick time)
    pub frequency: f64,
    /// Randomize the next spawn time; when false spawns are strictly periodic
    pub jitter: bool,
    /// Where new entities appear (bottom-left corner)
    pub position: Vec2,
    pub size: Vec2,
}

impl SpawnRule {
    /// Obstacles enter just past the right edge of the screen, low
    pub fn obstacle(screen_width: f32) -> Self {
        let size = Vec2::new(30.0, 30.0);
        Self {
            kind: EntityKind::Obstacle,
            frequency: 2.0,
            jitter: true,
            position: Vec2::new(screen_width + size.x, 30.0),
            size,
        }
    }

    /// Prizes enter just past the right edge of the screen, a little higher
    pub fn prize(screen_width: f32) -> Self {
        let size = Vec2::new(25.0, 25.0);
        Self {
            kind: EntityKind::Prize,
            frequency: 5.0,
            jitter: true,
            position: Vec2::new(screen_width + size.x, 50.0),
            size,
        }
    }

    /// Same rule with jitter switched on or off
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Same rule with a different frequency
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }
}

/// Scheduler configuration
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnConfig {
    pub obstacle: SpawnRule,
    pub prize: SpawnRule,
    /// Seed for the jitter RNG; None draws a fresh seed
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self::for_screen(DEFAULT_SCREEN_WIDTH)
    }
}

impl SpawnConfig {
    /// Default rules for a screen of the given width
    pub fn for_screen(screen_width: f32) -> Self {
        Self {
            obstacle: SpawnRule::obstacle(screen_width),
            prize: SpawnRule::prize(screen_width),
            seed: None,
        }
    }
}

/// A request to create one entity, produced by [`SpawnScheduler::tick`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnCommand {
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
}

/// Last spawn time per kind; None until the first tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpawnState {
    pub last_obstacle_spawn: Option<f64>,
    pub last_prize_spawn: Option<f64>,
}

/// Decides when obstacles and prizes are created
pub struct SpawnScheduler {
    config: SpawnConfig,
    state: SpawnState,
    rng: Pcg32,
}

impl SpawnScheduler {
    /// Create a scheduler, seeding its RNG from the config or from entropy
    pub fn new(config: SpawnConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            state: SpawnState::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance to `now`, returning the entities to create
    ///
    /// The first call only records `now` as the last spawn time of every
    /// kind, so nothing spawns on the first tick.
    pub fn tick(&mut self, now: f64) -> Vec<SpawnCommand> {
        let mut commands = Vec::new();

        if let Some(command) = poll(
            &self.config.obstacle,
            &mut self.state.last_obstacle_spawn,
            now,
            &mut self.rng,
        ) {
            commands.push(command);
        }

        if let Some(command) = poll(
            &self.config.prize,
            &mut self.state.last_prize_spawn,
            now,
            &mut self.rng,
        ) {
            commands.push(command);
        }

        commands
    }

    /// Forget all spawn times; the next tick seeds them again
    pub fn reset(&mut self) {
        self.state = SpawnState::default();
    }

    pub fn state(&self) -> SpawnState {
        self.state
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }
}

fn poll(rule: &SpawnRule, last: &mut Option<f64>, now: f64, rng: &mut Pcg32) -> Option<SpawnCommand> {
    let previous = *last.get_or_insert(now);
    if now - previous <= rule.frequency {
        return None;
    }

    let jitter = if rule.jitter && rule.frequency > 0.0 {
        rng.gen_range(0.0..rule.frequency)
    } else {
        0.0
    };
    *last = Some(now + jitter);

    log::debug!(
        "spawning {} at t={:.3}, next window opens after t={:.3}",
        rule.kind.as_str(),
        now,
        now + jitter + rule.frequency
    );

    Some(SpawnCommand {
        kind: rule.kind,
        position: rule.position,
        size: rule.size,
    })
}
