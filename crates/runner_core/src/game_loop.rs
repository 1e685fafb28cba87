//! Per-frame orchestration of a run
//!
//! [`GameLoop::tick`] runs one frame in a fixed order:
//!
//! 1. Scroll obstacles and prizes, pruning the ones that left the screen
//! 2. Spawn new obstacles and prizes that are due
//! 3. Step physics and turn began-contacts into [`GameEvent`]s
//! 4. Apply the events (unlock input, collect prizes, end the run)
//! 5. Hand the active entities and events to the renderer

use runner_math::Vec2;

use crate::backend::{Physics, Renderer};
use crate::classify::{classify_kinds, GameEvent};
use crate::config::GameConfig;
use crate::entity::{EntityKind, EntitySnapshot};
use crate::input::{InputEvent, InputLock};
use crate::motion::MotionSystem;
use crate::spawn::SpawnScheduler;
use crate::world::{EntityKey, World};

/// Where a run is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Initialized; the first tick starts the run
    AwaitingStart,
    Running,
    /// The player hit an obstacle. Terminal until [`GameLoop::initialize`].
    Died,
}

/// What happened during one tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Events in the order they were applied
    pub events: Vec<GameEvent>,
    pub spawned: Vec<EntitySnapshot>,
    /// Pruned obstacles and prizes plus collected prizes
    pub destroyed: Vec<EntitySnapshot>,
}

impl TickReport {
    pub fn died(&self) -> bool {
        self.events.contains(&GameEvent::Died)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.spawned.is_empty() && self.destroyed.is_empty()
    }
}

/// The game loop
///
/// Owns the entity registry and spawn state; physics and rendering are
/// injected so hosts and tests can substitute their own.
pub struct GameLoop<P, R> {
    config: GameConfig,
    world: World,
    scheduler: SpawnScheduler,
    motion: MotionSystem,
    input: InputLock,
    phase: RunPhase,
    last_time: Option<f64>,
    player: EntityKey,
    ground: EntityKey,
    physics: P,
    renderer: R,
}

impl<P: Physics, R: Renderer> GameLoop<P, R> {
    /// Create a loop and initialize its first run
    pub fn new(config: GameConfig, physics: P, renderer: R) -> Self {
        let mut game = Self {
            scheduler: SpawnScheduler::new(config.spawn.clone()),
            motion: MotionSystem::new(config.motion),
            config,
            world: World::new(),
            input: InputLock::new(),
            phase: RunPhase::AwaitingStart,
            last_time: None,
            player: EntityKey::default(),
            ground: EntityKey::default(),
            physics,
            renderer,
        };
        game.initialize();
        game
    }

    /// Reset to a fresh run: only the ground and the player exist, input
    /// is locked and the next tick starts the run
    pub fn initialize(&mut self) {
        self.world.clear();
        self.physics.clear();
        self.scheduler.reset();
        self.input = InputLock::new();
        self.last_time = None;
        self.phase = RunPhase::AwaitingStart;

        self.ground = self.spawn_entity(
            EntityKind::Ground,
            self.config.ground_position(),
            self.config.ground_size(),
        );
        self.player = self.spawn_entity(
            EntityKind::Player,
            self.config.player_position,
            self.config.player_size,
        );

        log::info!(
            "Run initialized: screen {}x{}, player at ({}, {})",
            self.config.screen_size.x,
            self.config.screen_size.y,
            self.config.player_position.x,
            self.config.player_position.y
        );
    }

    /// Run one frame at time `now` (seconds, monotonic)
    ///
    /// Does nothing once the player has died.
    pub fn tick(&mut self, now: f64) -> TickReport {
        let mut report = TickReport::default();

        match self.phase {
            RunPhase::Died => return report,
            RunPhase::AwaitingStart => {
                self.phase = RunPhase::Running;
                log::info!("Run started at t={:.3}", now);
            }
            RunPhase::Running => {}
        }

        let dt = self.frame_duration(now);

        // Scroll and prune
        for (key, entity) in self.motion.advance(&mut self.world, dt) {
            self.physics.remove(key);
            report.destroyed.push(entity.snapshot(key));
        }
        for kind in [EntityKind::Obstacle, EntityKind::Prize] {
            self.world
                .for_each_active(kind, |key, entity| self.physics.set_position(key, entity.position));
        }

        // Spawn
        for command in self.scheduler.tick(now) {
            let key = self.spawn_entity(command.kind, command.position, command.size);
            if let Some(entity) = self.world.get(key) {
                report.spawned.push(entity.snapshot(key));
            }
        }

        // Simulate and classify
        let contacts = self.physics.step(dt);
        for pair in contacts {
            let (a, b) = match (self.world.get(pair.a), self.world.get(pair.b)) {
                (Some(a), Some(b)) => (a.kind, b.kind),
                // One side was collected earlier this tick
                _ => continue,
            };
            let Some(event) = classify_kinds(a, b) else {
                continue;
            };
            let prize = if a == EntityKind::Prize { pair.a } else { pair.b };

            self.apply_event(event, prize, &mut report);
            if self.phase == RunPhase::Died {
                break;
            }
        }

        self.sync_player();

        let snapshots = self.world.snapshots();
        self.renderer.draw(&snapshots);
        for &event in &report.events {
            self.renderer.on_event(event);
        }

        report
    }

    /// Handle host input. Returns whether a jump was applied.
    pub fn on_input_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::JumpRequested => {
                if self.phase != RunPhase::Running {
                    return false;
                }
                if !self.input.try_acquire() {
                    log::trace!("Jump ignored: not on the ground");
                    return false;
                }
                self.physics
                    .apply_impulse(self.player, Vec2::new(0.0, self.config.jump_impulse));
                log::debug!("Jump with impulse {}", self.config.jump_impulse);
                true
            }
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn input_lock(&self) -> &InputLock {
        &self.input
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn player(&self) -> EntityKey {
        self.player
    }

    pub fn ground(&self) -> EntityKey {
        self.ground
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn spawn_entity(&mut self, kind: EntityKind, position: Vec2, size: Vec2) -> EntityKey {
        let key = self.world.create_entity(kind, position, size);
        if let Some(entity) = self.world.get(key) {
            self.physics.insert(key, entity);
        }
        log::debug!("Spawned {} at ({:.1}, {:.1})", kind.as_str(), position.x, position.y);
        key
    }

    /// Time since the previous tick, clamped to `[0, max_step]`
    fn frame_duration(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            None => 0.0,
            Some(last) if now < last => {
                log::warn!("Time went backwards ({:.3} -> {:.3}); using dt = 0", last, now);
                return 0.0;
            }
            Some(last) => (now - last) as f32,
        };
        self.last_time = Some(now);
        dt.min(self.config.max_step)
    }

    fn apply_event(&mut self, event: GameEvent, prize: EntityKey, report: &mut TickReport) {
        match event {
            GameEvent::Landed => {
                self.input.unlock();
                log::trace!("Landed");
            }
            GameEvent::LeveledUp => {
                if let Some(entity) = self.world.destroy_entity(prize) {
                    self.physics.remove(prize);
                    report.destroyed.push(entity.snapshot(prize));
                }
                log::info!("You levelled up");
            }
            GameEvent::Died => {
                self.phase = RunPhase::Died;
                self.input.lock();
                log::info!("You died");
            }
        }
        report.events.push(event);
    }

    fn sync_player(&mut self) {
        if let Some(position) = self.physics.position(self.player) {
            if let Some(player) = self.world.get_mut(self.player) {
                player.position = position;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcade::ArcadePhysics;
    use crate::spawn::SpawnConfig;

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        last_frame: Vec<EntitySnapshot>,
        events: Vec<GameEvent>,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, snapshots: &[EntitySnapshot]) {
            self.frames += 1;
            self.last_frame = snapshots.to_vec();
        }

        fn on_event(&mut self, event: GameEvent) {
            self.events.push(event);
        }
    }

    type TestLoop = GameLoop<ArcadePhysics, CountingRenderer>;

    fn quiet_spawns() -> SpawnConfig {
        let mut spawn = SpawnConfig::default();
        spawn.obstacle = spawn.obstacle.with_frequency(1000.0).with_jitter(false);
        spawn.prize = spawn.prize.with_frequency(1000.0).with_jitter(false);
        spawn.seed = Some(7);
        spawn
    }

    fn game(spawn: SpawnConfig) -> TestLoop {
        let config = GameConfig {
            spawn,
            ..GameConfig::default()
        };
        GameLoop::new(config, ArcadePhysics::default(), CountingRenderer::default())
    }

    #[test]
    fn test_initialize_creates_player_and_ground() {
        let game = game(quiet_spawns());

        assert_eq!(game.phase(), RunPhase::AwaitingStart);
        assert_eq!(game.world().len(), 2);
        assert_eq!(game.world().player(), Some(game.player()));
        assert_eq!(game.world().get(game.ground()).unwrap().kind, EntityKind::Ground);
        assert!(game.input_lock().is_locked());
        assert_eq!(game.physics().body_count(), 2);
    }

    #[test]
    fn test_first_tick_starts_run_and_lands() {
        let mut game = game(quiet_spawns());

        let report = game.tick(0.0);

        assert_eq!(game.phase(), RunPhase::Running);
        assert_eq!(report.events, vec![GameEvent::Landed]);
        assert!(!game.input_lock().is_locked());
        assert_eq!(game.renderer().frames, 1);
        assert_eq!(game.renderer().last_frame.len(), 2);
        assert_eq!(game.renderer().events, vec![GameEvent::Landed]);
    }

    #[test]
    fn test_jump_rejected_before_start() {
        let mut game = game(quiet_spawns());
        assert!(!game.on_input_event(InputEvent::JumpRequested));
    }

    #[test]
    fn test_jump_once_per_landing() {
        let mut game = game(quiet_spawns());
        game.tick(0.0);

        assert!(game.on_input_event(InputEvent::JumpRequested));
        assert!(!game.on_input_event(InputEvent::JumpRequested));

        game.tick(1.0 / 60.0);
        let y = game.world().get(game.player()).unwrap().position.y;
        assert!(y > 0.0, "player should be airborne, y = {}", y);

        // Airtime is 2 × 600 / 1470 ≈ 0.82 s
        let mut landed = false;
        for frame in 2..120 {
            let report = game.tick(frame as f64 / 60.0);
            if report.events.contains(&GameEvent::Landed) {
                landed = true;
                break;
            }
            assert!(!game.on_input_event(InputEvent::JumpRequested));
        }
        assert!(landed);
        assert!(game.on_input_event(InputEvent::JumpRequested));
    }

    #[test]
    fn test_obstacle_spawns_after_frequency() {
        let mut spawn = quiet_spawns();
        spawn.obstacle = spawn.obstacle.with_frequency(2.0).with_jitter(true);
        let mut game = game(spawn);

        assert!(game.tick(0.0).spawned.is_empty());
        let report = game.tick(2.5);

        assert_eq!(report.spawned.len(), 1);
        assert_eq!(report.spawned[0].kind, EntityKind::Obstacle);
        assert_eq!(report.spawned[0].position, Vec2::new(830.0, 30.0));
        assert_eq!(game.world().count_of(EntityKind::Obstacle), 1);
    }

    #[test]
    fn test_obstacle_on_player_ends_run() {
        let mut spawn = quiet_spawns();
        spawn.obstacle = spawn.obstacle.with_frequency(0.5);
        spawn.obstacle.position = Vec2::new(60.0, 0.0);
        let mut game = game(spawn);
        game.tick(0.0);

        let report = game.tick(1.0);

        assert!(report.died());
        assert_eq!(game.phase(), RunPhase::Died);
        assert!(game.input_lock().is_locked());
        assert!(!game.on_input_event(InputEvent::JumpRequested));

        let frames = game.renderer().frames;
        assert!(game.tick(2.0).is_empty());
        assert_eq!(game.renderer().frames, frames);
    }

    #[test]
    fn test_prize_is_collected() {
        let mut spawn = quiet_spawns();
        spawn.prize = spawn.prize.with_frequency(0.5);
        spawn.prize.position = Vec2::new(70.0, 10.0);
        let mut game = game(spawn);
        game.tick(0.0);

        let report = game.tick(1.0);

        assert_eq!(report.events, vec![GameEvent::LeveledUp]);
        assert_eq!(report.spawned.len(), 1);
        assert_eq!(report.destroyed.len(), 1);
        assert!(!report.destroyed[0].active);
        assert_eq!(game.world().count_of(EntityKind::Prize), 0);
        assert_eq!(game.physics().body_count(), 2);
        assert_eq!(game.phase(), RunPhase::Running);
    }

    #[test]
    fn test_time_going_backwards_is_tolerated() {
        let mut game = game(quiet_spawns());
        game.tick(1.0);
        game.tick(0.5);

        assert_eq!(game.phase(), RunPhase::Running);
        assert_eq!(game.renderer().frames, 2);
    }

    #[test]
    fn test_initialize_restarts_after_death() {
        let mut spawn = quiet_spawns();
        spawn.obstacle = spawn.obstacle.with_frequency(0.5);
        spawn.obstacle.position = Vec2::new(60.0, 0.0);
        let mut game = game(spawn);
        game.tick(0.0);
        game.tick(1.0);
        assert_eq!(game.phase(), RunPhase::Died);

        game.initialize();

        assert_eq!(game.phase(), RunPhase::AwaitingStart);
        assert_eq!(game.world().len(), 2);
        assert_eq!(game.physics().body_count(), 2);
        assert_eq!(game.scheduler().state().last_obstacle_spawn, None);
        assert_eq!(game.tick(5.0).events, vec![GameEvent::Landed]);
    }
}
