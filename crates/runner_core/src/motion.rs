//! Scrolling of obstacles and prizes
//!
//! Transient entities move left every tick and are destroyed once their
//! right edge reaches the left edge of the screen (`x + width <= 0`).
//! The player and ground never move horizontally.

use crate::entity::{Entity, EntityKind};
use crate::world::{EntityKey, World};

/// How far transient entities move per `advance` call
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionMode {
    /// Fixed distance per tick regardless of frame duration.
    ///
    /// Frame-rate dependent: at 30 fps everything scrolls half as fast as
    /// at 60 fps.
    PerTick { distance: f32 },
    /// Distance is `speed × dt`, independent of frame rate
    DeltaScaled { speed: f32 },
}

impl Default for MotionMode {
    fn default() -> Self {
        MotionMode::PerTick { distance: 5.0 }
    }
}

/// Moves obstacles and prizes and prunes the ones that left the screen
#[derive(Clone, Copy, Debug, Default)]
pub struct MotionSystem {
    mode: MotionMode,
}

impl MotionSystem {
    pub fn new(mode: MotionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Distance covered by one `advance` with the given frame duration
    pub fn step_distance(&self, dt: f32) -> f32 {
        match self.mode {
            MotionMode::PerTick { distance } => distance,
            MotionMode::DeltaScaled { speed } => speed * dt.max(0.0),
        }
    }

    /// Move every active obstacle and prize left, then destroy those that
    /// are fully off-screen
    ///
    /// Returns the destroyed entities (with `active` cleared) and their keys.
    pub fn advance(&self, world: &mut World, dt: f32) -> Vec<(EntityKey, Entity)> {
        let distance = self.step_distance(dt);
        let mut off_screen = Vec::new();

        for kind in [EntityKind::Obstacle, EntityKind::Prize] {
            world.for_each_active_mut(kind, |key, entity| {
                entity.position.x -= distance;
                if entity.is_off_screen() {
                    off_screen.push(key);
                }
            });
        }

        off_screen
            .into_iter()
            .filter_map(|key| {
                let entity = world.destroy_entity(key)?;
                log::debug!("pruned {} at x={:.1}", entity.kind.as_str(), entity.position.x);
                Some((key, entity))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use runner_math::Vec2;

    fn world_with(kind: EntityKind, x: f32, width: f32) -> (World, EntityKey) {
        let mut world = World::new();
        let key = world.create_entity(kind, Vec2::new(x, 30.0), Vec2::new(width, 20.0));
        (world, key)
    }

    #[test]
    fn test_per_tick_ignores_dt() {
        let motion = MotionSystem::new(MotionMode::PerTick { distance: 5.0 });
        assert_eq!(motion.step_distance(0.0), 5.0);
        assert_eq!(motion.step_distance(1.0), 5.0);
    }

    #[test]
    fn test_delta_scaled_uses_dt() {
        let motion = MotionSystem::new(MotionMode::DeltaScaled { speed: 300.0 });
        assert!((motion.step_distance(0.5) - 150.0).abs() < 0.0001);
        assert_eq!(motion.step_distance(-1.0), 0.0);
    }

    #[test]
    fn test_obstacles_and_prizes_move_left() {
        let mut world = World::new();
        let obstacle = world.create_entity(EntityKind::Obstacle, Vec2::new(100.0, 30.0), Vec2::new(20.0, 20.0));
        let prize = world.create_entity(EntityKind::Prize, Vec2::new(200.0, 50.0), Vec2::new(20.0, 20.0));
        let motion = MotionSystem::default();

        let removed = motion.advance(&mut world, 1.0 / 60.0);

        assert!(removed.is_empty());
        assert_eq!(world.get(obstacle).unwrap().position, Vec2::new(95.0, 30.0));
        assert_eq!(world.get(prize).unwrap().position, Vec2::new(195.0, 50.0));
    }

    #[test]
    fn test_player_and_ground_do_not_move() {
        let mut world = World::new();
        let player = world.create_entity(EntityKind::Player, Vec2::new(50.0, 0.0), Vec2::new(40.0, 40.0));
        let ground = world.create_entity(EntityKind::Ground, Vec2::new(0.0, -20.0), Vec2::new(800.0, 20.0));

        MotionSystem::default().advance(&mut world, 1.0);

        assert_eq!(world.get(player).unwrap().position, Vec2::new(50.0, 0.0));
        assert_eq!(world.get(ground).unwrap().position, Vec2::new(0.0, -20.0));
    }

    #[test]
    fn test_right_edge_exactly_zero_is_destroyed() {
        // x = -15, width 20: after moving 5, right edge is exactly 0
        let (mut world, key) = world_with(EntityKind::Obstacle, -15.0, 20.0);

        let removed = MotionSystem::default().advance(&mut world, 0.0);

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].0, key);
        assert!(!removed[0].1.active);
        assert!(world.get(key).is_none());
    }

    #[test]
    fn test_right_edge_just_positive_survives() {
        let (mut world, key) = world_with(EntityKind::Prize, -14.5, 20.0);

        let removed = MotionSystem::default().advance(&mut world, 0.0);

        assert!(removed.is_empty());
        assert!(world.get(key).is_some());
    }

    proptest! {
        #[test]
        fn prop_moves_exactly_speed_times_ticks(
            start in 0u32..2000,
            width in 1u32..100,
            speed in 1u32..20,
            ticks in 1u32..400,
        ) {
            // Integer-valued inputs keep the f32 arithmetic exact
            let (start, width, speed) = (start as f32, width as f32, speed as f32);
            let (mut world, key) = world_with(EntityKind::Obstacle, start, width);
            let motion = MotionSystem::new(MotionMode::PerTick { distance: speed });

            for n in 1..=ticks {
                let removed = motion.advance(&mut world, 1.0 / 60.0);
                let expected_x = start - speed * n as f32;
                let off_screen = expected_x + width <= 0.0;

                match world.get(key) {
                    Some(entity) => {
                        prop_assert!(!off_screen);
                        prop_assert_eq!(entity.position.x, expected_x);
                    }
                    None => {
                        prop_assert!(off_screen);
                        prop_assert_eq!(removed.len(), 1);
                        break;
                    }
                }
            }
        }
    }
}
