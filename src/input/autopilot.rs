//! Automatic jump input
//!
//! Stands in for a player: asks for a jump when an obstacle gets close.

use runner_core::{EntityKind, InputEvent, World};

use crate::config::AutopilotConfig;

/// Requests a jump when an obstacle is within reach of the player
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    reaction_distance: f32,
}

impl Autopilot {
    pub fn new(reaction_distance: f32) -> Self {
        Self { reaction_distance }
    }

    /// Build from config; None when the autopilot is disabled
    pub fn from_config(config: &AutopilotConfig) -> Option<Self> {
        config.enabled.then(|| Self::new(config.reaction_distance))
    }

    pub fn reaction_distance(&self) -> f32 {
        self.reaction_distance
    }

    /// Input to send this frame, if any
    ///
    /// Only obstacles still ahead of the player count; one that is already
    /// overlapping is too late to jump over.
    pub fn poll(&self, world: &World) -> Option<InputEvent> {
        let player = world.get(world.player()?)?;
        let front = player.right_edge();

        let mut threatened = false;
        world.for_each_active(EntityKind::Obstacle, |_, obstacle| {
            let gap = obstacle.position.x - front;
            if (0.0..=self.reaction_distance).contains(&gap) {
                threatened = true;
            }
        });

        threatened.then_some(InputEvent::JumpRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runner_core::Vec2;

    fn world_with_obstacle(x: f32) -> World {
        let mut world = World::new();
        world.create_entity(EntityKind::Player, Vec2::new(60.0, 0.0), Vec2::new(44.0, 44.0));
        world.create_entity(EntityKind::Obstacle, Vec2::new(x, 30.0), Vec2::new(30.0, 30.0));
        world
    }

    #[test]
    fn test_jumps_when_obstacle_is_close() {
        let pilot = Autopilot::new(100.0);
        assert_eq!(pilot.poll(&world_with_obstacle(180.0)), Some(InputEvent::JumpRequested));
        assert_eq!(pilot.poll(&world_with_obstacle(204.0)), Some(InputEvent::JumpRequested));
    }

    #[test]
    fn test_ignores_far_and_passed_obstacles() {
        let pilot = Autopilot::new(100.0);
        assert_eq!(pilot.poll(&world_with_obstacle(400.0)), None);
        assert_eq!(pilot.poll(&world_with_obstacle(90.0)), None);
    }

    #[test]
    fn test_no_player_no_input() {
        let mut world = World::new();
        world.create_entity(EntityKind::Obstacle, Vec2::new(120.0, 30.0), Vec2::new(30.0, 30.0));
        assert_eq!(Autopilot::new(100.0).poll(&world), None);
    }

    #[test]
    fn test_disabled_by_config() {
        let config = AutopilotConfig {
            enabled: false,
            ..AutopilotConfig::default()
        };
        assert!(Autopilot::from_config(&config).is_none());
        assert!(Autopilot::from_config(&AutopilotConfig::default()).is_some());
    }
}
