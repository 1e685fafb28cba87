//! Game loop settings

use runner_math::Vec2;

use crate::motion::MotionMode;
use crate::spawn::SpawnConfig;

/// Everything the [`GameLoop`](crate::GameLoop) needs to lay out a run
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Visible area; the ground spans its full width
    pub screen_size: Vec2,
    /// Bottom-left corner of the player at the start of a run
    pub player_position: Vec2,
    pub player_size: Vec2,
    /// The ground's top edge is at y = 0
    pub ground_thickness: f32,
    /// Vertical impulse of one jump (player mass × 600 by default)
    pub jump_impulse: f32,
    /// Frame durations above this are clamped
    pub max_step: f32,
    pub motion: MotionMode,
    pub spawn: SpawnConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        let screen_size = Vec2::new(800.0, 450.0);
        Self {
            screen_size,
            player_position: Vec2::new(60.0, 0.0),
            player_size: Vec2::new(44.0, 44.0),
            ground_thickness: 20.0,
            jump_impulse: 600.0,
            max_step: 0.25,
            motion: MotionMode::default(),
            spawn: SpawnConfig::for_screen(screen_size.x),
        }
    }
}

impl GameConfig {
    /// Bottom-left corner of the ground
    pub fn ground_position(&self) -> Vec2 {
        Vec2::new(0.0, -self.ground_thickness)
    }

    pub fn ground_size(&self) -> Vec2 {
        Vec2::new(self.screen_size.x, self.ground_thickness)
    }
}
