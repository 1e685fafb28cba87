//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BUNNY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use runner_core::{GameConfig, MotionMode, SpawnConfig, SpawnRule, Vec2};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Screen and ground layout
    #[serde(default)]
    pub screen: ScreenConfig,
    /// Obstacle and prize spawning
    #[serde(default)]
    pub spawn: SpawnSettings,
    /// Scrolling of obstacles and prizes
    #[serde(default)]
    pub motion: MotionConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Player body and jump
    #[serde(default)]
    pub player: PlayerConfig,
    /// Headless frame clock
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Automatic jump input
    #[serde(default)]
    pub autopilot: AutopilotConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BUNNY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BUNNY_SPAWN__OBSTACLE_FREQUENCY=1.5 -> spawn.obstacle_frequency = 1.5
        figment = figment.merge(Env::prefixed("BUNNY_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("screen.ground_thickness", self.screen.ground_thickness)?;
        positive("spawn.obstacle_frequency", self.spawn.obstacle_frequency as f32)?;
        positive("spawn.prize_frequency", self.spawn.prize_frequency as f32)?;
        positive("motion.obstacle_speed", self.motion.obstacle_speed)?;
        positive("physics.max_step", self.physics.max_step)?;
        positive("player.mass", self.player.mass)?;
        positive("player.width", self.player.size[0])?;
        positive("player.height", self.player.size[1])?;
        positive("simulation.fps", self.simulation.fps as f32)?;
        if self.physics.contact_margin < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "physics.contact_margin must not be negative (got {})",
                self.physics.contact_margin
            )));
        }
        Ok(())
    }

    /// Game loop settings derived from this configuration
    pub fn to_game_config(&self) -> GameConfig {
        let screen_size = Vec2::new(self.screen.width, self.screen.height);

        let obstacle = SpawnRule::obstacle(screen_size.x)
            .with_frequency(self.spawn.obstacle_frequency)
            .with_jitter(self.spawn.jitter);
        let prize = SpawnRule::prize(screen_size.x)
            .with_frequency(self.spawn.prize_frequency)
            .with_jitter(self.spawn.jitter);

        let motion = match self.motion.mode {
            MotionModeSetting::PerTick => MotionMode::PerTick {
                distance: self.motion.obstacle_speed,
            },
            MotionModeSetting::DeltaScaled => MotionMode::DeltaScaled {
                speed: self.motion.obstacle_speed * self.motion.reference_fps,
            },
        };

        GameConfig {
            screen_size,
            player_position: self.player.position.into(),
            player_size: self.player.size.into(),
            ground_thickness: self.screen.ground_thickness,
            jump_impulse: self.player.mass * self.player.jump_impulse_per_mass,
            max_step: self.physics.max_step,
            motion,
            spawn: SpawnConfig {
                obstacle,
                prize,
                seed: self.spawn.seed,
            },
        }
    }

    /// Physics world settings derived from this configuration
    pub fn to_physics_config(&self) -> runner_core::PhysicsConfig {
        self.physics.to_physics_config()
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be positive (got {})", name, value)))
    }
}

/// Screen configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Visible width in points
    pub width: f32,
    /// Visible height in points
    pub height: f32,
    /// Thickness of the ground strip below y = 0
    pub ground_thickness: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
            ground_thickness: 20.0,
        }
    }
}

/// Spawn configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Seconds between obstacles (before jitter)
    pub obstacle_frequency: f64,
    /// Seconds between prizes (before jitter)
    pub prize_frequency: f64,
    /// Stagger spawns by a random delay
    pub jitter: bool,
    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            obstacle_frequency: 2.0,
            prize_frequency: 5.0,
            jitter: true,
            seed: None,
        }
    }
}

/// How scrolling distance is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionModeSetting {
    /// Fixed distance every frame
    #[default]
    PerTick,
    /// Distance scaled by frame duration
    DeltaScaled,
}

/// Motion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub mode: MotionModeSetting,
    /// Points moved per frame
    pub obstacle_speed: f32,
    /// Frame rate `obstacle_speed` is tuned for; converts it to points per
    /// second in `delta_scaled` mode
    pub reference_fps: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            mode: MotionModeSetting::PerTick,
            obstacle_speed: 5.0,
            reference_fps: 60.0,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity (negative = downward)
    pub gravity: f32,
    /// Distance within which bodies still count as touching
    pub contact_margin: f32,
    /// Longest frame duration simulated at once
    pub max_step: f32,
    /// Integration slice length
    pub substep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -1470.0,
            contact_margin: 0.05,
            max_step: 0.25,
            substep: 1.0 / 60.0,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's configuration
    pub fn to_physics_config(&self) -> runner_core::PhysicsConfig {
        runner_core::PhysicsConfig {
            gravity: self.gravity,
            contact_margin: self.contact_margin,
            max_step: self.max_step,
            substep: self.substep,
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting bottom-left corner [x, y]
    pub position: [f32; 2],
    /// [width, height]
    pub size: [f32; 2],
    pub mass: f32,
    /// Jump impulse per unit of mass
    pub jump_impulse_per_mass: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position: [60.0, 0.0],
            size: [44.0, 44.0],
            mass: 1.0,
            jump_impulse_per_mass: 600.0,
        }
    }
}

/// Frame clock configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames per second
    pub fps: f64,
    /// Simulated time before the host exits
    pub duration_seconds: f64,
    /// Sleep between frames to match wall-clock time
    pub real_time: bool,
    /// Start a new run after dying instead of stopping
    pub auto_restart: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            duration_seconds: 30.0,
            real_time: false,
            auto_restart: true,
        }
    }
}

/// Autopilot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    pub enabled: bool,
    /// Jump once an obstacle is this close to the player's right edge
    pub reaction_distance: f32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reaction_distance: 100.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Frames between renderer summaries; 0 disables them
    pub summary_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            summary_interval: 60,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema
    Load(String),
    /// A value is out of range
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Configuration error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
