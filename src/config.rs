//! Configuration loading for RekhaNav

use crate::behavior::BehaviorConfig;
use crate::control::PidGains;
use crate::core::WorldPoint;
use crate::error::{RekhaError, Result};
use crate::motion::HeadingModel;
use crate::robot::RobotConfig;
use crate::sensors::SensorConfig;
use crate::world::{
    LinePath, Obstacle, ObstacleSpec, DEFAULT_PATH_POINTS, DEFAULT_SEGMENT_LENGTH,
};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RekhaConfig {
    #[serde(default)]
    pub robot: RobotSection,
    #[serde(default)]
    pub controller: PidGains,
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub path: PathSection,
    #[serde(default)]
    pub obstacles: ObstacleSection,
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// Robot kinematics
#[derive(Clone, Debug, Deserialize)]
pub struct RobotSection {
    /// Start position (default: path start at origin)
    #[serde(default)]
    pub start: WorldPoint,

    /// Initial heading in degrees (default: 0)
    #[serde(default)]
    pub direction: f64,

    /// Distance per tick (default: 1.0)
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Heading model: "linear" or "trigonometric" (default: linear)
    #[serde(default)]
    pub heading_model: HeadingModel,
}

/// Line path source
#[derive(Clone, Debug, Deserialize)]
pub struct PathSection {
    /// Explicit waypoints; when absent the zig-zag path is generated
    #[serde(default)]
    pub waypoints: Option<Vec<WorldPoint>>,

    /// Waypoint count of the generated zig-zag (default: 100)
    #[serde(default = "default_path_points")]
    pub points: usize,

    /// Waypoints per zig-zag leg (default: 20)
    #[serde(default = "default_segment_length")]
    pub segment_length: usize,
}

/// Obstacle setup
#[derive(Clone, Debug, Deserialize)]
pub struct ObstacleSection {
    /// Number of random obstacles (default: 8)
    #[serde(default = "default_obstacle_count")]
    pub count: usize,

    /// Largest random obstacle size (default: 2.0)
    #[serde(default = "default_max_size")]
    pub max_size: f64,

    /// RNG seed, 0 for entropy (default: 0)
    #[serde(default)]
    pub seed: u64,

    /// Obstacles placed explicitly before random generation
    #[serde(default)]
    pub fixed: Vec<ObstacleSpec>,
}

/// Simulation driver settings
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationSection {
    /// Number of ticks to run (default: 200)
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// Cosmetic pause between ticks in milliseconds (default: 100)
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u64,
}

impl Default for RobotSection {
    fn default() -> Self {
        Self {
            start: WorldPoint::ZERO,
            direction: 0.0,
            speed: default_speed(),
            heading_model: HeadingModel::default(),
        }
    }
}

impl Default for PathSection {
    fn default() -> Self {
        Self {
            waypoints: None,
            points: default_path_points(),
            segment_length: default_segment_length(),
        }
    }
}

impl Default for ObstacleSection {
    fn default() -> Self {
        Self {
            count: default_obstacle_count(),
            max_size: default_max_size(),
            seed: 0,
            fixed: Vec::new(),
        }
    }
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            tick_delay_ms: default_tick_delay_ms(),
        }
    }
}

// Default value functions
fn default_speed() -> f64 {
    1.0
}
fn default_path_points() -> usize {
    DEFAULT_PATH_POINTS
}
fn default_segment_length() -> usize {
    DEFAULT_SEGMENT_LENGTH
}
fn default_obstacle_count() -> usize {
    8
}
fn default_max_size() -> f64 {
    2.0
}
fn default_steps() -> u64 {
    200
}
fn default_tick_delay_ms() -> u64 {
    100
}

impl RekhaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: RekhaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every construction-time precondition.
    pub fn validate(&self) -> Result<()> {
        self.robot_config().validate()?;
        self.line_path()?;
        self.fixed_obstacles()?;
        if !self.obstacles.max_size.is_finite() || self.obstacles.max_size < 1.0 {
            return Err(RekhaError::Configuration(format!(
                "obstacles.max_size must be at least 1, got {}",
                self.obstacles.max_size
            )));
        }
        Ok(())
    }

    /// Robot construction parameters.
    pub fn robot_config(&self) -> RobotConfig {
        RobotConfig {
            start: self.robot.start,
            direction: self.robot.direction,
            speed: self.robot.speed,
            heading_model: self.robot.heading_model,
            gains: self.controller,
            sensor: self.sensor.clone(),
            behavior: self.behavior.clone(),
            seed: self.obstacles.seed,
        }
    }

    /// The configured path, or the generated zig-zag.
    pub fn line_path(&self) -> Result<LinePath> {
        match &self.path.waypoints {
            Some(waypoints) => LinePath::new(waypoints.clone()),
            None => LinePath::zigzag(self.path.points, self.path.segment_length),
        }
    }

    /// Explicit obstacles from the `[[obstacles.fixed]]` tables.
    pub fn fixed_obstacles(&self) -> Result<Vec<Obstacle>> {
        self.obstacles
            .fixed
            .iter()
            .map(|spec| Obstacle::try_from(*spec))
            .collect()
    }
}
