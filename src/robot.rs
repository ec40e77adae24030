//! The line-following robot: owns its state and runs the per-tick cycle.
//!
//! Each [`tick`](Robot::tick):
//! 1. reads the sensors against the path and obstacles,
//! 2. lets the behavior machine adjust the heading,
//! 3. integrates one step of motion.
//!
//! The path and obstacle set are only read during a tick. Obstacles are
//! added during setup with [`add_obstacle`](Robot::add_obstacle) or
//! [`generate_random_obstacles`](Robot::generate_random_obstacles).

use log::{debug, info};
use serde::Serialize;

use crate::behavior::{
    BehaviorConfig, BehaviorEvent, BehaviorInput, BehaviorMachine, BehaviorState,
};
use crate::control::{PidController, PidGains};
use crate::core::WorldPoint;
use crate::error::{ensure_finite, RekhaError, Result};
use crate::motion::{HeadingModel, MotionIntegrator};
use crate::sensors::{SensorArray, SensorConfig, SensorReadings};
use crate::world::{LinePath, Obstacle, ObstacleGenerator, Placement};

/// Construction parameters for a [`Robot`].
#[derive(Clone, Debug, PartialEq)]
pub struct RobotConfig {
    /// Initial position
    pub start: WorldPoint,
    /// Initial heading (degrees)
    pub direction: f64,
    /// Distance travelled per tick; must be positive
    pub speed: f64,
    /// Heading-to-displacement mapping
    pub heading_model: HeadingModel,
    /// Line-following controller gains
    pub gains: PidGains,
    /// Sensor geometry
    pub sensor: SensorConfig,
    /// Avoidance and search tunables
    pub behavior: BehaviorConfig,
    /// Seed for random obstacle placement (0 = entropy)
    pub seed: u64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            start: WorldPoint::ZERO,
            direction: 0.0,
            speed: 1.0,
            heading_model: HeadingModel::Linear,
            gains: PidGains::default(),
            sensor: SensorConfig::default(),
            behavior: BehaviorConfig::default(),
            seed: 0,
        }
    }
}

impl RobotConfig {
    /// Reject configurations that would produce degenerate numerics.
    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() {
            return Err(RekhaError::Configuration(format!(
                "start position must be finite, got ({}, {})",
                self.start.x, self.start.y
            )));
        }
        ensure_finite("initial direction", self.direction)?;
        ensure_finite("speed", self.speed)?;
        if self.speed <= 0.0 {
            return Err(RekhaError::Configuration(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        self.gains.validate()?;
        self.sensor.validate()?;
        self.behavior.validate()
    }
}

/// Observable result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TickSnapshot {
    /// 1-based tick number
    pub tick: u64,
    /// Position after motion
    pub position: WorldPoint,
    /// Heading after this tick (degrees, unwrapped)
    pub direction: f64,
    /// Behavior after this tick
    pub behavior: BehaviorState,
    /// Sensor readings taken at the start of the tick
    pub sensors: SensorReadings,
    /// What the behavior machine did
    pub event: BehaviorEvent,
}

/// Line-following robot.
pub struct Robot {
    path: LinePath,
    obstacles: Vec<Obstacle>,
    position: WorldPoint,
    direction: f64,
    speed: f64,
    heading_model: HeadingModel,
    sensor_array: SensorArray,
    sensors: SensorReadings,
    behavior: BehaviorMachine,
    motion: MotionIntegrator,
    generator: ObstacleGenerator,
    ticks: u64,
}

impl Robot {
    /// Create a robot following the default zig-zag path.
    pub fn new(config: RobotConfig) -> Result<Self> {
        Self::with_path(config, LinePath::default())
    }

    /// Create a robot following `path`.
    pub fn with_path(config: RobotConfig, path: LinePath) -> Result<Self> {
        config.validate()?;
        info!(
            "Robot at ({:.2}, {:.2}), speed {:.2}, path of {} waypoints, gains kp={} ki={} kd={}",
            config.start.x,
            config.start.y,
            config.speed,
            path.len(),
            config.gains.kp,
            config.gains.ki,
            config.gains.kd
        );
        Ok(Self {
            path,
            obstacles: Vec::new(),
            position: config.start,
            direction: config.direction,
            speed: config.speed,
            heading_model: config.heading_model,
            sensor_array: SensorArray::new(config.sensor),
            sensors: SensorReadings::default(),
            behavior: BehaviorMachine::new(config.behavior, PidController::new(config.gains)),
            motion: MotionIntegrator::new(config.heading_model),
            generator: ObstacleGenerator::new(config.seed),
            ticks: 0,
        })
    }

    /// Add an obstacle at `position` with radius `size`.
    pub fn add_obstacle(&mut self, position: WorldPoint, size: f64) -> Result<()> {
        let obstacle = Obstacle::new(position, size)?;
        debug!(
            "Obstacle at ({:.2}, {:.2}), size {:.2}",
            position.x, position.y, size
        );
        self.obstacles.push(obstacle);
        Ok(())
    }

    /// Scatter `count` obstacles near the path with sizes in `[1, max_size]`.
    ///
    /// Returns where each one was placed.
    pub fn generate_random_obstacles(
        &mut self,
        count: usize,
        max_size: f64,
    ) -> Result<Vec<Placement>> {
        let placements = self.generator.generate(&self.path, count, max_size)?;
        self.obstacles.extend(placements.iter().map(|p| p.obstacle));
        info!(
            "Generated {} obstacles ({} total)",
            placements.len(),
            self.obstacles.len()
        );
        Ok(placements)
    }

    /// Advance one tick: sense, decide, move.
    pub fn tick(&mut self) -> TickSnapshot {
        self.sensors = self
            .sensor_array
            .read(self.position, &self.path, &self.obstacles);

        let input = BehaviorInput {
            sensors: &self.sensors,
            position: self.position,
            speed: self.speed,
            obstacles: &self.obstacles,
            heading_model: self.heading_model,
        };
        let event = self.behavior.step(&input, &mut self.direction);

        self.position = self
            .motion
            .advance(self.position, self.direction, self.speed);
        self.ticks += 1;

        TickSnapshot {
            tick: self.ticks,
            position: self.position,
            direction: self.direction,
            behavior: self.behavior.state(),
            sensors: self.sensors,
            event,
        }
    }

    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    #[inline]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn behavior(&self) -> BehaviorState {
        self.behavior.state()
    }

    /// Readings from the most recent tick (all zero before the first).
    #[inline]
    pub fn sensors(&self) -> &SensorReadings {
        &self.sensors
    }

    #[inline]
    pub fn controller(&self) -> &PidController {
        self.behavior.controller()
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn path(&self) -> &LinePath {
        &self.path
    }

    /// Ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
