//! # Rekha-Nav: Line-Following Robot Simulation
//!
//! Simulates a mobile robot that tracks a line of waypoints in a 2D plane,
//! steering with a PID controller and switching to obstacle avoidance and
//! line search when hazards get in the way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rekha_nav::{Robot, RobotConfig, WorldPoint};
//!
//! let mut robot = Robot::new(RobotConfig::default())?;
//! robot.add_obstacle(WorldPoint::new(3.0, 12.0), 1.5)?;
//! robot.generate_random_obstacles(5, 2.0)?;
//!
//! for _ in 0..100 {
//!     let snap = robot.tick();
//!     println!("{} at ({:.2}, {:.2})", snap.behavior, snap.position.x, snap.position.y);
//! }
//! # Ok::<(), rekha_nav::RekhaError>(())
//! ```
//!
//! ## Tick Cycle
//!
//! ```text
//!   ┌──────────────┐     ┌──────────────────┐     ┌──────────────────┐
//!   │ SensorArray  │────►│ BehaviorMachine  │────►│ MotionIntegrator │
//!   │ (L / C / R,  │     │ FOLLOW_LINE      │     │ position +=      │
//!   │  obstacle)   │     │ AVOID_OBSTACLE   │     │ travel(dir, v)   │
//!   └──────▲───────┘     │ FIND_LINE        │     └────────┬─────────┘
//!          │             │  └─ PidController│              │
//!          │             └──────────────────┘              │
//!          └───────────────── next tick ◄──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`core`]: point type
//! - [`world`]: line path, obstacles and random obstacle placement
//! - [`sensors`]: virtual line sensors and obstacle detector
//! - [`control`]: PID steering controller
//! - [`behavior`]: three-state behavior machine
//! - [`motion`]: heading models and motion integration
//! - [`robot`]: the robot and its tick cycle
//! - [`simulation`]: fixed-budget driver loop
//! - [`config`]: TOML configuration

pub mod behavior;
pub mod config;
pub mod control;
pub mod core;
pub mod error;
pub mod motion;
pub mod robot;
pub mod sensors;
pub mod simulation;
pub mod world;

pub use behavior::{BehaviorConfig, BehaviorEvent, BehaviorMachine, BehaviorState};
pub use config::RekhaConfig;
pub use control::{PidController, PidGains};
pub use crate::core::WorldPoint;
pub use error::{RekhaError, Result};
pub use motion::{HeadingModel, MotionIntegrator};
pub use robot::{Robot, RobotConfig, TickSnapshot};
pub use sensors::{SensorArray, SensorConfig, SensorReadings};
pub use simulation::{Simulation, SimulationSummary};
pub use world::{LinePath, Obstacle, ObstacleGenerator, Placement};
