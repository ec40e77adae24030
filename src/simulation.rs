//! Fixed-budget simulation driver.
//!
//! Calls [`Robot::tick`] a fixed number of times, logs each snapshot and
//! keeps simple counters. Any pause between ticks is purely cosmetic.

use std::time::Duration;

use log::info;

use crate::behavior::{BehaviorEvent, BehaviorState};
use crate::config::RekhaConfig;
use crate::core::WorldPoint;
use crate::error::Result;
use crate::robot::{Robot, TickSnapshot};

/// Counters collected over a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationSummary {
    /// Ticks executed
    pub ticks: u64,
    /// Ticks that ended in each behavior
    pub follow_ticks: u64,
    pub avoid_ticks: u64,
    pub find_ticks: u64,
    /// Number of FOLLOW_LINE -> AVOID_OBSTACLE transitions
    pub obstacles_encountered: u64,
    /// Number of FIND_LINE -> FOLLOW_LINE transitions
    pub lines_recovered: u64,
    /// Final robot position
    pub final_position: WorldPoint,
    /// Final heading (degrees)
    pub final_direction: f64,
    /// Final behavior
    pub final_behavior: BehaviorState,
}

impl SimulationSummary {
    fn record(&mut self, snap: &TickSnapshot) {
        self.ticks += 1;
        match snap.behavior {
            BehaviorState::FollowLine => self.follow_ticks += 1,
            BehaviorState::AvoidObstacle => self.avoid_ticks += 1,
            BehaviorState::FindLine => self.find_ticks += 1,
        }
        match snap.event {
            BehaviorEvent::ObstacleDetected => self.obstacles_encountered += 1,
            BehaviorEvent::LineFound => self.lines_recovered += 1,
            _ => {}
        }
        self.final_position = snap.position;
        self.final_direction = snap.direction;
        self.final_behavior = snap.behavior;
    }
}

/// Tick-count driven simulation loop.
pub struct Simulation {
    robot: Robot,
    tick_delay: Duration,
}

impl Simulation {
    pub fn new(robot: Robot) -> Self {
        Self {
            robot,
            tick_delay: Duration::ZERO,
        }
    }

    /// Build robot, path and obstacles from a configuration.
    pub fn from_config(config: &RekhaConfig) -> Result<Self> {
        config.validate()?;
        let mut robot = Robot::with_path(config.robot_config(), config.line_path()?)?;
        for obstacle in config.fixed_obstacles()? {
            robot.add_obstacle(obstacle.position(), obstacle.size())?;
        }
        if config.obstacles.count > 0 {
            robot.generate_random_obstacles(config.obstacles.count, config.obstacles.max_size)?;
        }
        Ok(Self::new(robot).with_tick_delay(Duration::from_millis(
            config.simulation.tick_delay_ms,
        )))
    }

    /// Pause between ticks when running.
    pub fn with_tick_delay(mut self, delay: Duration) -> Self {
        self.tick_delay = delay;
        self
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn robot_mut(&mut self) -> &mut Robot {
        &mut self.robot
    }

    /// Run `steps` ticks, handing each snapshot to `observer`.
    pub fn run_with<F>(&mut self, steps: u64, mut observer: F) -> SimulationSummary
    where
        F: FnMut(&TickSnapshot),
    {
        let start = self.robot.position();
        info!(
            "Starting simulation: {} steps from ({:.2}, {:.2}), {} obstacles",
            steps,
            start.x,
            start.y,
            self.robot.obstacles().len()
        );

        let mut summary = SimulationSummary {
            final_position: start,
            final_direction: self.robot.direction(),
            final_behavior: self.robot.behavior(),
            ..Default::default()
        };

        for _ in 0..steps {
            let snap = self.robot.tick();
            info!(
                "Step {}/{}: {} | L {:.2} C {:.2} R {:.2} | pos ({:.2}, {:.2}) dir {:.1}° {}",
                snap.tick,
                steps,
                snap.event.description(),
                snap.sensors.left,
                snap.sensors.center,
                snap.sensors.right,
                snap.position.x,
                snap.position.y,
                snap.direction,
                snap.behavior
            );
            summary.record(&snap);
            observer(&snap);

            if !self.tick_delay.is_zero() {
                std::thread::sleep(self.tick_delay);
            }
        }

        info!(
            "Simulation complete: {} ticks, {} obstacles encountered, {} line recoveries",
            summary.ticks, summary.obstacles_encountered, summary.lines_recovered
        );
        summary
    }

    /// Run `steps` ticks and return the snapshots.
    pub fn run(&mut self, steps: u64) -> (SimulationSummary, Vec<TickSnapshot>) {
        let mut history = Vec::with_capacity(steps as usize);
        let summary = self.run_with(steps, |snap| history.push(*snap));
        (summary, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::RobotConfig;

    #[test]
    fn test_summary_counts_match_history() {
        let mut robot = Robot::new(RobotConfig {
            seed: 11,
            ..Default::default()
        })
        .unwrap();
        robot.generate_random_obstacles(8, 2.0).unwrap();
        let mut sim = Simulation::new(robot);

        let (summary, history) = sim.run(150);
        assert_eq!(summary.ticks, 150);
        assert_eq!(history.len(), 150);
        assert_eq!(
            summary.follow_ticks + summary.avoid_ticks + summary.find_ticks,
            150
        );
        let last = history.last().unwrap();
        assert_eq!(summary.final_position, last.position);
        assert_eq!(summary.final_behavior, last.behavior);
        assert_eq!(sim.robot().ticks(), 150);
    }

    #[test]
    fn test_zero_steps() {
        let mut sim = Simulation::new(Robot::new(RobotConfig::default()).unwrap());
        let (summary, history) = sim.run(0);
        assert!(history.is_empty());
        assert_eq!(summary.final_position, WorldPoint::ZERO);
        assert_eq!(summary.final_behavior, BehaviorState::FollowLine);
    }

    #[test]
    fn test_obstacle_added_through_driver() {
        let mut sim = Simulation::new(Robot::new(RobotConfig::default()).unwrap());
        let start = sim.robot().position();
        sim.robot_mut().add_obstacle(start, 5.0).unwrap();

        let (summary, history) = sim.run(1);
        assert_eq!(history[0].event, BehaviorEvent::ObstacleDetected);
        assert_eq!(summary.obstacles_encountered, 1);
        assert_eq!(summary.final_behavior, BehaviorState::AvoidObstacle);
    }

    #[test]
    fn test_from_config_places_obstacles() {
        let config = RekhaConfig::from_toml(
            r#"
            [obstacles]
            count = 3
            seed = 5

            [[obstacles.fixed]]
            position = { x = 10.0, y = 10.0 }

            [simulation]
            tick_delay_ms = 0
            "#,
        )
        .unwrap();
        let sim = Simulation::from_config(&config).unwrap();
        assert_eq!(sim.robot().obstacles().len(), 4);
        assert_eq!(sim.robot().obstacles()[0].size(), 1.0);
    }
}
