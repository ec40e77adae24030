//! Three-state behavior machine.
//!
//! | State          | Condition                | Action                  | Next           |
//! |----------------|--------------------------|-------------------------|----------------|
//! | FOLLOW_LINE    | obstacle detected        | none                    | AVOID_OBSTACLE |
//! | FOLLOW_LINE    | clear                    | PID step, steer         | FOLLOW_LINE    |
//! | AVOID_OBSTACLE | maneuver clear           | (turned by maneuver)    | FIND_LINE      |
//! | AVOID_OBSTACLE | maneuver blocked         | (turned by maneuver)    | AVOID_OBSTACLE |
//! | FIND_LINE      | any line sensor > 0.5    | none                    | FOLLOW_LINE    |
//! | FIND_LINE      | no line sensor > 0.5     | sweep heading           | FIND_LINE      |
//!
//! AVOID_OBSTACLE always passes through FIND_LINE on its way back to
//! FOLLOW_LINE.

use log::{debug, info};
use serde::Deserialize;

use super::state::{BehaviorEvent, BehaviorState};
use crate::control::PidController;
use crate::core::WorldPoint;
use crate::error::{ensure_finite, Result};
use crate::motion::HeadingModel;
use crate::sensors::SensorReadings;
use crate::world::{any_in_path, Obstacle};

/// Tunables for avoidance and line search.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Heading change per avoidance attempt (degrees)
    pub avoid_turn_deg: f64,
    /// Look-ahead distance of the avoidance probe, in multiples of speed
    pub avoid_lookahead: f64,
    /// Obstacle clearance the look-ahead probe must keep
    pub clearance_threshold: f64,
    /// Heading change per search tick (degrees)
    pub search_turn_deg: f64,
    /// Line sensor score above which the line counts as found
    pub line_found_threshold: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            avoid_turn_deg: 30.0,
            avoid_lookahead: 2.0,
            clearance_threshold: 0.0,
            search_turn_deg: 10.0,
            line_found_threshold: 0.5,
        }
    }
}

impl BehaviorConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("avoid turn", self.avoid_turn_deg)?;
        ensure_finite("avoid lookahead", self.avoid_lookahead)?;
        ensure_finite("clearance threshold", self.clearance_threshold)?;
        ensure_finite("search turn", self.search_turn_deg)?;
        ensure_finite("line found threshold", self.line_found_threshold)
    }
}

/// Read-only view of the world for one decision.
#[derive(Clone, Copy, Debug)]
pub struct BehaviorInput<'a> {
    pub sensors: &'a SensorReadings,
    pub position: WorldPoint,
    pub speed: f64,
    pub obstacles: &'a [Obstacle],
    pub heading_model: HeadingModel,
}

/// Behavior state machine owning the line-following controller.
#[derive(Clone, Debug)]
pub struct BehaviorMachine {
    config: BehaviorConfig,
    state: BehaviorState,
    controller: PidController,
}

impl BehaviorMachine {
    /// Create a machine in FOLLOW_LINE.
    pub fn new(config: BehaviorConfig, controller: PidController) -> Self {
        Self {
            config,
            state: BehaviorState::FollowLine,
            controller,
        }
    }

    #[inline]
    pub fn state(&self) -> BehaviorState {
        self.state
    }

    #[inline]
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    #[inline]
    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Decide this tick's behavior, adjusting `direction` in place.
    pub fn step(&mut self, input: &BehaviorInput<'_>, direction: &mut f64) -> BehaviorEvent {
        let event = match self.state {
            BehaviorState::FollowLine => self.follow_line(input, direction),
            BehaviorState::AvoidObstacle => self.avoid_obstacle(input, direction),
            BehaviorState::FindLine => self.find_line(input, direction),
        };

        let next = event.next_state();
        if next != self.state {
            info!("{} -> {}: {}", self.state, next, event.description());
        } else {
            debug!("{}: {}", self.state, event.description());
        }
        self.state = next;
        event
    }

    fn follow_line(&mut self, input: &BehaviorInput<'_>, direction: &mut f64) -> BehaviorEvent {
        let sensors = input.sensors;
        if sensors.obstacle_detector {
            return BehaviorEvent::ObstacleDetected;
        }
        let steering = self.controller.step(sensors.left, sensors.right);
        *direction += steering;
        BehaviorEvent::Followed { steering }
    }

    fn avoid_obstacle(&mut self, input: &BehaviorInput<'_>, direction: &mut f64) -> BehaviorEvent {
        *direction += self.config.avoid_turn_deg;
        if self.heading_is_clear(input, *direction) {
            BehaviorEvent::Cleared
        } else {
            BehaviorEvent::StillBlocked
        }
    }

    fn find_line(&mut self, input: &BehaviorInput<'_>, direction: &mut f64) -> BehaviorEvent {
        if input.sensors.any_line_above(self.config.line_found_threshold) {
            BehaviorEvent::LineFound
        } else {
            *direction += self.config.search_turn_deg;
            BehaviorEvent::Searching
        }
    }

    /// True if a probe projected ahead along `direction` keeps clear of every
    /// obstacle. The robot itself does not move.
    pub fn heading_is_clear(&self, input: &BehaviorInput<'_>, direction: f64) -> bool {
        let reach = input.speed * self.config.avoid_lookahead;
        let probe = input.position + input.heading_model.project(direction, reach);
        !any_in_path(input.obstacles, probe, self.config.clearance_threshold)
    }
}
