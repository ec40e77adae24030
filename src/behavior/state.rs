//! Behavior states and per-tick events.

use serde::{Deserialize, Serialize};

/// Discrete behavior mode of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorState {
    /// Tracking the line with the PID controller.
    #[default]
    FollowLine,

    /// Turning away from a detected obstacle.
    AvoidObstacle,

    /// Sweeping the heading until a line sensor fires.
    FindLine,
}

impl BehaviorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorState::FollowLine => "FOLLOW_LINE",
            BehaviorState::AvoidObstacle => "AVOID_OBSTACLE",
            BehaviorState::FindLine => "FIND_LINE",
        }
    }

    /// True if the machine may move from `self` to `next` in one tick.
    pub fn can_transition_to(&self, next: BehaviorState) -> bool {
        use BehaviorState::*;
        matches!(
            (self, next),
            (FollowLine, FollowLine)
                | (FollowLine, AvoidObstacle)
                | (AvoidObstacle, AvoidObstacle)
                | (AvoidObstacle, FindLine)
                | (FindLine, FindLine)
                | (FindLine, FollowLine)
        )
    }
}

impl std::fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the state machine did during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorEvent {
    /// PID step applied to the heading.
    Followed { steering: f64 },

    /// Obstacle detector tripped; steering deferred.
    ObstacleDetected,

    /// Avoidance turn found a clear heading.
    Cleared,

    /// Avoidance turn still points into an obstacle.
    StillBlocked,

    /// A line sensor fired during the search sweep.
    LineFound,

    /// No line sensor fired; heading swept further.
    Searching,
}

impl BehaviorEvent {
    /// State the machine is in after this event.
    pub fn next_state(&self) -> BehaviorState {
        match self {
            BehaviorEvent::Followed { .. } | BehaviorEvent::LineFound => BehaviorState::FollowLine,
            BehaviorEvent::ObstacleDetected | BehaviorEvent::StillBlocked => {
                BehaviorState::AvoidObstacle
            }
            BehaviorEvent::Cleared | BehaviorEvent::Searching => BehaviorState::FindLine,
        }
    }

    /// Steering applied this tick, if the controller ran.
    pub fn steering(&self) -> Option<f64> {
        match self {
            BehaviorEvent::Followed { steering } => Some(*steering),
            _ => None,
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> String {
        match self {
            BehaviorEvent::Followed { steering } => {
                format!("Following line, steering {:.2}", steering)
            }
            BehaviorEvent::ObstacleDetected => "Obstacle detected, avoiding".to_string(),
            BehaviorEvent::Cleared => "Cleared obstacle, searching for line".to_string(),
            BehaviorEvent::StillBlocked => "Still avoiding obstacle".to_string(),
            BehaviorEvent::LineFound => "Line found, resuming line following".to_string(),
            BehaviorEvent::Searching => "Searching for line".to_string(),
        }
    }
}
