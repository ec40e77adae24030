//! Heading-to-displacement models and the per-tick motion integrator.
//!
//! `direction` is in degrees and is never wrapped.
//!
//! The default [`HeadingModel::Linear`] maps heading to displacement linearly
//! in `direction / 360`:
//!
//! ```text
//! travel:  dx = d * dir/360    dy = d * (1 - |dir|/360)
//! project: dx = d * dir/360    dy = d * (1 - dir/360)
//! ```
//!
//! `travel` moves the robot each tick, `project` places the look-ahead probe
//! of the avoidance maneuver. The two differ only in the `abs` on the y term,
//! and trajectories depend on that difference, so both are kept as is.
//!
//! [`HeadingModel::Trigonometric`] is an opt-in variant with heading 0 along
//! +y and positive headings turning toward +x.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;

/// Mapping from heading to displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingModel {
    /// Linear in `direction / 360`
    #[default]
    Linear,
    /// `sin`/`cos` of the heading in degrees
    Trigonometric,
}

impl HeadingModel {
    /// Displacement for driving `distance` along `direction`.
    pub fn travel(&self, direction: f64, distance: f64) -> WorldPoint {
        match self {
            HeadingModel::Linear => WorldPoint::new(
                distance * (direction / 360.0),
                distance * (1.0 - direction.abs() / 360.0),
            ),
            HeadingModel::Trigonometric => Self::polar(direction, distance),
        }
    }

    /// Displacement of a look-ahead probe `distance` along `direction`.
    pub fn project(&self, direction: f64, distance: f64) -> WorldPoint {
        match self {
            HeadingModel::Linear => WorldPoint::new(
                distance * (direction / 360.0),
                distance * (1.0 - direction / 360.0),
            ),
            HeadingModel::Trigonometric => Self::polar(direction, distance),
        }
    }

    #[inline]
    fn polar(direction: f64, distance: f64) -> WorldPoint {
        let rad = direction.to_radians();
        WorldPoint::new(distance * rad.sin(), distance * rad.cos())
    }
}

/// Advances position by one tick of travel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionIntegrator {
    model: HeadingModel,
}

impl MotionIntegrator {
    pub fn new(model: HeadingModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> HeadingModel {
        self.model
    }

    /// New position after one tick at `speed` along `direction`.
    #[inline]
    pub fn advance(&self, position: WorldPoint, direction: f64, speed: f64) -> WorldPoint {
        position + self.model.travel(direction, speed)
    }
}
