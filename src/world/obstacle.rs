//! Circular obstacles placed in the simulation plane.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::error::{ensure_finite, RekhaError, Result};

/// A static circular hazard.
///
/// Created once during setup and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Obstacle {
    position: WorldPoint,
    size: f64,
}

impl Obstacle {
    /// Create an obstacle, rejecting negative or non-finite sizes.
    pub fn new(position: WorldPoint, size: f64) -> Result<Self> {
        if !position.is_finite() {
            return Err(RekhaError::Configuration(format!(
                "obstacle position must be finite, got ({}, {})",
                position.x, position.y
            )));
        }
        ensure_finite("obstacle size", size)?;
        if size < 0.0 {
            return Err(RekhaError::Configuration(format!(
                "obstacle size must be non-negative, got {}",
                size
            )));
        }
        Ok(Self { position, size })
    }

    /// Obstacle center.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Obstacle radius.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// True if `query` lies strictly closer than `size + threshold`.
    #[inline]
    pub fn is_in_path(&self, query: WorldPoint, threshold: f64) -> bool {
        self.position.distance(&query) < self.size + threshold
    }
}

/// True if any obstacle reports `query` within `threshold` of its edge.
pub fn any_in_path(obstacles: &[Obstacle], query: WorldPoint, threshold: f64) -> bool {
    obstacles.iter().any(|o| o.is_in_path(query, threshold))
}

/// Explicit obstacle entry as written in a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ObstacleSpec {
    pub position: WorldPoint,
    #[serde(default = "default_obstacle_size")]
    pub size: f64,
}

fn default_obstacle_size() -> f64 {
    1.0
}

impl TryFrom<ObstacleSpec> for Obstacle {
    type Error = RekhaError;

    fn try_from(spec: ObstacleSpec) -> Result<Self> {
        Obstacle::new(spec.position, spec.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_path_inside() {
        let o = Obstacle::new(WorldPoint::new(0.0, 0.0), 1.0).unwrap();
        assert!(o.is_in_path(WorldPoint::new(0.5, 0.0), 0.0));
        assert!(o.is_in_path(WorldPoint::new(3.5, 0.0), 3.0));
    }

    #[test]
    fn test_in_path_boundary_is_exclusive() {
        let o = Obstacle::new(WorldPoint::new(0.0, 0.0), 2.0).unwrap();
        // distance 5 == size + threshold
        assert!(!o.is_in_path(WorldPoint::new(3.0, 4.0), 3.0));
        assert!(o.is_in_path(WorldPoint::new(3.0, 3.99), 3.0));
    }

    #[test]
    fn test_zero_size_zero_threshold_never_hits() {
        let o = Obstacle::new(WorldPoint::new(1.0, 1.0), 0.0).unwrap();
        assert!(!o.is_in_path(WorldPoint::new(1.0, 1.0), 0.0));
    }

    #[test]
    fn test_rejects_negative_size() {
        let err = Obstacle::new(WorldPoint::ZERO, -0.1).unwrap_err();
        assert!(matches!(err, RekhaError::Configuration(_)));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Obstacle::new(WorldPoint::ZERO, f64::INFINITY).is_err());
        assert!(Obstacle::new(WorldPoint::new(f64::NAN, 0.0), 1.0).is_err());
    }

    #[test]
    fn test_any_in_path() {
        let obstacles = vec![
            Obstacle::new(WorldPoint::new(10.0, 0.0), 1.0).unwrap(),
            Obstacle::new(WorldPoint::new(0.0, 10.0), 1.0).unwrap(),
        ];
        assert!(any_in_path(&obstacles, WorldPoint::new(0.0, 8.5), 1.0));
        assert!(!any_in_path(&obstacles, WorldPoint::ZERO, 3.0));
        assert!(!any_in_path(&[], WorldPoint::ZERO, 100.0));
    }
}
