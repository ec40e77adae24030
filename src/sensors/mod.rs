//! Virtual line sensors and obstacle detector.
//!
//! The robot carries three downward-facing line sensors and one forward
//! obstacle detector, all synthesised from geometry:
//!
//! - **center**: proximity of the robot position to its nearest waypoint
//! - **left / right**: proximity of probes offset along x to the waypoints
//!   in a bounded window around the nearest waypoint
//! - **obstacle_detector**: any obstacle within the detection threshold
//!
//! Proximity maps a distance `d` to `max(0, 1 - d / falloff)`, so a sensor
//! reads 1.0 exactly on a waypoint and 0.0 at `falloff` or further away.
//!
//! The windowed search for the side probes keeps per-tick cost constant in
//! path length; the robot moves continuously along the line so the window
//! around the nearest waypoint covers everything the probes can see.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::error::{ensure_finite, RekhaError, Result};
use crate::world::{any_in_path, LinePath, Obstacle};

/// Configuration for the sensor array.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Lateral offset of the left/right probes from the robot position
    pub probe_offset: f64,
    /// Waypoints searched on each side of the nearest one for side probes
    pub window_radius: usize,
    /// Distance at which a line sensor reads zero
    pub falloff: f64,
    /// Extra clearance around obstacles that trips the detector
    pub obstacle_threshold: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            probe_offset: 1.0,
            window_radius: 5,
            falloff: 2.0,
            obstacle_threshold: 3.0,
        }
    }
}

impl SensorConfig {
    /// Check that the configuration yields scores in [0, 1].
    pub fn validate(&self) -> Result<()> {
        ensure_finite("sensor probe offset", self.probe_offset)?;
        ensure_finite("sensor falloff", self.falloff)?;
        ensure_finite("obstacle threshold", self.obstacle_threshold)?;
        if self.falloff <= 0.0 {
            return Err(RekhaError::Configuration(format!(
                "sensor falloff must be positive, got {}",
                self.falloff
            )));
        }
        Ok(())
    }
}

/// One tick's worth of sensor output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SensorReadings {
    pub left: f64,
    pub center: f64,
    pub right: f64,
    pub obstacle_detector: bool,
}

impl SensorReadings {
    /// True if any line sensor reads strictly above `threshold`.
    #[inline]
    pub fn any_line_above(&self, threshold: f64) -> bool {
        self.left > threshold || self.center > threshold || self.right > threshold
    }

    /// Left minus right; positive when the line is more to the left.
    #[inline]
    pub fn asymmetry(&self) -> f64 {
        self.left - self.right
    }
}

/// Convert a distance into a line-sensor score in [0, 1].
#[inline]
pub fn proximity_score(distance: f64, falloff: f64) -> f64 {
    (1.0 - distance / falloff).clamp(0.0, 1.0)
}

/// Sensor model reading the static world from a robot position.
#[derive(Clone, Debug, Default)]
pub struct SensorArray {
    config: SensorConfig,
}

impl SensorArray {
    pub fn new(config: SensorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Sample all sensors at `position`.
    pub fn read(
        &self,
        position: WorldPoint,
        path: &LinePath,
        obstacles: &[Obstacle],
    ) -> SensorReadings {
        let cfg = &self.config;
        let closest_idx = path.nearest_point(position);
        let closest = path.waypoints()[closest_idx];

        let center = proximity_score(position.distance(&closest), cfg.falloff);

        let left_probe = position.offset(-cfg.probe_offset, 0.0);
        let right_probe = position.offset(cfg.probe_offset, 0.0);
        let left_dist = path.min_distance_in_window(left_probe, closest_idx, cfg.window_radius);
        let right_dist = path.min_distance_in_window(right_probe, closest_idx, cfg.window_radius);

        SensorReadings {
            left: proximity_score(left_dist, cfg.falloff),
            center,
            right: proximity_score(right_dist, cfg.falloff),
            obstacle_detector: any_in_path(obstacles, position, cfg.obstacle_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_path() -> LinePath {
        LinePath::new((0..20).map(|i| WorldPoint::new(i as f64, 0.0)).collect()).unwrap()
    }

    #[test]
    fn test_proximity_score_range() {
        assert_eq!(proximity_score(0.0, 2.0), 1.0);
        assert_relative_eq!(proximity_score(1.0, 2.0), 0.5);
        assert_eq!(proximity_score(2.0, 2.0), 0.0);
        assert_eq!(proximity_score(50.0, 2.0), 0.0);
    }

    #[test]
    fn test_center_is_one_on_waypoint() {
        let path = LinePath::default();
        let sensors = SensorArray::default();
        for &wp in path.waypoints() {
            let r = sensors.read(wp, &path, &[]);
            assert_eq!(r.center, 1.0);
        }
    }

    #[test]
    fn test_side_probes_on_straight_line() {
        let path = straight_path();
        let r = SensorArray::default().read(WorldPoint::new(5.0, 0.0), &path, &[]);
        // both probes sit exactly on neighbouring waypoints
        assert_eq!(r.left, 1.0);
        assert_eq!(r.right, 1.0);
        assert_eq!(r.asymmetry(), 0.0);
    }

    #[test]
    fn test_side_probe_at_path_end() {
        let path = straight_path();
        let r = SensorArray::default().read(WorldPoint::new(19.0, 0.0), &path, &[]);
        assert_eq!(r.left, 1.0);
        // right probe at x=20 is one unit past the last waypoint
        assert_relative_eq!(r.right, 0.5);
        assert!(r.asymmetry() > 0.0);
    }

    #[test]
    fn test_far_from_line_reads_zero() {
        let path = straight_path();
        let r = SensorArray::default().read(WorldPoint::new(5.0, 10.0), &path, &[]);
        assert_eq!(r.left, 0.0);
        assert_eq!(r.center, 0.0);
        assert_eq!(r.right, 0.0);
        assert!(!r.any_line_above(0.5));
    }

    #[test]
    fn test_obstacle_detector_threshold() {
        let path = straight_path();
        let sensors = SensorArray::default();
        let near = Obstacle::new(WorldPoint::new(5.0, 3.5), 1.0).unwrap();
        let far = Obstacle::new(WorldPoint::new(5.0, 4.0), 1.0).unwrap();
        assert!(sensors.read(WorldPoint::new(5.0, 0.0), &path, &[near]).obstacle_detector);
        assert!(!sensors.read(WorldPoint::new(5.0, 0.0), &path, &[far]).obstacle_detector);
        assert!(sensors.read(WorldPoint::new(5.0, 0.0), &path, &[far, near]).obstacle_detector);
    }

    #[test]
    fn test_side_window_excludes_far_end() {
        // waypoint 5 sits right under the left probe but is past the window
        let path = LinePath::new(
            [(0.0, 0.0), (100.0, 0.0), (100.0, 1.0), (100.0, 2.0), (100.0, 3.0), (-1.0, 0.0)]
                .into_iter()
                .map(WorldPoint::from)
                .collect(),
        )
        .unwrap();
        let sensors = SensorArray::default();
        assert_eq!(sensors.config().window_radius, 5);

        let r = sensors.read(WorldPoint::ZERO, &path, &[]);
        assert_eq!(r.center, 1.0);
        assert_relative_eq!(r.left, 0.5);
        assert_relative_eq!(r.right, 0.5);
    }

    #[test]
    fn test_validate_rejects_zero_falloff() {
        let cfg = SensorConfig {
            falloff: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        assert!(SensorConfig::default().validate().is_ok());
    }
}
