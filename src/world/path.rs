//! The line the robot tracks, stored as an ordered list of waypoints.

use crate::core::WorldPoint;
use crate::error::{RekhaError, Result};

/// Number of waypoints in the default zig-zag path.
pub const DEFAULT_PATH_POINTS: usize = 100;

/// Waypoints per zig-zag leg in the default path.
pub const DEFAULT_SEGMENT_LENGTH: usize = 20;

/// Ordered, non-empty sequence of waypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePath {
    waypoints: Vec<WorldPoint>,
}

impl LinePath {
    /// Build a path from waypoints.
    ///
    /// Fails with [`RekhaError::EmptyPath`] for an empty list, so every
    /// constructed path can answer [`nearest_point`](Self::nearest_point).
    pub fn new(waypoints: Vec<WorldPoint>) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(RekhaError::EmptyPath);
        }
        if let Some((i, p)) = waypoints.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(RekhaError::Configuration(format!(
                "waypoint {} is not finite: ({}, {})",
                i, p.x, p.y
            )));
        }
        Ok(Self { waypoints })
    }

    /// Zig-zag path with `points` waypoints one unit apart in x.
    ///
    /// Legs of `segment_length` waypoints alternate between descending from
    /// y = 0 and climbing from y = 10, in steps of 5.
    pub fn zigzag(points: usize, segment_length: usize) -> Result<Self> {
        if segment_length == 0 {
            return Err(RekhaError::Configuration(
                "zig-zag segment length must be positive".to_string(),
            ));
        }
        let waypoints = zigzag_waypoints(points, segment_length);
        Self::new(waypoints)
    }

    /// All waypoints in order.
    #[inline]
    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    /// Number of waypoints (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoint at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<WorldPoint> {
        self.waypoints.get(index).copied()
    }

    /// First waypoint.
    #[inline]
    pub fn start(&self) -> WorldPoint {
        self.waypoints[0]
    }

    /// Index of the waypoint closest to `position`.
    ///
    /// Exhaustive scan; on ties the lowest index wins.
    pub fn nearest_point(&self, position: WorldPoint) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (i, p) in self.waypoints.iter().enumerate() {
            let d = position.distance(p);
            if d < best_dist {
                best_dist = d;
                best_idx = i;
            }
        }
        best_idx
    }

    /// Waypoints with indices in `[center - radius, center + radius)`,
    /// clamped to the valid range. The center waypoint is always included.
    pub fn window(&self, center: usize, radius: usize) -> &[WorldPoint] {
        let len = self.waypoints.len();
        let center = center.min(len - 1);
        let lo = center.saturating_sub(radius);
        let hi = center.saturating_add(radius).clamp(center + 1, len);
        &self.waypoints[lo..hi]
    }

    /// Smallest distance from `probe` to any waypoint in the window around
    /// `center`.
    pub fn min_distance_in_window(&self, probe: WorldPoint, center: usize, radius: usize) -> f64 {
        self.window(center, radius)
            .iter()
            .map(|p| probe.distance(p))
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for LinePath {
    fn default() -> Self {
        Self {
            waypoints: zigzag_waypoints(DEFAULT_PATH_POINTS, DEFAULT_SEGMENT_LENGTH),
        }
    }
}

fn zigzag_waypoints(points: usize, segment_length: usize) -> Vec<WorldPoint> {
    (0..points)
        .map(|i| {
            let leg = i / segment_length;
            let step = (i % segment_length) as f64;
            let odd = (leg % 2) as f64;
            let even = ((leg + 1) % 2) as f64;
            let y = 10.0 * odd + 5.0 * step * odd - 5.0 * step * even;
            WorldPoint::new(i as f64, y)
        })
        .collect()
}
