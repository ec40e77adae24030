//! Point type for the simulation plane.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// World coordinates (unitless plane, f64)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point shifted by (dx, dy)
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> WorldPoint {
        WorldPoint::new(self.x + dx, self.y + dy)
    }

    /// True if both coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for WorldPoint {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        WorldPoint::new(x, y)
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_offset_and_ops() {
        let p = WorldPoint::new(1.0, 2.0).offset(-1.0, 0.5);
        assert_eq!(p, WorldPoint::new(0.0, 2.5));
        assert_eq!(p + WorldPoint::new(1.0, 1.0), WorldPoint::new(1.0, 3.5));
        assert_eq!(p - p, WorldPoint::ZERO);
    }

    #[test]
    fn test_from_tuple() {
        let p: WorldPoint = (2.0, -3.0).into();
        assert_eq!(p, WorldPoint::new(2.0, -3.0));
        assert!(p.is_finite());
        assert!(!WorldPoint::new(f64::NAN, 0.0).is_finite());
    }
}
