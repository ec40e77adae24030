//! Seeded random obstacle placement near the line.
//!
//! Obstacles are anchored on a randomly chosen waypoint and pushed off it by
//! an integer offset in `[-OFFSET_RANGE, OFFSET_RANGE]` on both axes. Offsets
//! whose axes are both smaller than `MIN_OFFSET` in magnitude are redrawn so
//! nothing lands directly on the line.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::obstacle::Obstacle;
use super::path::LinePath;
use crate::error::{ensure_finite, RekhaError, Result};

/// Largest absolute offset drawn on either axis.
pub const OFFSET_RANGE: i32 = 10;

/// Offsets with both `|dx| < MIN_OFFSET` and `|dy| < MIN_OFFSET` are rejected.
pub const MIN_OFFSET: i32 = 2;

/// Smallest obstacle size produced by the generator.
pub const MIN_GENERATED_SIZE: f64 = 1.0;

/// Where a generated obstacle came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Index of the anchor waypoint
    pub anchor: usize,
    /// Integer offset from the anchor
    pub offset: (i32, i32),
    /// The resulting obstacle
    pub obstacle: Obstacle,
}

/// Places obstacles around a line path from a seeded RNG.
#[derive(Clone)]
pub struct ObstacleGenerator {
    rng: SmallRng,
}

impl ObstacleGenerator {
    /// Placement sequence for `seed`; a zero seed draws from OS entropy, so
    /// layouts differ between runs.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: match seed {
                0 => SmallRng::from_entropy(),
                s => SmallRng::seed_from_u64(s),
            },
        }
    }

    /// Draw `count` obstacles around `path` with sizes uniform in
    /// `[1, max_size]`.
    pub fn generate(
        &mut self,
        path: &LinePath,
        count: usize,
        max_size: f64,
    ) -> Result<Vec<Placement>> {
        ensure_finite("max obstacle size", max_size)?;
        if max_size < MIN_GENERATED_SIZE {
            return Err(RekhaError::Configuration(format!(
                "max obstacle size must be at least {}, got {}",
                MIN_GENERATED_SIZE, max_size
            )));
        }

        (0..count)
            .map(|_| {
                let anchor = self.rng.gen_range(0..path.len());
                let offset = self.draw_offset();
                let size = self.rng.gen_range(MIN_GENERATED_SIZE..=max_size);
                let position = path.waypoints()[anchor].offset(offset.0 as f64, offset.1 as f64);
                Ok(Placement {
                    anchor,
                    offset,
                    obstacle: Obstacle::new(position, size)?,
                })
            })
            .collect()
    }

    fn draw_offset(&mut self) -> (i32, i32) {
        loop {
            let dx = self.rng.gen_range(-OFFSET_RANGE..=OFFSET_RANGE);
            let dy = self.rng.gen_range(-OFFSET_RANGE..=OFFSET_RANGE);
            if dx.abs() >= MIN_OFFSET || dy.abs() >= MIN_OFFSET {
                return (dx, dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_seed() {
        let path = LinePath::default();
        let a = ObstacleGenerator::new(42).generate(&path, 20, 2.0).unwrap();
        let b = ObstacleGenerator::new(42).generate(&path, 20, 2.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_offsets_avoid_line() {
        let path = LinePath::default();
        let placements = ObstacleGenerator::new(7).generate(&path, 500, 3.0).unwrap();
        assert_eq!(placements.len(), 500);
        for p in &placements {
            let (dx, dy) = p.offset;
            assert!(dx.abs() <= OFFSET_RANGE && dy.abs() <= OFFSET_RANGE);
            assert!(!(dx.abs() < MIN_OFFSET && dy.abs() < MIN_OFFSET));
            let size = p.obstacle.size();
            assert!((MIN_GENERATED_SIZE..=3.0).contains(&size));
            let anchor = path.waypoints()[p.anchor];
            assert_eq!(
                p.obstacle.position(),
                anchor.offset(dx as f64, dy as f64)
            );
        }
    }

    #[test]
    fn test_unit_max_size_gives_unit_obstacles() {
        let path = LinePath::default();
        let placements = ObstacleGenerator::new(3).generate(&path, 10, 1.0).unwrap();
        assert!(placements.iter().all(|p| p.obstacle.size() == 1.0));
    }

    #[test]
    fn test_rejects_small_max_size() {
        let path = LinePath::default();
        let err = ObstacleGenerator::new(1).generate(&path, 1, 0.5).unwrap_err();
        assert!(matches!(err, RekhaError::Configuration(_)));
    }

    #[test]
    fn test_zero_count() {
        let path = LinePath::default();
        assert!(ObstacleGenerator::new(1).generate(&path, 0, 2.0).unwrap().is_empty());
    }
}
