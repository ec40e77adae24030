//! Static environment: the line to follow and the obstacles around it.

mod generator;
mod obstacle;
mod path;

pub use generator::{ObstacleGenerator, Placement, MIN_OFFSET, OFFSET_RANGE};
pub use obstacle::{any_in_path, Obstacle, ObstacleSpec};
pub use path::{LinePath, DEFAULT_PATH_POINTS, DEFAULT_SEGMENT_LENGTH};
