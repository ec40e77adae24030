//! Core geometric types.

mod point;

pub use point::WorldPoint;
