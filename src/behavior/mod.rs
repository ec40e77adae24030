//! Behavior layer: follow line, avoid obstacle, find line.

mod machine;
mod state;

pub use machine::{BehaviorConfig, BehaviorInput, BehaviorMachine};
pub use state::{BehaviorEvent, BehaviorState};
