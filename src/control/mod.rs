//! Line-following control.

mod pid;

pub use pid::{PidController, PidGains};
