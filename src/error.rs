//! Error types for RekhaNav

use thiserror::Error;

/// RekhaNav error type
#[derive(Error, Debug)]
pub enum RekhaError {
    /// A line path was built from zero waypoints
    #[error("Path has no waypoints")]
    EmptyPath,

    /// A construction-time precondition was violated
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for RekhaError {
    fn from(e: toml::de::Error) -> Self {
        RekhaError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RekhaError>;

/// Fail with [`RekhaError::Configuration`] unless `value` is finite.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RekhaError::Configuration(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}
