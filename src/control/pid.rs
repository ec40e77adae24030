//! PID steering controller for line following.
//!
//! The error signal is the left/right sensor asymmetry. The controller runs
//! once per follow-line tick with no time scaling: the integral is a plain
//! running sum and the derivative a plain difference of consecutive errors.
//! The integral is never clamped or reset by the tick loop.

use serde::Deserialize;

use crate::error::{ensure_finite, Result};

/// Controller gains.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PidGains {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 0.5,
            ki: 0.01,
            kd: 0.2,
        }
    }
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("kp", self.kp)?;
        ensure_finite("ki", self.ki)?;
        ensure_finite("kd", self.kd)
    }
}

/// PID controller turning sensor asymmetry into a heading correction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PidController {
    gains: PidGains,
    integral: f64,
    previous_error: f64,
}

impl PidController {
    /// Create a controller with zeroed memory.
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            integral: 0.0,
            previous_error: 0.0,
        }
    }

    /// Run one control step and return the steering correction (degrees).
    pub fn step(&mut self, left: f64, right: f64) -> f64 {
        let error = left - right;
        self.integral += error;
        let derivative = error - self.previous_error;

        let steering =
            self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative;

        self.previous_error = error;
        steering
    }

    /// Zero the integral and derivative memory.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = 0.0;
    }

    #[inline]
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    #[inline]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    #[inline]
    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }
}
