// SPDX-License-Identifier: MIT OR Apache-2.0
//! Damped-spring motion evaluated in closed form.
//!
//! The spring is the unit step response of a damped harmonic oscillator: it
//! starts at 0 with the configured initial velocity and settles at 1. Every
//! evaluation is a pure function of the elapsed frame count, so the same frame
//! always yields the same value no matter the evaluation order.

use crate::error::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};

/// Damping ratios this close to 1 use the critically damped solution
const CRITICAL_EPSILON: f64 = 1e-9;

/// Upper bound for [`SpringConfig::settle_frame`] in seconds
const MAX_SETTLE_SECS: f64 = 600.0;

/// Physical parameters of a spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Mass (> 0)
    pub mass: f64,
    /// Stiffness (> 0)
    pub stiffness: f64,
    /// Damping coefficient (>= 0)
    pub damping: f64,
    /// Velocity at the start, in displacement units per second
    pub initial_velocity: f64,
    /// Never report values past the target
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            initial_velocity: 0.0,
            overshoot_clamping: false,
        }
    }
}

/// Which closed-form solution applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DampingRegime {
    /// Oscillates while settling
    Underdamped,
    /// Fastest settle without oscillation
    Critical,
    /// Settles without oscillation, slower than critical
    Overdamped,
}

impl SpringConfig {
    /// Create a spring from its coefficients
    pub fn new(mass: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Set the initial velocity
    pub fn with_initial_velocity(mut self, velocity: f64) -> Self {
        self.initial_velocity = velocity;
        self
    }

    /// Enable or disable overshoot clamping
    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Check the coefficients
    pub fn validate(&self) -> Result<()> {
        let invalid = |parameter, value| Err(ConfigurationError::InvalidSpring { parameter, value });
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return invalid("mass", self.mass);
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return invalid("stiffness", self.stiffness);
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return invalid("damping", self.damping);
        }
        if !self.initial_velocity.is_finite() {
            return invalid("initial_velocity", self.initial_velocity);
        }
        Ok(())
    }

    /// Damping ratio `c / (2 * sqrt(m * k))`
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.mass * self.stiffness).sqrt())
    }

    /// The regime selected by the damping ratio
    pub fn regime(&self) -> DampingRegime {
        let zeta = self.damping_ratio();
        if (zeta - 1.0).abs() < CRITICAL_EPSILON {
            DampingRegime::Critical
        } else if zeta < 1.0 {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }

    /// First frame after which the spring stays within `threshold` of the
    /// target for a full second of frames. `None` if it never settles within
    /// ten minutes.
    pub fn settle_frame(&self, fps: f64, threshold: f64) -> Result<Option<u64>> {
        self.validate()?;
        validate_fps(fps)?;

        let window = fps.ceil().max(1.0) as u64;
        let max_frames = (fps * MAX_SETTLE_SECS).ceil() as u64;
        let mut run_start: Option<u64> = None;

        for frame in 0..=max_frames {
            let value = self.value_at_secs(frame as f64 / fps);
            if (value - 1.0).abs() <= threshold {
                let start = *run_start.get_or_insert(frame);
                if frame - start + 1 >= window {
                    return Ok(Some(start));
                }
            } else {
                run_start = None;
            }
        }
        Ok(None)
    }

    /// Displacement at `t` seconds; coefficients already validated
    fn value_at_secs(&self, t: f64) -> f64 {
        let omega0 = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping_ratio();
        let x0 = -1.0;
        let v0 = self.initial_velocity;

        let offset = match self.regime() {
            DampingRegime::Underdamped => {
                let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
                let envelope = (-zeta * omega0 * t).exp();
                envelope
                    * (x0 * (omega_d * t).cos()
                        + (v0 + zeta * omega0 * x0) / omega_d * (omega_d * t).sin())
            }
            DampingRegime::Critical => (x0 + (v0 + omega0 * x0) * t) * (-omega0 * t).exp(),
            DampingRegime::Overdamped => {
                let root = (zeta * zeta - 1.0).sqrt();
                let r1 = -omega0 * (zeta - root);
                let r2 = -omega0 * (zeta + root);
                let c2 = (v0 - r1 * x0) / (r2 - r1);
                let c1 = x0 - c2;
                c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
            }
        };

        let value = 1.0 + offset;
        if self.overshoot_clamping {
            value.min(1.0)
        } else {
            value
        }
    }
}

fn validate_fps(fps: f64) -> Result<()> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidFps(fps))
    }
}

/// Spring displacement after `elapsed_frames`, settling at 1.
///
/// Negative elapsed frames mean the motion has not started and yield 0.
pub fn spring_value(elapsed_frames: f64, fps: f64, config: &SpringConfig) -> Result<f64> {
    config.validate()?;
    validate_fps(fps)?;
    if elapsed_frames < 0.0 {
        return Ok(0.0);
    }
    Ok(config.value_at_secs(elapsed_frames / fps))
}

/// Spring motion mapped from `from` to `to`
pub fn spring_between(
    elapsed_frames: f64,
    fps: f64,
    config: &SpringConfig,
    from: f64,
    to: f64,
) -> Result<f64> {
    let progress = spring_value(elapsed_frames, fps, config)?;
    Ok(from + (to - from) * progress)
}
