// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves applied to normalized segment progress.

use serde::{Deserialize, Serialize};

/// Easing applied to the progress inside a keyframe segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Easing {
    /// Identity
    #[default]
    Linear,
    /// Constant (step) until the next keyframe
    Hold,
    /// Cubic ease in
    EaseIn,
    /// Cubic ease out
    EaseOut,
    /// Cubic ease in/out
    EaseInOut,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier {
        /// First control point x (clamped to [0, 1])
        x1: f64,
        /// First control point y
        y1: f64,
        /// Second control point x (clamped to [0, 1])
        x2: f64,
        /// Second control point y
        y2: f64,
    },
}

impl Easing {
    /// Map progress `t` in [0, 1] through the curve.
    pub fn apply(&self, t: f64) -> f64 {
        match *self {
            Easing::Linear => t,
            Easing::Hold => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                let x1 = x1.clamp(0.0, 1.0);
                let x2 = x2.clamp(0.0, 1.0);
                let param = solve_bezier_x(x1, x2, t.clamp(0.0, 1.0));
                eval_cubic(0.0, y1, y2, 1.0, param)
            }
        }
    }
}

/// B(t) = (1-t)^3*p0 + 3*(1-t)^2*t*p1 + 3*(1-t)*t^2*p2 + t^3*p3
fn eval_cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;
    mt2 * mt * p0 + 3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t2 * t * p3
}

fn eval_cubic_derivative(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * (p1 - p0) + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Find the curve parameter whose x equals `target_x`.
/// Newton-Raphson first, bisection if it stalls.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = eval_cubic(0.0, x1, x2, 1.0, t) - target_x;
        if x.abs() < 1e-9 {
            return t;
        }
        let dx = eval_cubic_derivative(0.0, x1, x2, 1.0, t);
        if dx.abs() < 1e-12 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    t = target_x;
    for _ in 0..48 {
        let x = eval_cubic(0.0, x1, x2, 1.0, t);
        if (x - target_x).abs() < 1e-9 {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    t
}
