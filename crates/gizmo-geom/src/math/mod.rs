// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scalar helpers and the 2D vector type used throughout the engine.
//!
//! All math is `f64`. Degenerate magnitudes are detected against
//! [`epsilon`], the machine unit round-off, rather than a hand-picked
//! tolerance.

use once_cell::sync::Lazy;
use std::f64::consts::TAU;

mod vector2;

pub use vector2::Vector2;

static EPSILON: Lazy<f64> = Lazy::new(compute_epsilon);

fn compute_epsilon() -> f64 {
    let mut e = 0.5_f64;
    while 1.0 + e > 1.0 {
        e *= 0.5;
    }
    e
}

/// Machine unit round-off, computed once by halving until `1 + e == 1`.
///
/// Used wherever a magnitude or determinant comparison could otherwise divide
/// by zero.
pub fn epsilon() -> f64 {
    *EPSILON
}

/// Clamps `value` to the inclusive `[min, max]` range.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Converts degrees to radians.
pub fn deg_to_rad(value: f64) -> f64 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees.
pub fn rad_to_deg(value: f64) -> f64 {
    value * (360.0 / TAU)
}
