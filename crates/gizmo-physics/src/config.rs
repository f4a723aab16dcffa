// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simulation tuning threaded through [`World`](crate::World) construction.

use gizmo_geom::math::deg_to_rad;
use gizmo_geom::Vector2;

/// Solver and gizmo tuning for one world.
///
/// Every field has a default; with the `serde` feature a partial JSON object
/// fills the rest from [`SimulationConfig::default`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Gravity acceleration applied to every dynamic body.
    pub gravity: Vector2,
    /// Ticks per second; `dt = 1 / tick_rate`.
    pub tick_rate: u32,
    /// Velocity and position iteration count.
    pub iterations: u32,
    /// Allowed penetration before position correction kicks in.
    pub linear_tolerance: f64,
    /// Largest position correction applied per contact per iteration.
    pub max_linear_correction: f64,
    /// Fraction of the penetration removed per position iteration.
    pub baumgarte: f64,
    /// Largest distance a body may travel in one tick.
    pub max_translation: f64,
    /// Largest angle (radians) a body may turn in one tick.
    pub max_rotation: f64,
    /// Seed each tick's contacts with last tick's accumulated impulses.
    pub warm_starting: bool,
    /// Flipper kinematics.
    pub flipper: FlipperConfig,
    /// Black-hole attraction.
    pub black_hole: BlackHoleConfig,
    /// Curved-pipe assistance.
    pub curved_pipe: CurvedPipeConfig,
}

impl SimulationConfig {
    /// Fixed time step in seconds.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vector2::new(0.0, -9.8),
            tick_rate: 60,
            iterations: 25,
            linear_tolerance: 0.05,
            max_linear_correction: 1.0,
            baumgarte: 1.0,
            max_translation: 2.0,
            max_rotation: core::f64::consts::FRAC_PI_2,
            warm_starting: true,
            flipper: FlipperConfig::default(),
            black_hole: BlackHoleConfig::default(),
            curved_pipe: CurvedPipeConfig::default(),
        }
    }
}

/// Flipper swing parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlipperConfig {
    /// Raised angle cap in radians.
    pub max_angle: f64,
    /// Angle advanced per tick while swinging, in radians.
    pub step: f64,
}

impl Default for FlipperConfig {
    fn default() -> Self {
        Self { max_angle: deg_to_rad(30.0), step: deg_to_rad(6.0) }
    }
}

/// Black-hole pull parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlackHoleConfig {
    /// Balls farther than this from the hole centre feel no pull.
    pub range: f64,
    /// Pull magnitude at unit distance per unit ball mass.
    pub strength: f64,
}

impl Default for BlackHoleConfig {
    fn default() -> Self {
        Self { range: 3.0, strength: 4.0 }
    }
}

/// Curved-pipe parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurvedPipeConfig {
    /// Speed a ball is boosted to while travelling inside the channel.
    pub min_speed: f64,
}

impl Default for CurvedPipeConfig {
    fn default() -> Self {
        Self { min_speed: 2.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_tuning() {
        let c = SimulationConfig::default();
        assert_eq!(c.gravity, Vector2::new(0.0, -9.8));
        assert_eq!(c.tick_rate, 60);
        assert_eq!(c.iterations, 25);
        assert!((c.dt() - 1.0 / 60.0).abs() < 1e-15);
        assert!((c.flipper.max_angle - deg_to_rad(30.0)).abs() < 1e-15);
        assert!(c.warm_starting);
    }
}
