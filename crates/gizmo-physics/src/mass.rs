// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::f64::consts::PI;

use gizmo_geom::{epsilon, Geometry, Shape, Vector2};

/// Mass properties of a body.
///
/// `center` is the centre of mass in the shape's local frame. Immovable bodies
/// carry zero inverse mass and inertia so the solver treats every body the
/// same way.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mass {
    center: Vector2,
    mass: f64,
    inertia: f64,
    inv_mass: f64,
    inv_inertia: f64,
}

impl Mass {
    /// Creates mass properties; non-positive `mass` or `inertia` yields a zero inverse.
    pub fn new(center: Vector2, mass: f64, inertia: f64) -> Self {
        let inv_mass = if mass > epsilon() { 1.0 / mass } else { 0.0 };
        let inv_inertia = if inertia > epsilon() { 1.0 / inertia } else { 0.0 };
        Self { center, mass: mass.max(0.0), inertia: inertia.max(0.0), inv_mass, inv_inertia }
    }

    /// Immovable body centred on `center`.
    pub const fn infinite(center: Vector2) -> Self {
        Self { center, mass: 0.0, inertia: 0.0, inv_mass: 0.0, inv_inertia: 0.0 }
    }

    /// Uniform-density mass of `shape`.
    pub fn from_shape(shape: &Shape, density: f64) -> Self {
        match shape.geometry() {
            Geometry::Circle(c) => {
                let r = c.radius();
                let m = density * PI * r * r;
                Self::new(Vector2::ZERO, m, m * r * r * 0.5)
            }
            Geometry::Polygon(p) => {
                Self::new(Vector2::ZERO, density * p.area(), density * p.polar_moment())
            }
            Geometry::QuarterCircle(q) => {
                let r = q.radius();
                let m = density * PI * r * r * 0.25;
                let c = 4.0 * r / (3.0 * PI);
                // Parallel-axis shift from the corner to the centroid.
                let inertia = m * r * r * 0.5 - m * 2.0 * c * c;
                Self::new(Vector2::new(c, c), m, inertia)
            }
        }
    }

    /// Local centre of mass.
    pub fn center(&self) -> Vector2 {
        self.center
    }

    /// Mass; zero when immovable.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Rotational inertia about the centre of mass.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Inverse mass.
    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    /// Inverse inertia.
    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    /// `true` when neither translation nor rotation responds to impulses.
    pub fn is_infinite(&self) -> bool {
        self.inv_mass == 0.0 && self.inv_inertia == 0.0
    }
}
