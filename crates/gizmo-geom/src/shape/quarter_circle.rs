// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Quarter-circle wedge, the geometry behind curved pipes.
//!
//! Local layout: the wedge corner sits at the local origin and the arc runs
//! from `(r, 0)` to `(0, r)`. The shape never takes part in a general
//! separating-axis test itself; collision code swaps it for one of two
//! stand-ins depending on where the other shape is:
//! - [`approximate_circle`]: the full circle through the arc, centred on the
//!   corner (used when the other shape's centre is inside the wedge);
//! - [`approximate_rectangle`]: a square with half-extent `r / 2` covering
//!   the wedge's bounding box (used otherwise).

use crate::math::Vector2;
use crate::shape::{Geometry, Shape};
use crate::types::transform::Transform;

/// Quarter-circle geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuarterCircle {
    radius: f64,
}

impl QuarterCircle {
    pub(crate) const fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Arc radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Local vertices: corner, first arc end, second arc end.
    pub fn local_vertices(&self) -> [Vector2; 3] {
        [Vector2::ZERO, Vector2::new(self.radius, 0.0), Vector2::new(0.0, self.radius)]
    }

    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self::new(self.radius * factor)
    }
}

/// World vertices: corner, first arc end, second arc end.
pub(crate) fn world_vertices(qc: &QuarterCircle, t: &Transform) -> [Vector2; 3] {
    qc.local_vertices().map(|v| t.transform(v))
}

/// Returns `true` if `point` lies inside the (infinite) wedge bounded by the
/// two radius edges.
pub(crate) fn in_wedge(qc: &QuarterCircle, t: &Transform, point: Vector2) -> bool {
    let [corner, end1, end2] = world_vertices(qc, t);
    let e1 = corner.to(&end1);
    let e2 = corner.to(&end2);
    let p = corner.to(&point);
    e1.cross(&p) >= 0.0 && p.cross(&e2) >= 0.0
}

/// Full circle centred on the wedge corner.
pub(crate) fn approximate_circle(qc: &QuarterCircle, t: &Transform) -> Shape {
    let mut circle_t = *t;
    circle_t.set_translation(t.transform(Vector2::ZERO));
    Shape::from_parts(Geometry::circle(qc.radius), circle_t)
}

/// Square of half-extent `r / 2` centred at local `(r / 2, r / 2)`.
pub(crate) fn approximate_rectangle(qc: &QuarterCircle, t: &Transform) -> Shape {
    let half = qc.radius * 0.5;
    let mut rect_t = *t;
    rect_t.set_translation(t.transform(Vector2::new(half, half)));
    Shape::from_parts(Geometry::rectangle(qc.radius, qc.radius), rect_t)
}
