// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Convex queries for circles. The circle's centre is its local origin.

use crate::math::Vector2;
use crate::types::aabb::Aabb;
use crate::types::interval::Interval;
use crate::types::transform::Transform;

/// Circle geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    /// Creates a circle of `radius`; the caller guarantees `radius > 0`.
    pub(crate) const fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Radius in world units.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self::new(self.radius * factor)
    }
}

pub(crate) fn aabb(circle: &Circle, t: &Transform) -> Aabb {
    let c = t.translation();
    Aabb::from_center_half_extents(c, circle.radius, circle.radius)
}

pub(crate) fn project(circle: &Circle, t: &Transform, axis: Vector2) -> Interval {
    let c = t.translation().dot(&axis);
    Interval::new(c - circle.radius, c + circle.radius)
}

/// One axis per focus: from the focus towards this circle's centre.
pub(crate) fn axes(t: &Transform, foci: &[Vector2]) -> Vec<Vector2> {
    let center = t.translation();
    foci.iter().map(|f| f.to(&center).normalized()).collect()
}

pub(crate) fn farthest_point(circle: &Circle, t: &Transform, direction: Vector2) -> Vector2 {
    t.translation() + direction.normalized().scale(circle.radius)
}
