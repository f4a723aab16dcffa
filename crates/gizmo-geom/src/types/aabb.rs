// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vector2;

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f64` world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vector2,
    max: Vector2,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    pub fn new(min: Vector2, max: Vector2) -> Self {
        assert!(min.x <= max.x && min.y <= max.y, "invalid AABB: min > max");
        Self { min, max }
    }

    /// Returns the minimum corner.
    pub fn min(&self) -> Vector2 {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Vector2 {
        self.max
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy`.
    pub fn from_center_half_extents(center: Vector2, hx: f64, hy: f64) -> Self {
        let he = Vector2::new(hx, hy);
        Self::new(center - he, center + he)
    }

    /// Returns `true` if this AABB overlaps another (inclusive on edges).
    ///
    /// The test is symmetric: `a.overlaps(&b) == b.overlaps(&a)`.
    pub fn overlaps(&self, other: &Self) -> bool {
        // Inclusive so touching boxes still reach the narrow phase, which
        // makes the final (strict) call.
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Vector2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vector2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Grows the box by `m` on every side.
    pub fn inflate(&self, m: f64) -> Self {
        let delta = Vector2::new(m, m);
        Self::new(self.min - delta, self.max + delta)
    }

    /// Builds the minimal AABB that contains all `points`.
    ///
    /// # Panics
    /// Panics if `points` is empty.
    pub fn from_points(points: &[Vector2]) -> Self {
        assert!(!points.is_empty(), "from_points requires at least one point");
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = Vector2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vector2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Self { min, max }
    }
}
