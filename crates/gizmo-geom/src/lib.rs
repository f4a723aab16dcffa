// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry kernel for Gizmo.

This crate provides:
- 2D vectors and scalar helpers (`Vector2`, `epsilon`, `clamp`).
- Rigid transforms (`Transform`), bounding boxes (`Aabb`) and projection
  intervals (`Interval`).
- Convex shapes (`Shape`): circles, convex polygons and the quarter-circle
  wedge used by curved pipes.
- A broad-phase trait and an all-pairs AABB pairing structure.

Design notes:
- Deterministic: no ambient RNG; ordering of pair outputs is canonical.
- Float64 throughout.
- Rustdoc is treated as part of the contract; public items are documented.
"]

/// Broad-phase pairing.
pub mod broad;
/// Scalar helpers and `Vector2`.
pub mod math;
/// Convex shapes.
pub mod shape;
/// Foundational geometric types.
pub mod types;

pub use math::{epsilon, Vector2};
pub use shape::{Geometry, Shape, ShapeError, ShapeTag};
pub use types::aabb::Aabb;
pub use types::interval::Interval;
pub use types::transform::Transform;
