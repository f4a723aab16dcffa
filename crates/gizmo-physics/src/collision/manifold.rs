// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use gizmo_geom::{Shape, Vector2};

use super::Penetration;

/// Which shape supplied a manifold point.
///
/// The id is stable for a pair from tick to tick, which is what lets the
/// solver carry impulses across ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ManifoldPointId {
    /// Deepest point of shape A along the normal.
    ShapeA,
    /// Deepest point of shape B against the normal.
    ShapeB,
}

/// One world-space contact point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ManifoldPoint {
    /// Feature id.
    pub id: ManifoldPointId,
    /// World position.
    pub point: Vector2,
    /// Penetration depth at the point.
    pub depth: f64,
}

/// Contact normal (A→B) and its points; this engine produces at most one.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifold {
    /// Unit normal from body 1 toward body 2.
    pub normal: Vector2,
    /// Contact points.
    pub points: Vec<ManifoldPoint>,
}

/// Builds a single-point manifold from a penetration.
///
/// Shape A answers first with its farthest point along the normal; shape B
/// answers otherwise with its farthest point against it. Two polygons can
/// answer neither and yield `None`.
pub fn solve(penetration: &Penetration, a: &Shape, b: &Shape) -> Option<Manifold> {
    let n = penetration.normal;
    let (id, point) = a
        .contact_point(n)
        .map(|p| (ManifoldPointId::ShapeA, p))
        .or_else(|| b.contact_point(-n).map(|p| (ManifoldPointId::ShapeB, p)))?;
    Some(Manifold { normal: n, points: vec![ManifoldPoint { id, point, depth: penetration.depth }] })
}
