// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Convex polygons (rectangles and triangles are constructors, not types).
//!
//! Vertices are stored counter-clockwise in local space with the centroid at
//! the local origin; `normals[i]` is the outward unit normal of the edge
//! `vertices[i] → vertices[i + 1]`.

use crate::math::{epsilon, Vector2};
use crate::shape::ShapeError;
use crate::types::aabb::Aabb;
use crate::types::interval::Interval;
use crate::types::transform::Transform;

/// Convex polygon geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2>,
    normals: Vec<Vector2>,
}

impl Polygon {
    /// Builds a polygon from local vertices in either winding.
    ///
    /// Returns the polygon re-centred on its centroid together with that
    /// centroid (in the input coordinates) so callers can place it.
    pub(crate) fn from_vertices(vertices: &[Vector2]) -> Result<(Self, Vector2), ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }
        let area = signed_area(vertices);
        if area.abs() <= epsilon() {
            return Err(ShapeError::Degenerate);
        }
        let mut ccw: Vec<Vector2> = vertices.to_vec();
        if area < 0.0 {
            ccw.reverse();
        }
        if !is_convex(&ccw) {
            return Err(ShapeError::NotConvex);
        }
        let centroid = centroid(&ccw, area.abs());
        let local: Vec<Vector2> = ccw.iter().map(|v| *v - centroid).collect();
        let normals = edge_normals(&local);
        Ok((Self { vertices: local, normals }, centroid))
    }

    /// Axis-aligned rectangle of `width` × `height` centred on the origin.
    pub(crate) fn rectangle(width: f64, height: f64) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let vertices = vec![
            Vector2::new(-hw, -hh),
            Vector2::new(hw, -hh),
            Vector2::new(hw, hh),
            Vector2::new(-hw, hh),
        ];
        let normals = edge_normals(&vertices);
        Self { vertices, normals }
    }

    /// Local vertices, counter-clockwise.
    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    /// Local outward edge normals.
    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }

    /// Polygon area.
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    /// Second moment of area about the local origin (the centroid), per unit density.
    pub fn polar_moment(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let p1 = self.vertices[i];
            let p2 = self.vertices[(i + 1) % n];
            let d = p1.cross(&p2).abs();
            sum += d * (p2.dot(&p2) + p2.dot(&p1) + p1.dot(&p1));
        }
        sum / 12.0
    }

    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v.scale(factor)).collect(),
            normals: self.normals.clone(),
        }
    }

    pub(crate) fn world_vertices<'a>(&'a self, t: &'a Transform) -> impl Iterator<Item = Vector2> + 'a {
        self.vertices.iter().map(move |v| t.transform(*v))
    }
}

fn signed_area(vertices: &[Vector2]) -> f64 {
    let n = vertices.len();
    let mut twice = 0.0;
    for i in 0..n {
        twice += vertices[i].cross(&vertices[(i + 1) % n]);
    }
    twice * 0.5
}

fn centroid(ccw: &[Vector2], area: f64) -> Vector2 {
    let n = ccw.len();
    let mut c = Vector2::ZERO;
    for i in 0..n {
        let p1 = ccw[i];
        let p2 = ccw[(i + 1) % n];
        c += (p1 + p2).scale(p1.cross(&p2));
    }
    c.scale(1.0 / (6.0 * area))
}

fn is_convex(ccw: &[Vector2]) -> bool {
    let n = ccw.len();
    (0..n).all(|i| {
        let a = ccw[i];
        let b = ccw[(i + 1) % n];
        let c = ccw[(i + 2) % n];
        a.to(&b).cross(&b.to(&c)) >= -epsilon()
    })
}

fn edge_normals(ccw: &[Vector2]) -> Vec<Vector2> {
    let n = ccw.len();
    (0..n).map(|i| ccw[i].to(&ccw[(i + 1) % n]).right_normal().normalized()).collect()
}

pub(crate) fn aabb(polygon: &Polygon, t: &Transform) -> Aabb {
    let points: Vec<Vector2> = polygon.world_vertices(t).collect();
    Aabb::from_points(&points)
}

pub(crate) fn project(polygon: &Polygon, t: &Transform, axis: Vector2) -> Interval {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in polygon.world_vertices(t) {
        let p = v.dot(&axis);
        min = min.min(p);
        max = max.max(p);
    }
    Interval::new(min, max)
}

/// World edge normals, plus one axis per focus from the focus to the nearest vertex.
pub(crate) fn axes(polygon: &Polygon, t: &Transform, foci: &[Vector2]) -> Vec<Vector2> {
    let mut axes: Vec<Vector2> = polygon.normals.iter().map(|n| t.transform_r(*n)).collect();
    for focus in foci {
        let nearest = polygon
            .world_vertices(t)
            .map(|v| (focus.distance_squared(&v), v))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, v)| v);
        if let Some(v) = nearest {
            axes.push(focus.to(&v).normalized());
        }
    }
    axes
}

pub(crate) fn farthest_point(polygon: &Polygon, t: &Transform, direction: Vector2) -> Vector2 {
    polygon
        .world_vertices(t)
        .map(|v| (v.dot(&direction), v))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map_or_else(|| t.translation(), |(_, v)| v)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn clockwise_input_is_rewound() {
        let cw = [Vector2::new(0.0, 0.0), Vector2::new(0.0, 1.0), Vector2::new(1.0, 0.0)];
        let (poly, centroid) = Polygon::from_vertices(&cw).unwrap();
        assert!(signed_area(poly.vertices()) > 0.0);
        assert!(centroid.distance(&Vector2::new(1.0 / 3.0, 1.0 / 3.0)) < 1e-12);
    }

    #[test]
    fn rectangle_moment_matches_closed_form() {
        let r = Polygon::rectangle(2.0, 4.0);
        let expected = r.area() * (2.0 * 2.0 + 4.0 * 4.0) / 12.0;
        assert!((r.polar_moment() - expected).abs() < 1e-9);
    }

    #[test]
    fn rejects_degenerate_and_concave() {
        let line = [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(2.0, 0.0)];
        assert_eq!(Polygon::from_vertices(&line).unwrap_err(), ShapeError::Degenerate);
        let arrow = [
            Vector2::new(0.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(1.0, 0.5),
            Vector2::new(2.0, 2.0),
            Vector2::new(0.0, 2.0),
        ];
        assert_eq!(Polygon::from_vertices(&arrow).unwrap_err(), ShapeError::NotConvex);
    }
}
