// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Separating-axis narrow phase.
//!
//! Dispatch is a single `match` on the pair of shape tags. Quarter circles
//! never reach the general path themselves: they are swapped for a circle or
//! square stand-in first, and the stand-in is handed back in the
//! [`Detection`] so the manifold solver sees the same geometry.

use std::borrow::Cow;

use gizmo_geom::{Shape, ShapeTag, Vector2};

use super::Penetration;

/// A colliding pair plus the shapes the penetration was measured against.
#[derive(Debug, Clone)]
pub struct Detection<'a> {
    /// Minimum-translation normal (A→B) and depth.
    pub penetration: Penetration,
    /// Shape A, or its stand-in when A is a quarter circle.
    pub proxy_a: Cow<'a, Shape>,
    /// Shape B, or its stand-in when B is a quarter circle.
    pub proxy_b: Cow<'a, Shape>,
}

/// Tests `a` against `b`; `None` when they do not overlap.
pub fn detect<'a>(a: &'a Shape, b: &'a Shape) -> Option<Detection<'a>> {
    match (a.tag(), b.tag()) {
        (ShapeTag::QuarterCircle, ShapeTag::QuarterCircle) => None,
        (ShapeTag::Circle, ShapeTag::QuarterCircle) => {
            let proxy = quarter_circle_stand_in(b, a.center())?;
            let penetration = convex(a, &proxy)?;
            Some(Detection { penetration, proxy_a: Cow::Borrowed(a), proxy_b: Cow::Owned(proxy) })
        }
        (ShapeTag::QuarterCircle, ShapeTag::Circle) => {
            let proxy = quarter_circle_stand_in(a, b.center())?;
            let penetration = convex(&proxy, b)?;
            Some(Detection { penetration, proxy_a: Cow::Owned(proxy), proxy_b: Cow::Borrowed(b) })
        }
        (ShapeTag::QuarterCircle, ShapeTag::Polygon) => {
            let proxy = a.approximate_rectangle()?;
            let penetration = sat(&proxy, b)?;
            Some(Detection { penetration, proxy_a: Cow::Owned(proxy), proxy_b: Cow::Borrowed(b) })
        }
        (ShapeTag::Polygon, ShapeTag::QuarterCircle) => {
            let proxy = b.approximate_rectangle()?;
            let penetration = sat(a, &proxy)?;
            Some(Detection { penetration, proxy_a: Cow::Borrowed(a), proxy_b: Cow::Owned(proxy) })
        }
        _ => {
            let penetration = convex(a, b)?;
            Some(Detection { penetration, proxy_a: Cow::Borrowed(a), proxy_b: Cow::Borrowed(b) })
        }
    }
}

/// Full circle when `point` is inside the wedge, square otherwise.
fn quarter_circle_stand_in(quarter: &Shape, point: Vector2) -> Option<Shape> {
    if quarter.in_wedge(point)? {
        quarter.approximate_circle()
    } else {
        quarter.approximate_rectangle()
    }
}

fn convex(a: &Shape, b: &Shape) -> Option<Penetration> {
    if a.tag() == ShapeTag::Circle && b.tag() == ShapeTag::Circle {
        circle_circle(a, b)
    } else {
        sat(a, b)
    }
}

/// Closed-form circle test. Tangent circles do not collide.
///
/// Coincident centres resolve along `+y`.
pub fn circle_circle(a: &Shape, b: &Shape) -> Option<Penetration> {
    let ra = a.radius()?;
    let rb = b.radius()?;
    let mut normal = a.center().to(&b.center());
    let sum = ra + rb;
    if normal.length_squared() >= sum * sum {
        return None;
    }
    let distance = normal.normalize();
    if distance == 0.0 {
        normal = Vector2::UNIT_Y;
    }
    Some(Penetration { normal, depth: sum - distance })
}

/// General separating-axis test between two convex shapes.
///
/// The returned normal points from `a`'s centre toward `b`'s. Zero-depth
/// (touching) contacts are reported as no collision.
pub fn sat(a: &Shape, b: &Shape) -> Option<Penetration> {
    let foci_a: Vec<Vector2> = a.foci().into_iter().collect();
    let foci_b: Vec<Vector2> = b.foci().into_iter().collect();
    let axes_a = a.axes(&foci_b);
    let axes_b = b.axes(&foci_a);

    let mut normal = Vector2::ZERO;
    let mut depth = f64::INFINITY;
    for &axis in axes_a.iter().chain(&axes_b) {
        if axis.is_zero() {
            continue;
        }
        let pa = a.project(axis);
        let pb = b.project(axis);
        if !pa.overlaps(&pb) {
            return None;
        }
        let mut overlap = pa.overlap(&pb);
        let mut axis = axis;
        if pa.contains(&pb) || pb.contains(&pa) {
            let far = (pa.max() - pb.max()).abs();
            let near = (pa.min() - pb.min()).abs();
            if far > near {
                axis = -axis;
                overlap += near;
            } else {
                overlap += far;
            }
        }
        if overlap < depth {
            depth = overlap;
            normal = axis;
        }
    }
    if normal.is_zero() || depth <= 0.0 {
        return None;
    }
    if a.center().to(&b.center()).dot(&normal) < 0.0 {
        normal = -normal;
    }
    Some(Penetration { normal, depth })
}
