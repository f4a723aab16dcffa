// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Shape construction and convex queries.

use gizmo_geom::{Shape, ShapeError, ShapeTag, Transform, Vector2};

fn close(a: Vector2, b: Vector2) -> bool {
    a.distance(&b) < 1e-9
}

#[test]
fn constructors_reject_bad_dimensions() {
    assert_eq!(Shape::circle(0.0).unwrap_err(), ShapeError::NonPositiveDimension);
    assert_eq!(Shape::rectangle(-1.0, 1.0).unwrap_err(), ShapeError::NonPositiveDimension);
    assert_eq!(Shape::quarter_circle(f64::NAN).unwrap_err(), ShapeError::NonPositiveDimension);
    assert_eq!(Shape::polygon(&[Vector2::ZERO]).unwrap_err(), ShapeError::TooFewVertices(1));
}

#[test]
fn triangle_is_placed_on_centroid() {
    let t = Shape::triangle(Vector2::new(0.0, 0.0), Vector2::new(3.0, 0.0), Vector2::new(0.0, 3.0))
        .unwrap();
    assert_eq!(t.tag(), ShapeTag::Polygon);
    assert!(close(t.center(), Vector2::new(1.0, 1.0)));
    let bb = t.aabb();
    assert!(close(bb.min(), Vector2::new(0.0, 0.0)));
    assert!(close(bb.max(), Vector2::new(3.0, 3.0)));
}

#[test]
fn circle_projection_and_support() {
    let c = Shape::circle(2.0).unwrap().at(Vector2::new(1.0, 1.0));
    let p = c.project(Vector2::UNIT_X);
    assert!((p.min() - -1.0).abs() < 1e-12);
    assert!((p.max() - 3.0).abs() < 1e-12);
    assert!(close(c.farthest_point(Vector2::new(0.0, 5.0)), Vector2::new(1.0, 3.0)));
    assert_eq!(c.contact_point(Vector2::UNIT_X), Some(Vector2::new(3.0, 1.0)));
    assert_eq!(c.foci(), Some(Vector2::new(1.0, 1.0)));
}

#[test]
fn polygons_have_no_single_contact_point() {
    let r = Shape::rectangle(1.0, 1.0).unwrap();
    assert_eq!(r.contact_point(Vector2::UNIT_X), None);
    assert_eq!(r.foci(), None);
    let axes = r.axes(&[Vector2::new(5.0, 0.0)]);
    assert_eq!(axes.len(), 5);
}

#[test]
fn scale_rate_rescales_geometry() {
    let mut c = Shape::circle(0.25).unwrap();
    c.set_scale_rate(4);
    assert_eq!(c.scale_rate(), 4);
    assert!((c.radius().unwrap() - 1.0).abs() < 1e-12);
    c.set_scale_rate(2);
    assert!((c.radius().unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn quarter_circle_wedge_and_stand_ins() {
    let q = Shape::quarter_circle(2.0).unwrap().at(Vector2::new(1.0, 1.0));
    assert_eq!(q.in_wedge(Vector2::new(2.0, 2.0)), Some(true));
    assert_eq!(q.in_wedge(Vector2::new(0.0, 2.0)), Some(false));
    assert_eq!(q.in_wedge(Vector2::new(2.0, 0.0)), Some(false));

    let circle = q.approximate_circle().unwrap();
    assert_eq!(circle.tag(), ShapeTag::Circle);
    assert!(close(circle.center(), Vector2::new(1.0, 1.0)));

    let rect = q.approximate_rectangle().unwrap();
    let bb = rect.aabb();
    assert!(close(bb.min(), Vector2::new(1.0, 1.0)));
    assert!(close(bb.max(), Vector2::new(3.0, 3.0)));

    let [corner, a, b] = q.quarter_circle_vertices().unwrap();
    assert!(close(corner, Vector2::new(1.0, 1.0)));
    assert!(close(a, Vector2::new(3.0, 1.0)));
    assert!(close(b, Vector2::new(1.0, 3.0)));

    let circle_shape = Shape::circle(1.0).unwrap();
    assert_eq!(circle_shape.in_wedge(Vector2::ZERO), None);
    assert!(circle_shape.approximate_rectangle().is_none());
}

#[test]
fn rotated_quarter_circle_turns_wedge() {
    let q = Shape::quarter_circle(1.0).unwrap().rotated(core::f64::consts::FRAC_PI_2);
    // Wedge now spans the second quadrant.
    assert_eq!(q.in_wedge(Vector2::new(-0.5, 0.5)), Some(true));
    assert_eq!(q.in_wedge(Vector2::new(0.5, 0.5)), Some(false));
}

#[test]
fn transform_mut_moves_shape() {
    let mut s = Shape::rectangle(1.0, 1.0).unwrap();
    s.transform_mut().translate(Vector2::new(2.0, 0.0));
    assert!(close(s.center(), Vector2::new(2.0, 0.0)));
    assert_eq!(*Shape::circle(1.0).unwrap().transform(), Transform::identity());
}
