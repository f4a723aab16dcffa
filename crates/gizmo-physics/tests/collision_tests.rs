// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Narrow phase, manifolds and the pipe filters, driven through `collide`.

use gizmo_physics::collision::{circle_circle, sat, ManifoldPointId};
use gizmo_physics::{collide, CurvedPipeFilter, PhysicsBody, PipeFilter, Shape, Vector2};
use proptest::prelude::*;

fn close(a: Vector2, b: Vector2) -> bool {
    a.distance(&b) < 1e-12
}

#[test]
fn tangent_circles_do_not_collide() {
    let a = Shape::circle(1.0).unwrap();
    let b = Shape::circle(1.0).unwrap().at(Vector2::new(2.0, 0.0));
    assert!(circle_circle(&a, &b).is_none());
    assert!(sat(&a, &b).is_none());
}

#[test]
fn overlapping_circles_report_depth_along_centres() {
    let a = Shape::circle(1.0).unwrap();
    let b = Shape::circle(1.0).unwrap().at(Vector2::new(1.5, 0.0));
    let p = circle_circle(&a, &b).unwrap();
    assert!(close(p.normal, Vector2::UNIT_X));
    assert!((p.depth - 0.5).abs() < 1e-12);
}

#[test]
fn coincident_circles_push_along_y() {
    let a = Shape::circle(0.5).unwrap();
    let b = Shape::circle(0.25).unwrap();
    let p = circle_circle(&a, &b).unwrap();
    assert_eq!(p.normal, Vector2::UNIT_Y);
    assert!((p.depth - 0.75).abs() < 1e-12);
}

#[test]
fn sat_picks_shallowest_axis_and_points_at_b() {
    let a = Shape::rectangle(1.0, 1.0).unwrap();
    let b = Shape::rectangle(1.0, 1.0).unwrap().at(Vector2::new(0.75, 0.0));
    let p = sat(&a, &b).unwrap();
    assert!(close(p.normal, Vector2::UNIT_X));
    assert!((p.depth - 0.25).abs() < 1e-12);

    let p = sat(&b, &a).unwrap();
    assert!(close(p.normal, -Vector2::UNIT_X));
}

#[test]
fn tilted_square_against_wall_block() {
    let block = Shape::rectangle(5.0, 5.0).unwrap().at(Vector2::new(2.5, 2.5));
    let diamond = Shape::rectangle(1.0, 1.0)
        .unwrap()
        .at(Vector2::new(5.0, 2.0))
        .rotated(core::f64::consts::FRAC_PI_4);
    let half_diagonal = core::f64::consts::FRAC_1_SQRT_2;

    let p = sat(&block, &diamond).unwrap();
    assert!(p.normal.distance(&Vector2::UNIT_X) < 1e-9);
    assert!((p.depth - half_diagonal).abs() < 1e-9);

    let p = sat(&diamond, &block).unwrap();
    assert!(p.normal.distance(&-Vector2::UNIT_X) < 1e-9);
    assert!((p.depth - half_diagonal).abs() < 1e-9);
}

#[test]
fn contained_shape_exits_through_the_nearer_side() {
    // Unit square inside a 4x4 block: 0.3 from the right wall, 2.7 from the left.
    let block = Shape::rectangle(4.0, 4.0).unwrap();
    let right = Shape::rectangle(1.0, 1.0).unwrap().at(Vector2::new(1.2, 0.0));
    let p = sat(&block, &right).unwrap();
    assert!(close(p.normal, Vector2::UNIT_X));
    assert!((p.depth - 1.3).abs() < 1e-12);

    let p = sat(&right, &block).unwrap();
    assert!(close(p.normal, -Vector2::UNIT_X));
    assert!((p.depth - 1.3).abs() < 1e-12);

    let left = Shape::rectangle(1.0, 1.0).unwrap().at(Vector2::new(-1.2, 0.0));
    let p = sat(&block, &left).unwrap();
    assert!(close(p.normal, -Vector2::UNIT_X));
    assert!((p.depth - 1.3).abs() < 1e-12);
}

#[test]
fn ball_on_square_yields_single_point_on_ball() {
    let ball = PhysicsBody::ball(Vector2::new(0.0, 0.65)).unwrap();
    let square = PhysicsBody::square(Vector2::ZERO).unwrap();
    let m = collide(&ball, &square, &[]).unwrap();
    assert!(close(m.normal, Vector2::new(0.0, -1.0)));
    assert_eq!(m.points.len(), 1);
    let point = &m.points[0];
    assert_eq!(point.id, ManifoldPointId::ShapeA);
    assert!(close(point.point, Vector2::new(0.0, 0.45)));
    assert!((point.depth - 0.05).abs() < 1e-12);
}

#[test]
fn separated_bodies_never_reach_the_narrow_phase() {
    let ball = PhysicsBody::ball(Vector2::new(5.0, 5.0)).unwrap();
    let square = PhysicsBody::square(Vector2::ZERO).unwrap();
    assert!(collide(&ball, &square, &[]).is_none());
}

#[test]
fn pipe_lets_centred_ball_through() {
    let pipe = PhysicsBody::pipe(Vector2::ZERO, 0.0).unwrap();
    let ball = PhysicsBody::ball(Vector2::ZERO).unwrap();
    assert!(collide(&ball, &pipe, &[&PipeFilter]).is_none());
    // Without the filter the ball is simply inside a solid box.
    assert!(collide(&ball, &pipe, &[]).is_some());
}

#[test]
fn pipe_pushes_ball_off_the_wall_it_reaches() {
    let pipe = PhysicsBody::pipe(Vector2::ZERO, 0.0).unwrap();
    let ball = PhysicsBody::ball(Vector2::new(0.0, 0.1)).unwrap();
    let m = collide(&ball, &pipe, &[&PipeFilter]).unwrap();
    assert!(close(m.normal, Vector2::UNIT_Y));
    assert!((m.points[0].depth - 0.05).abs() < 1e-12);
    assert!(close(m.points[0].point, Vector2::new(0.0, 0.3)));
}

#[test]
fn pipe_outer_wall_normal_follows_rotation() {
    let pipe = PhysicsBody::pipe(Vector2::ZERO, core::f64::consts::FRAC_PI_2).unwrap();
    let ball = PhysicsBody::ball(Vector2::new(0.3, 0.0)).unwrap();
    let m = collide(&ball, &pipe, &[&PipeFilter]).unwrap();
    assert!(m.normal.distance(&Vector2::new(-1.0, 0.0)) < 1e-9);
    assert!((m.points[0].depth - 0.15).abs() < 1e-9);
}

#[test]
fn curved_pipe_channel_is_free_space() {
    let pipe = PhysicsBody::curved_pipe(Vector2::ZERO, 0.0).unwrap();
    let dir = Vector2::new(1.0, 1.0).normalized();
    let ball = PhysicsBody::ball(dir.scale(0.5)).unwrap();
    assert!(collide(&ball, &pipe, &[&CurvedPipeFilter]).is_none());
}

#[test]
fn curved_pipe_outer_arc_pushes_ball_inward() {
    let pipe = PhysicsBody::curved_pipe(Vector2::ZERO, 0.0).unwrap();
    let dir = Vector2::new(1.0, 1.0).normalized();
    let ball = PhysicsBody::ball(dir.scale(0.6)).unwrap();
    let m = collide(&ball, &pipe, &[&CurvedPipeFilter]).unwrap();
    assert!(m.normal.distance(&dir) < 1e-9);
    assert!((m.points[0].depth - 0.05).abs() < 1e-9);
    assert!(m.points[0].point.distance(&dir.scale(0.8)) < 1e-9);
}

#[test]
fn curved_pipe_normal_flips_with_pair_order() {
    let pipe = PhysicsBody::curved_pipe(Vector2::ZERO, 0.0).unwrap();
    let dir = Vector2::new(1.0, 1.0).normalized();
    let ball = PhysicsBody::ball(dir.scale(0.6)).unwrap();
    let forward = collide(&ball, &pipe, &[&CurvedPipeFilter]).unwrap();
    let reverse = collide(&pipe, &ball, &[&CurvedPipeFilter]).unwrap();
    assert!(forward.normal.distance(&-reverse.normal) < 1e-9);
}

proptest! {
    #[test]
    fn circle_test_is_antisymmetric(
        ax in -3.0f64..3.0, ay in -3.0f64..3.0,
        bx in -3.0f64..3.0, by in -3.0f64..3.0,
        ra in 0.1f64..2.0, rb in 0.1f64..2.0,
    ) {
        let a = Shape::circle(ra).unwrap().at(Vector2::new(ax, ay));
        let b = Shape::circle(rb).unwrap().at(Vector2::new(bx, by));
        prop_assume!(a.center().distance(&b.center()) > 1e-6);
        let ab = circle_circle(&a, &b);
        let ba = circle_circle(&b, &a);
        prop_assert_eq!(ab.is_some(), ba.is_some());
        if let (Some(ab), Some(ba)) = (ab, ba) {
            prop_assert!(ab.normal.distance(&-ba.normal) < 1e-9);
            prop_assert!((ab.depth - ba.depth).abs() < 1e-9);
            prop_assert!(ab.depth > 0.0);
        }
    }
}
