// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision filters: hooks that veto or rewrite a pair between pipeline stages.

use gizmo_geom::{Geometry, Vector2};

use super::{Manifold, Penetration};
use crate::body::PhysicsBody;
use crate::gizmo::Gizmo;

/// Veto or rewrite hooks run on each candidate pair.
///
/// Every hook defaults to accepting. Returning `false` drops the pair for
/// this tick. Hooks see the pair in listener order (body 1 is the ball for
/// every built-in listener).
pub trait CollisionFilter {
    /// Runs before the AABB test.
    fn broadphase(&self, body1: &PhysicsBody, body2: &PhysicsBody) -> bool {
        let _ = (body1, body2);
        true
    }

    /// Runs after SAT; may rewrite the normal and depth.
    fn narrowphase(
        &self,
        body1: &PhysicsBody,
        body2: &PhysicsBody,
        penetration: &mut Penetration,
    ) -> bool {
        let _ = (body1, body2, penetration);
        true
    }

    /// Runs after the manifold is built; may rewrite it.
    fn manifold(&self, body1: &PhysicsBody, body2: &PhysicsBody, manifold: &mut Manifold) -> bool {
        let _ = (body1, body2, manifold);
        true
    }
}

/// Straight pipes: balls run freely along the channel and only hit the side
/// walls, never the open ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipeFilter;

impl CollisionFilter for PipeFilter {
    fn narrowphase(
        &self,
        body1: &PhysicsBody,
        body2: &PhysicsBody,
        penetration: &mut Penetration,
    ) -> bool {
        let (ball, pipe) = match (body1.gizmo(), body2.gizmo()) {
            (_, Gizmo::Pipe) => (body1, body2),
            (Gizmo::Pipe, _) => (body2, body1),
            _ => return true,
        };
        let (Some(radius), Geometry::Polygon(polygon)) = (ball.shape().radius(), pipe.shape().geometry())
        else {
            return true;
        };
        let half_cross = polygon.vertices().iter().fold(0.0_f64, |h, v| h.max(v.y.abs()));
        let local = pipe.transform().inverse_transform(ball.shape().center());
        let side = if local.y < 0.0 { -1.0 } else { 1.0 };
        let (wall, depth) = if local.y.abs() < half_cross {
            // Inside the channel band: push off whichever wall the ball reaches.
            (Vector2::new(0.0, side), local.y.abs() + radius - half_cross)
        } else {
            (Vector2::new(0.0, -side), half_cross + radius - local.y.abs())
        };
        if depth <= 0.0 {
            return false;
        }
        let normal = pipe.transform().transform_r(wall);
        // Filters see the pair in the order given; the normal runs ball→pipe.
        penetration.normal = if core::ptr::eq(ball, body1) { normal } else { -normal };
        penetration.depth = depth;
        true
    }
}

/// Curved pipes: the channel is the annulus between the inner and outer arc
/// inside the wedge. Balls collide with whichever arc they reach; the open
/// ends let them through.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurvedPipeFilter;

/// Where a ball sits relative to a curved pipe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ChannelPosition {
    /// Unit direction from the wedge corner to the ball centre.
    pub(crate) direction: Vector2,
    /// Distance from the wedge corner to the ball centre.
    pub(crate) distance: f64,
    /// Inner arc radius.
    pub(crate) inner: f64,
    /// Outer arc radius.
    pub(crate) outer: f64,
}

impl ChannelPosition {
    /// `None` unless `pipe` is a curved pipe and the ball centre is inside its wedge.
    pub(crate) fn locate(ball: &PhysicsBody, pipe: &PhysicsBody) -> Option<Self> {
        let Gizmo::CurvedPipe { inner_ratio } = *pipe.gizmo() else {
            return None;
        };
        let shape = pipe.shape();
        let outer = shape.radius()?;
        let [corner, _, _] = shape.quarter_circle_vertices()?;
        let center = ball.shape().center();
        if !shape.in_wedge(center)? {
            return None;
        }
        let mut direction = corner.to(&center);
        let distance = direction.normalize();
        if distance == 0.0 {
            return None;
        }
        Some(Self { direction, distance, inner: outer * inner_ratio, outer })
    }

    /// `true` when the centre lies between the two arcs.
    pub(crate) fn in_channel(&self) -> bool {
        self.distance >= self.inner && self.distance <= self.outer
    }
}

impl CollisionFilter for CurvedPipeFilter {
    fn narrowphase(
        &self,
        body1: &PhysicsBody,
        body2: &PhysicsBody,
        penetration: &mut Penetration,
    ) -> bool {
        let (ball, pipe) = match (body1.gizmo(), body2.gizmo()) {
            (_, Gizmo::CurvedPipe { .. }) => (body1, body2),
            (Gizmo::CurvedPipe { .. }, _) => (body2, body1),
            _ => return true,
        };
        let Some(radius) = ball.shape().radius() else {
            return true;
        };
        let Some(at) = ChannelPosition::locate(ball, pipe) else {
            return false;
        };
        let d = at.distance;
        let (normal, depth) = if d > at.outer {
            (-at.direction, at.outer + radius - d)
        } else if d >= at.inner {
            if d + radius > at.outer {
                (at.direction, d + radius - at.outer)
            } else if d - radius < at.inner {
                (-at.direction, at.inner - d + radius)
            } else {
                return false;
            }
        } else {
            // Between the corner and the inner arc: the inner wall is hit
            // from its hollow side, so the push is flipped.
            (at.direction, d + radius - at.inner)
        };
        if depth <= 0.0 {
            return false;
        }
        penetration.normal = if core::ptr::eq(ball, body1) { normal } else { -normal };
        penetration.depth = depth;
        true
    }
}
