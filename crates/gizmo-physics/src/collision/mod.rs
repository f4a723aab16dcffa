// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision pipeline: AABB broad phase → SAT narrow phase → single-point
//! manifold, with [`CollisionFilter`] hooks between the stages.

use gizmo_geom::broad::aabb_overlap;
use gizmo_geom::Vector2;

use crate::body::PhysicsBody;

mod filter;
mod manifold;
mod narrowphase;

pub use filter::{CollisionFilter, CurvedPipeFilter, PipeFilter};
pub(crate) use filter::ChannelPosition;
pub use manifold::{solve as solve_manifold, Manifold, ManifoldPoint, ManifoldPointId};
pub use narrowphase::{circle_circle, detect, sat, Detection};

/// Minimum-translation axis of one colliding pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Penetration {
    /// Unit normal pointing from shape A toward shape B.
    pub normal: Vector2,
    /// Overlap along `normal`; always positive.
    pub depth: f64,
}

/// Runs the full pipeline for one ordered body pair.
///
/// Filters run in slice order at each stage; the first veto drops the pair.
pub fn collide(
    body1: &PhysicsBody,
    body2: &PhysicsBody,
    filters: &[&dyn CollisionFilter],
) -> Option<Manifold> {
    if !filters.iter().all(|f| f.broadphase(body1, body2)) {
        return None;
    }
    if !aabb_overlap(body1.shape(), body2.shape()) {
        return None;
    }
    let Detection { mut penetration, proxy_a, proxy_b } = detect(body1.shape(), body2.shape())?;
    if !filters.iter().all(|f| f.narrowphase(body1, body2, &mut penetration)) {
        return None;
    }
    let mut manifold = solve_manifold(&penetration, &proxy_a, &proxy_b)?;
    if !filters.iter().all(|f| f.manifold(body1, body2, &mut manifold)) {
        return None;
    }
    Some(manifold)
}
