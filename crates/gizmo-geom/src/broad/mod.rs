// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Broad-phase interfaces and the reference all-pairs implementation.
//!
//! Determinism contract (applies to all implementations used here):
//! - Pair identity is canonicalized as `(min_id, max_id)`.
//! - The emitted pair list is strictly sorted lexicographically by that tuple.
//! - Overlap is inclusive on edges (touching AABBs are considered overlapping).

use crate::shape::Shape;

#[doc = "All-pairs AABB broad phase and the `BroadPhase` trait."]
pub mod all_pairs;

pub use all_pairs::{AllPairs, BroadPhase};

/// Cheap conservative test: `true` if the world AABBs of `a` and `b` overlap.
///
/// May report pairs that do not collide; never misses a pair that does.
pub fn aabb_overlap(a: &Shape, b: &Shape) -> bool {
    a.aabb().overlaps(&b.aabb())
}
