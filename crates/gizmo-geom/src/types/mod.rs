// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the engine (transform, AABB, projection interval).
//!
//! Overlap semantics are inclusive on edges so touching boxes still reach the
//! narrow phase, which makes the strict call (tangency is not a collision).

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Projection intervals for separating-axis tests."]
pub mod interval;
#[doc = "Rigid transforms stored as a cos/sin pair plus translation."]
pub mod transform;
