// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! gizmo-physics: deterministic 2D rigid-body simulation for Gizmo boards.
//!
//! A [`World`] owns bodies (balls, bumpers, walls, pipes, flippers, black
//! holes) and advances them at a fixed tick rate: listeners apply gizmo
//! forces and detect collisions, a sequential-impulse solver resolves the
//! contacts, and queued removals are applied at the end of the tick.
//!
//! The collision pipeline ([`collision`]) is usable on its own: AABB broad
//! phase, SAT narrow phase and single-point manifolds, with
//! [`CollisionFilter`] hooks between the stages.

/// Collision detection pipeline.
pub mod collision;

mod body;
mod config;
mod constraint;
mod error;
mod gizmo;
mod listener;
mod mass;
mod record;
mod solver;
mod world;

// Re-exports for stable public API
pub use body::{BodyId, BodySet, Material, PhysicsBody};
pub use collision::{collide, CollisionFilter, CurvedPipeFilter, Manifold, PipeFilter};
pub use config::{BlackHoleConfig, CurvedPipeConfig, FlipperConfig, SimulationConfig};
pub use constraint::{ContactConstraint, SolvableContact};
pub use error::{ConstraintError, RecordError, WorldError};
pub use gizmo::{Category, FlipperSide, FlipperState, Gizmo, BALL_RADIUS, CELL};
pub use listener::{
    BlackHoleListener, CategoryListener, Collision, CurvedPipeListener, FlipperListener,
    TickContext, TickListener,
};
pub use mass::Mass;
pub use record::{BodyRecord, ShapeParams};
pub use solver::SequentialImpulses;
pub use world::{TickReport, World};

pub use gizmo_geom::{Shape, ShapeError, Transform, Vector2};
