// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use gizmo_geom::ShapeError;
use thiserror::Error;

use crate::body::BodyId;

/// Reasons a manifold cannot become a contact constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// Neither body responds to impulses, so the effective mass is undefined.
    #[error("both bodies are immovable: {0} and {1}")]
    BothStatic(BodyId, BodyId),
    /// A body cannot collide with itself.
    #[error("constraint pairs {0} with itself")]
    SameBody(BodyId),
}

/// Errors surfaced by [`World`](crate::World) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The id does not name a live body.
    #[error("unknown body: {0}")]
    UnknownBody(BodyId),
    /// A listener produced an unusable pair.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

/// Errors rebuilding bodies from scene records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Shape parameters were rejected.
    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),
    /// Scale rate must be at least 1.
    #[error("scale rate must be at least 1")]
    ZeroScaleRate,
}
