// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use gizmo_geom::Vector2;

use crate::body::{BodyId, PhysicsBody};
use crate::collision::{Manifold, ManifoldPointId};
use crate::error::ConstraintError;

/// Solver state for one contact point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolvableContact {
    pub(crate) id: ManifoldPointId,
    pub(crate) point: Vector2,
    pub(crate) depth: f64,
    pub(crate) local_anchor1: Vector2,
    pub(crate) local_anchor2: Vector2,
    pub(crate) r1: Vector2,
    pub(crate) r2: Vector2,
    pub(crate) jn: f64,
    pub(crate) jt: f64,
    pub(crate) jp: f64,
    pub(crate) mass_n: f64,
    pub(crate) mass_t: f64,
    pub(crate) vb: f64,
}

impl SolvableContact {
    /// Manifold point this contact came from.
    pub fn id(&self) -> ManifoldPointId {
        self.id
    }

    /// World contact point at detection time.
    pub fn point(&self) -> Vector2 {
        self.point
    }

    /// Penetration depth at detection time.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Offset of the contact from body 1's centre of mass.
    pub fn r1(&self) -> Vector2 {
        self.r1
    }

    /// Offset of the contact from body 2's centre of mass.
    pub fn r2(&self) -> Vector2 {
        self.r2
    }

    /// Accumulated normal impulse.
    pub fn normal_impulse(&self) -> f64 {
        self.jn
    }

    /// Accumulated tangent (friction) impulse.
    pub fn tangent_impulse(&self) -> f64 {
        self.jt
    }

    /// Accumulated position pseudo-impulse.
    pub fn position_impulse(&self) -> f64 {
        self.jp
    }

    /// Restitution velocity bias.
    pub fn velocity_bias(&self) -> f64 {
        self.vb
    }
}

/// Per-pair solver working state, rebuilt from a [`Manifold`] every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConstraint {
    pub(crate) body1: BodyId,
    pub(crate) body2: BodyId,
    pub(crate) contacts: Vec<SolvableContact>,
    pub(crate) normal: Vector2,
    pub(crate) tangent: Vector2,
    pub(crate) friction: f64,
    pub(crate) restitution: f64,
    pub(crate) restitution_velocity: f64,
    pub(crate) tangent_speed: f64,
}

impl ContactConstraint {
    /// Builds the constraint for `manifold` between `body1` and `body2`.
    ///
    /// Material mixing: friction is the geometric mean, restitution and the
    /// bounce threshold take the larger of the two bodies.
    pub fn new(
        pair: (BodyId, BodyId),
        manifold: &Manifold,
        body1: &PhysicsBody,
        body2: &PhysicsBody,
    ) -> Result<Self, ConstraintError> {
        let (id1, id2) = pair;
        if id1 == id2 {
            return Err(ConstraintError::SameBody(id1));
        }
        if body1.is_static() && body2.is_static() {
            return Err(ConstraintError::BothStatic(id1, id2));
        }
        let c1 = body1.world_center();
        let c2 = body2.world_center();
        let contacts = manifold
            .points
            .iter()
            .map(|mp| {
                let r1 = mp.point - c1;
                let r2 = mp.point - c2;
                SolvableContact {
                    id: mp.id,
                    point: mp.point,
                    depth: mp.depth,
                    local_anchor1: body1.transform().inverse_transform_r(r1),
                    local_anchor2: body2.transform().inverse_transform_r(r2),
                    r1,
                    r2,
                    jn: 0.0,
                    jt: 0.0,
                    jp: 0.0,
                    mass_n: 0.0,
                    mass_t: 0.0,
                    vb: 0.0,
                }
            })
            .collect();
        Ok(Self {
            body1: id1,
            body2: id2,
            contacts,
            normal: manifold.normal,
            tangent: manifold.normal.right_normal(),
            friction: (body1.friction() * body2.friction()).sqrt(),
            restitution: body1.restitution().max(body2.restitution()),
            restitution_velocity: body1.restitution_velocity().max(body2.restitution_velocity()),
            tangent_speed: 0.0,
        })
    }

    /// Body pair in solver order.
    pub fn bodies(&self) -> (BodyId, BodyId) {
        (self.body1, self.body2)
    }

    /// Contact points.
    pub fn contacts(&self) -> &[SolvableContact] {
        &self.contacts
    }

    /// Unit normal from body 1 to body 2.
    pub fn normal(&self) -> Vector2 {
        self.normal
    }

    /// Unit tangent (the normal turned clockwise).
    pub fn tangent(&self) -> Vector2 {
        self.tangent
    }

    /// Mixed friction.
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Mixed restitution.
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Mixed bounce threshold.
    pub fn restitution_velocity(&self) -> f64 {
        self.restitution_velocity
    }

    /// Target relative tangent speed (conveyor effect); zero unless set.
    pub fn tangent_speed(&self) -> f64 {
        self.tangent_speed
    }

    /// Sets the target relative tangent speed.
    pub fn set_tangent_speed(&mut self, speed: f64) {
        self.tangent_speed = speed;
    }
}
