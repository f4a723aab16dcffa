// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sequential-impulse solver.
//!
//! One [`SequentialImpulses::step`] runs, in order:
//! 1. velocity integration (gravity plus accumulated force and torque);
//! 2. contact initialisation (anchors, effective masses, restitution bias);
//! 3. warm start from last tick's impulses;
//! 4. `iterations` Gauss-Seidel velocity passes, friction before normal;
//! 5. position integration with damping and per-tick motion caps;
//! 6. `iterations` position-correction passes applied directly to transforms.

use std::collections::BTreeMap;

use gizmo_geom::math::clamp;
use gizmo_geom::Vector2;

use crate::body::{BodyId, BodySet, PhysicsBody};
use crate::collision::ManifoldPointId;
use crate::config::SimulationConfig;
use crate::constraint::{ContactConstraint, SolvableContact};

type ContactKey = (BodyId, BodyId, ManifoldPointId);

/// Sequential-impulse solver with a cross-tick warm-start cache.
///
/// Constraints are rebuilt every tick; the cache carries each contact's
/// accumulated normal and tangent impulse forward, keyed by body pair and
/// manifold point id.
#[derive(Debug, Default, Clone)]
pub struct SequentialImpulses {
    cache: BTreeMap<ContactKey, (f64, f64)>,
}

impl SequentialImpulses {
    /// Solver with an empty cache.
    pub fn new() -> Self {
        Self { cache: BTreeMap::new() }
    }

    /// Number of contacts remembered from the last step.
    pub fn cached_contacts(&self) -> usize {
        self.cache.len()
    }

    /// Forgets every cached impulse touching `id`.
    pub fn forget(&mut self, id: BodyId) {
        self.cache.retain(|(a, b, _), _| *a != id && *b != id);
    }

    /// Advances `bodies` one fixed step while resolving `constraints`.
    pub fn step(
        &mut self,
        bodies: &mut BodySet,
        constraints: &mut [ContactConstraint],
        config: &SimulationConfig,
    ) {
        let dt = config.dt();
        integrate_velocities(bodies, config.gravity, dt);
        initialize_contacts(bodies, constraints);
        if config.warm_starting {
            self.seed(constraints);
            warm_start(bodies, constraints);
        }
        for _ in 0..config.iterations {
            solve_velocity_constraints(bodies, constraints);
        }
        integrate_positions(bodies, config, dt);
        for _ in 0..config.iterations {
            solve_position_constraints(bodies, constraints, config);
        }
        self.store(constraints, config.warm_starting);
    }

    fn seed(&self, constraints: &mut [ContactConstraint]) {
        for c in constraints.iter_mut() {
            let (b1, b2) = (c.body1, c.body2);
            for contact in &mut c.contacts {
                if let Some(&(jn, jt)) = self.cache.get(&(b1, b2, contact.id)) {
                    contact.jn = jn;
                    contact.jt = jt;
                }
            }
        }
    }

    fn store(&mut self, constraints: &[ContactConstraint], enabled: bool) {
        self.cache.clear();
        if !enabled {
            return;
        }
        for c in constraints {
            for contact in &c.contacts {
                self.cache.insert((c.body1, c.body2, contact.id), (contact.jn, contact.jt));
            }
        }
    }
}

pub(crate) fn integrate_velocities(bodies: &mut BodySet, gravity: Vector2, dt: f64) {
    for (_, body) in bodies.iter_mut() {
        if !body.is_static() {
            let inv_mass = body.mass().inv_mass();
            let inv_inertia = body.mass().inv_inertia();
            let mut acceleration = body.force().scale(inv_mass);
            if inv_mass > 0.0 {
                acceleration += gravity;
            }
            let v = body.linear_velocity() + acceleration.scale(dt);
            let w = body.angular_velocity() + body.torque() * inv_inertia * dt;
            body.set_linear_velocity(v);
            body.set_angular_velocity(w);
        }
        body.clear_forces();
    }
}

fn effective_mass(b1: &PhysicsBody, b2: &PhysicsBody, r1: Vector2, r2: Vector2, axis: Vector2) -> f64 {
    let rn1 = r1.cross(&axis);
    let rn2 = r2.cross(&axis);
    let k = b1.mass().inv_mass()
        + b2.mass().inv_mass()
        + b1.mass().inv_inertia() * rn1 * rn1
        + b2.mass().inv_inertia() * rn2 * rn2;
    if k > 0.0 {
        1.0 / k
    } else {
        0.0
    }
}

fn relative_velocity(b1: &PhysicsBody, b2: &PhysicsBody, contact: &SolvableContact) -> Vector2 {
    b2.velocity_at(contact.r2) - b1.velocity_at(contact.r1)
}

fn apply(b1: &mut PhysicsBody, b2: &mut PhysicsBody, contact: &SolvableContact, impulse: Vector2) {
    b1.apply_impulse(-impulse, contact.r1);
    b2.apply_impulse(impulse, contact.r2);
}

pub(crate) fn initialize_contacts(bodies: &mut BodySet, constraints: &mut [ContactConstraint]) {
    for c in constraints.iter_mut() {
        let Some((b1, b2)) = bodies.pair_mut(c.body1, c.body2) else {
            continue;
        };
        for contact in &mut c.contacts {
            contact.r1 = b1.transform().transform_r(contact.local_anchor1);
            contact.r2 = b2.transform().transform_r(contact.local_anchor2);
            contact.mass_n = effective_mass(b1, b2, contact.r1, contact.r2, c.normal);
            contact.mass_t = effective_mass(b1, b2, contact.r1, contact.r2, c.tangent);
            let rvn = relative_velocity(b1, b2, contact).dot(&c.normal);
            contact.vb =
                if rvn < -c.restitution_velocity { -c.restitution * rvn } else { 0.0 };
        }
    }
}

pub(crate) fn warm_start(bodies: &mut BodySet, constraints: &[ContactConstraint]) {
    for c in constraints {
        let Some((b1, b2)) = bodies.pair_mut(c.body1, c.body2) else {
            continue;
        };
        for contact in &c.contacts {
            let impulse = c.normal.scale(contact.jn) + c.tangent.scale(contact.jt);
            apply(b1, b2, contact, impulse);
        }
    }
}

pub(crate) fn solve_velocity_constraints(bodies: &mut BodySet, constraints: &mut [ContactConstraint]) {
    for c in constraints.iter_mut() {
        let Some((b1, b2)) = bodies.pair_mut(c.body1, c.body2) else {
            continue;
        };
        for contact in &mut c.contacts {
            // Friction first, boxed by the normal impulse of the last pass.
            let vt = relative_velocity(b1, b2, contact).dot(&c.tangent) - c.tangent_speed;
            let limit = c.friction * contact.jn;
            let jt = clamp(contact.jt - contact.mass_t * vt, -limit, limit);
            let delta = jt - contact.jt;
            contact.jt = jt;
            apply(b1, b2, contact, c.tangent.scale(delta));

            let vn = relative_velocity(b1, b2, contact).dot(&c.normal);
            let jn = (contact.jn - contact.mass_n * (vn - contact.vb)).max(0.0);
            let delta = jn - contact.jn;
            contact.jn = jn;
            apply(b1, b2, contact, c.normal.scale(delta));
        }
    }
}

pub(crate) fn integrate_positions(bodies: &mut BodySet, config: &SimulationConfig, dt: f64) {
    for (_, body) in bodies.iter_mut() {
        if body.is_static() {
            continue;
        }
        let mut v = body.linear_velocity().scale(1.0 / (1.0 + dt * body.linear_damping()));
        let mut w = body.angular_velocity() * (1.0 / (1.0 + dt * body.angular_damping()));

        let translation = v.scale(dt);
        if translation.length_squared() > config.max_translation * config.max_translation {
            v = v.scale(config.max_translation / translation.length());
        }
        let rotation = w * dt;
        if rotation.abs() > config.max_rotation {
            w *= config.max_rotation / rotation.abs();
        }
        body.set_linear_velocity(v);
        body.set_angular_velocity(w);

        body.transform_mut().translate(v.scale(dt));
        let center = body.world_center();
        body.transform_mut().rotate_about(w * dt, center);
    }
}

/// One position pass; returns the largest correction magnitude applied.
pub(crate) fn solve_position_constraints(
    bodies: &mut BodySet,
    constraints: &mut [ContactConstraint],
    config: &SimulationConfig,
) -> f64 {
    let mut largest: f64 = 0.0;
    for c in constraints.iter_mut() {
        let Some((b1, b2)) = bodies.pair_mut(c.body1, c.body2) else {
            continue;
        };
        let n = c.normal;
        for contact in &mut c.contacts {
            let c1 = b1.world_center();
            let c2 = b2.world_center();
            let r1 = b1.transform().transform_r(contact.local_anchor1);
            let r2 = b2.transform().transform_r(contact.local_anchor2);
            let separation = (c2 + r2 - (c1 + r1)).dot(&n) - contact.depth;

            let correction = clamp(
                config.baumgarte * (separation + config.linear_tolerance),
                -config.max_linear_correction,
                0.0,
            );
            largest = largest.max(correction.abs());

            let k = b1.mass().inv_mass()
                + b2.mass().inv_mass()
                + b1.mass().inv_inertia() * r1.cross(&n).powi(2)
                + b2.mass().inv_inertia() * r2.cross(&n).powi(2);
            let impulse = if k > 0.0 { -correction / k } else { 0.0 };

            let jp = (contact.jp + impulse).max(0.0);
            let delta = jp - contact.jp;
            contact.jp = jp;
            let j = n.scale(delta);

            let (m1, i1) = (b1.mass().inv_mass(), b1.mass().inv_inertia());
            b1.transform_mut().translate(-j.scale(m1));
            b1.transform_mut().rotate_about(-i1 * r1.cross(&j), c1);
            let (m2, i2) = (b2.mass().inv_mass(), b2.mass().inv_inertia());
            b2.transform_mut().translate(j.scale(m2));
            b2.transform_mut().rotate_about(i2 * r2.cross(&j), c2);
        }
    }
    largest
}
