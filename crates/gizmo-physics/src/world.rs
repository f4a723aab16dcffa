// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::collections::BTreeSet;

use tracing::{debug, instrument, trace, warn};

use crate::body::{BodyId, BodySet, PhysicsBody};
use crate::collision::CollisionFilter;
use crate::config::SimulationConfig;
use crate::constraint::ContactConstraint;
use crate::error::{ConstraintError, RecordError, WorldError};
use crate::gizmo::{FlipperSide, Gizmo};
use crate::listener::{builtin_listeners, Collision, TickContext, TickListener};
use crate::record::BodyRecord;
use crate::solver::SequentialImpulses;

/// Outcome of one [`World::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number just completed (1-based).
    pub tick: u64,
    /// Constraints solved this tick.
    pub contacts: usize,
    /// Bodies removed at the end of the tick (e.g. consumed by a black hole).
    pub removed: Vec<BodyId>,
}

/// The simulation: bodies, listeners, filters and the solver.
///
/// One [`tick`](World::tick) runs every listener's force/kinematics pass,
/// every listener's detection pass, builds contact constraints, runs one
/// solver step and finally applies queued removals.
pub struct World {
    config: SimulationConfig,
    bodies: BodySet,
    listeners: Vec<Box<dyn TickListener>>,
    filters: Vec<Box<dyn CollisionFilter>>,
    solver: SequentialImpulses,
    contacts: Vec<ContactConstraint>,
    pending: BTreeSet<BodyId>,
    tick: u64,
}

impl World {
    /// Empty world with the built-in gizmo listeners.
    #[instrument(skip(config))]
    pub fn new(config: SimulationConfig) -> Self {
        debug!(tick_rate = config.tick_rate, iterations = config.iterations, "world created");
        Self {
            config,
            bodies: BodySet::new(),
            listeners: builtin_listeners(),
            filters: Vec::new(),
            solver: SequentialImpulses::new(),
            contacts: Vec::new(),
            pending: BTreeSet::new(),
            tick: 0,
        }
    }

    /// Configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Adds `body` and returns its id.
    pub fn add_body(&mut self, body: PhysicsBody) -> BodyId {
        let id = self.bodies.insert(body);
        trace!(%id, "body added");
        id
    }

    /// Removes `id` immediately and returns the body.
    pub fn remove_body(&mut self, id: BodyId) -> Result<PhysicsBody, WorldError> {
        let body = self.bodies.remove(id).ok_or(WorldError::UnknownBody(id))?;
        self.pending.remove(&id);
        self.solver.forget(id);
        self.contacts.retain(|c| c.body1 != id && c.body2 != id);
        trace!(%id, "body removed");
        Ok(body)
    }

    /// Live bodies.
    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    /// One body.
    pub fn body(&self, id: BodyId) -> Option<&PhysicsBody> {
        self.bodies.get(id)
    }

    /// One body, mutably (to set velocities, apply forces, teleport).
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(id)
    }

    /// Constraints solved in the last tick, with their final impulses.
    pub fn contacts(&self) -> &[ContactConstraint] {
        &self.contacts
    }

    /// Registers a filter consulted for every pair after the listener's own.
    pub fn add_filter(&mut self, filter: Box<dyn CollisionFilter>) {
        self.filters.push(filter);
    }

    /// Registers a listener run after the built-in ones.
    pub fn add_listener(&mut self, listener: Box<dyn TickListener>) {
        self.listeners.push(listener);
    }

    /// Raises every flipper on `side`.
    pub fn flipper_up(&mut self, side: FlipperSide) {
        self.set_flippers(side, true);
    }

    /// Lowers every flipper on `side`.
    pub fn flipper_down(&mut self, side: FlipperSide) {
        self.set_flippers(side, false);
    }

    fn set_flippers(&mut self, side: FlipperSide, raised: bool) {
        for (_, body) in self.bodies.iter_mut() {
            if let Gizmo::Flipper(state) = body.gizmo_mut() {
                if state.side == side {
                    state.raised = raised;
                }
            }
        }
    }

    /// Snapshot of every live body in id order.
    pub fn to_records(&self) -> Vec<BodyRecord> {
        self.bodies.iter().map(|(_, body)| BodyRecord::from_body(body)).collect()
    }

    /// Builds a fresh world from saved records; ids follow record order.
    pub fn from_records(
        config: SimulationConfig,
        records: &[BodyRecord],
    ) -> Result<Self, RecordError> {
        let mut world = Self::new(config);
        for record in records {
            world.add_body(record.to_body()?);
        }
        debug!(bodies = world.bodies.len(), "world loaded from records");
        Ok(world)
    }

    /// Advances the simulation one fixed step.
    ///
    /// When a listener reports an unusable pair the tick is abandoned: forces
    /// and removals queued during it are dropped, so the next tick starts
    /// clean. Kinematic flipper moves made before detection are kept.
    pub fn tick(&mut self) -> Result<TickReport, WorldError> {
        let mut collisions: Vec<Collision> = Vec::new();
        {
            let mut ctx =
                TickContext::new(&mut self.bodies, &mut self.pending, &self.config, &self.filters);
            for listener in &mut self.listeners {
                listener.before_detection(&mut ctx);
            }
            for listener in &mut self.listeners {
                listener.detect(&mut ctx, &mut collisions);
            }
        }

        let mut constraints = match self.build_constraints(collisions) {
            Ok(constraints) => constraints,
            Err(e) => {
                warn!(tick = self.tick + 1, error = %e, "tick abandoned");
                for (_, body) in self.bodies.iter_mut() {
                    body.clear_forces();
                }
                self.pending.clear();
                return Err(e);
            }
        };

        self.solver.step(&mut self.bodies, &mut constraints, &self.config);
        self.contacts = constraints;

        let removed: Vec<BodyId> = std::mem::take(&mut self.pending).into_iter().collect();
        for &id in &removed {
            self.bodies.remove(id);
            self.solver.forget(id);
        }
        self.tick += 1;
        trace!(tick = self.tick, contacts = self.contacts.len(), removed = removed.len(), "tick");
        Ok(TickReport { tick: self.tick, contacts: self.contacts.len(), removed })
    }

    fn build_constraints(
        &self,
        collisions: Vec<Collision>,
    ) -> Result<Vec<ContactConstraint>, WorldError> {
        let mut constraints = Vec::with_capacity(collisions.len());
        for collision in collisions {
            let (id1, id2) = (collision.body1, collision.body2);
            if self.pending.contains(&id1) || self.pending.contains(&id2) {
                continue;
            }
            let body1 = self.bodies.get(id1).ok_or(WorldError::UnknownBody(id1))?;
            let body2 = self.bodies.get(id2).ok_or(WorldError::UnknownBody(id2))?;
            if body1.is_trigger() || body2.is_trigger() {
                continue;
            }
            match ContactConstraint::new((id1, id2), &collision.manifold, body1, body2) {
                Ok(constraint) => constraints.push(constraint),
                Err(ConstraintError::BothStatic(a, b)) => {
                    warn!(%a, %b, "skipping contact between immovable bodies");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(constraints)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
