// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tick listeners: per-category collision passes and gizmo behaviour.
//!
//! Every tick the world runs `before_detection` on all listeners (forces,
//! kinematics), then `detect` on all listeners (raw collisions). Listeners
//! never remove bodies directly; they queue removals on the [`TickContext`]
//! and the world applies them after the solve.

use std::collections::BTreeSet;

use gizmo_geom::broad::{AllPairs, BroadPhase};
use gizmo_geom::{epsilon, Vector2};
use tracing::{debug, trace};

use crate::body::{BodyId, BodySet, PhysicsBody};
use crate::collision::{
    collide, ChannelPosition, CollisionFilter, CurvedPipeFilter, Manifold, PipeFilter,
};
use crate::config::SimulationConfig;
use crate::gizmo::{Category, Gizmo};

/// A raw collision between two bodies, in listener order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// First body (the ball for built-in listeners).
    pub body1: BodyId,
    /// Second body.
    pub body2: BodyId,
    /// Contact normal (body1→body2) and point.
    pub manifold: Manifold,
}

/// What a listener may see and touch during a tick.
pub struct TickContext<'a> {
    bodies: &'a mut BodySet,
    removals: &'a mut BTreeSet<BodyId>,
    config: &'a SimulationConfig,
    filters: &'a [Box<dyn CollisionFilter>],
}

impl<'a> TickContext<'a> {
    pub(crate) fn new(
        bodies: &'a mut BodySet,
        removals: &'a mut BTreeSet<BodyId>,
        config: &'a SimulationConfig,
        filters: &'a [Box<dyn CollisionFilter>],
    ) -> Self {
        Self { bodies, removals, config, filters }
    }

    /// World configuration.
    pub fn config(&self) -> &'a SimulationConfig {
        self.config
    }

    /// All live bodies, including ones queued for removal.
    pub fn bodies(&self) -> &BodySet {
        self.bodies
    }

    /// Mutable access to one body.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(id)
    }

    /// Queues `id` for removal after this tick; `true` if newly queued.
    pub fn remove_later(&mut self, id: BodyId) -> bool {
        self.removals.insert(id)
    }

    /// `true` if `id` is queued for removal.
    pub fn is_pending_removal(&self, id: BodyId) -> bool {
        self.removals.contains(&id)
    }

    /// Runs the collision pipeline on `(id1, id2)` through `filter` (if any)
    /// followed by every world filter. Bodies queued for removal never collide.
    pub fn collide(
        &self,
        id1: BodyId,
        id2: BodyId,
        filter: Option<&dyn CollisionFilter>,
    ) -> Option<Collision> {
        if self.is_pending_removal(id1) || self.is_pending_removal(id2) {
            return None;
        }
        let body1 = self.bodies.get(id1)?;
        let body2 = self.bodies.get(id2)?;
        let mut filters: Vec<&dyn CollisionFilter> = Vec::with_capacity(self.filters.len() + 1);
        filters.extend(filter);
        filters.extend(self.filters.iter().map(|f| f.as_ref() as &dyn CollisionFilter));
        let manifold = collide(body1, body2, &filters)?;
        Some(Collision { body1: id1, body2: id2, manifold })
    }
}

/// Hook run by the world every tick.
pub trait TickListener {
    /// Runs before any detection; used to apply forces or move kinematic bodies.
    fn before_detection(&mut self, ctx: &mut TickContext<'_>) {
        let _ = ctx;
    }

    /// Appends this listener's collisions to `out`.
    fn detect(&mut self, ctx: &mut TickContext<'_>, out: &mut Vec<Collision>);
}

/// Collides every body of one category with every body of another (or with
/// each other when both categories match).
pub struct CategoryListener {
    first: Category,
    second: Category,
    filter: Option<Box<dyn CollisionFilter>>,
}

impl CategoryListener {
    /// Listener for `(first, second)` pairs.
    pub fn new(first: Category, second: Category) -> Self {
        Self { first, second, filter: None }
    }

    /// Runs `filter` ahead of the world filters for this pair.
    pub fn with_filter(mut self, filter: impl CollisionFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }
}

impl TickListener for CategoryListener {
    fn detect(&mut self, ctx: &mut TickContext<'_>, out: &mut Vec<Collision>) {
        let filter = self.filter.as_deref();
        if self.first == self.second {
            let mut broad = AllPairs::new();
            for id in ctx.bodies().ids_in(self.first) {
                if let Some(body) = ctx.bodies().get(id) {
                    broad.upsert(id.0, body.shape().aabb());
                }
            }
            for (a, b) in broad.pairs() {
                out.extend(ctx.collide(BodyId(a), BodyId(b), filter));
            }
        } else {
            let seconds = ctx.bodies().ids_in(self.second);
            for a in ctx.bodies().ids_in(self.first) {
                for &b in &seconds {
                    out.extend(ctx.collide(a, b, filter));
                }
            }
        }
    }
}

/// Swings flippers toward their raised or lowered angle, then collides balls
/// with them.
pub struct FlipperListener {
    pairs: CategoryListener,
}

impl FlipperListener {
    /// Ball-flipper listener.
    pub fn new() -> Self {
        Self { pairs: CategoryListener::new(Category::Ball, Category::Flipper) }
    }
}

impl Default for FlipperListener {
    fn default() -> Self {
        Self::new()
    }
}

impl TickListener for FlipperListener {
    fn before_detection(&mut self, ctx: &mut TickContext<'_>) {
        let config = ctx.config();
        for id in ctx.bodies().ids_in(Category::Flipper) {
            let Some(body) = ctx.body_mut(id) else {
                continue;
            };
            let Gizmo::Flipper(state) = body.gizmo_mut() else {
                continue;
            };
            let (delta, omega) = state.advance(&config.flipper, config.tick_rate);
            let pivot = state.pivot;
            body.transform_mut().rotate_about(delta, pivot);
            // Kinematic: report the rigid motion so contacts see a moving surface.
            let arm = pivot.to(&body.world_center());
            body.set_angular_velocity(omega);
            body.set_linear_velocity(arm.cross_scalar(omega));
        }
    }

    fn detect(&mut self, ctx: &mut TickContext<'_>, out: &mut Vec<Collision>) {
        self.pairs.detect(ctx, out);
    }
}

/// Pulls balls toward black holes and consumes the ones that touch.
#[derive(Debug, Default)]
pub struct BlackHoleListener;

impl BlackHoleListener {
    /// Ball-black-hole listener.
    pub fn new() -> Self {
        Self
    }
}

impl TickListener for BlackHoleListener {
    fn before_detection(&mut self, ctx: &mut TickContext<'_>) {
        let tuning = &ctx.config().black_hole;
        let holes: Vec<(Vector2, f64)> = ctx
            .bodies()
            .ids_in(Category::BlackHole)
            .into_iter()
            .filter_map(|id| ctx.bodies().get(id))
            .map(|h| (h.shape().center(), h.shape().radius().unwrap_or(0.0)))
            .collect();
        if holes.is_empty() {
            return;
        }
        for id in ctx.bodies().ids_in(Category::Ball) {
            if ctx.is_pending_removal(id) {
                continue;
            }
            let Some(ball) = ctx.body_mut(id) else {
                continue;
            };
            let center = ball.shape().center();
            let mass = ball.mass().mass();
            for &(hole, radius) in &holes {
                let offset = center.to(&hole);
                let d2 = offset.length_squared();
                if d2 > tuning.range * tuning.range || d2 <= epsilon() {
                    continue;
                }
                // Inside the rim the pull holds its rim strength.
                let d2 = d2.max(radius * radius);
                ball.apply_force(offset.normalized().scale(tuning.strength * mass / d2));
            }
        }
    }

    fn detect(&mut self, ctx: &mut TickContext<'_>, _out: &mut Vec<Collision>) {
        let holes = ctx.bodies().ids_in(Category::BlackHole);
        for ball in ctx.bodies().ids_in(Category::Ball) {
            let hit = holes.iter().copied().find(|&h| ctx.collide(ball, h, None).is_some());
            if let Some(hole) = hit {
                if ctx.remove_later(ball) {
                    debug!(%ball, %hole, "ball consumed by black hole");
                }
            }
        }
    }
}

/// Collides balls with curved pipes and, while a ball rides the channel,
/// cancels gravity and keeps it above the minimum speed.
pub struct CurvedPipeListener {
    pairs: CategoryListener,
}

impl CurvedPipeListener {
    /// Ball-curved-pipe listener.
    pub fn new() -> Self {
        Self {
            pairs: CategoryListener::new(Category::Ball, Category::CurvedPipe)
                .with_filter(CurvedPipeFilter),
        }
    }
}

impl Default for CurvedPipeListener {
    fn default() -> Self {
        Self::new()
    }
}

impl TickListener for CurvedPipeListener {
    fn before_detection(&mut self, ctx: &mut TickContext<'_>) {
        let config = ctx.config();
        let pipes = ctx.bodies().ids_in(Category::CurvedPipe);
        if pipes.is_empty() {
            return;
        }
        let riding: Vec<BodyId> = ctx
            .bodies()
            .ids_in(Category::Ball)
            .into_iter()
            .filter(|&id| {
                let Some(ball) = ctx.bodies().get(id) else {
                    return false;
                };
                pipes.iter().filter_map(|&p| ctx.bodies().get(p)).any(|pipe| {
                    ChannelPosition::locate(ball, pipe).is_some_and(|at| at.in_channel())
                })
            })
            .collect();
        for id in riding {
            let Some(ball) = ctx.body_mut(id) else {
                continue;
            };
            let weight = config.gravity.scale(ball.mass().mass());
            ball.apply_force(-weight);
            let v = ball.linear_velocity();
            let speed = v.length();
            if speed > epsilon() && speed < config.curved_pipe.min_speed {
                ball.set_linear_velocity(v.scale(config.curved_pipe.min_speed / speed));
            }
            trace!(%id, "ball riding curved pipe");
        }
    }

    fn detect(&mut self, ctx: &mut TickContext<'_>, out: &mut Vec<Collision>) {
        self.pairs.detect(ctx, out);
    }
}

/// Listeners every world starts with.
pub(crate) fn builtin_listeners() -> Vec<Box<dyn TickListener>> {
    vec![
        Box::new(FlipperListener::new()),
        Box::new(CurvedPipeListener::new()),
        Box::new(BlackHoleListener::new()),
        Box::new(CategoryListener::new(Category::Ball, Category::Ball)),
        Box::new(CategoryListener::new(Category::Ball, Category::Obstacle)),
        Box::new(CategoryListener::new(Category::Ball, Category::Pipe).with_filter(PipeFilter)),
    ]
}
