// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use std::collections::BTreeMap;

use gizmo_geom::{Shape, Transform, Vector2};

use crate::gizmo::{Category, Gizmo};
use crate::mass::Mass;

/// Stable handle of a body inside a [`World`](crate::World).
///
/// Ids are never reused within one world, so a stale id simply stops
/// resolving once its body is removed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Surface and bulk material of a body.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Mass per unit area.
    pub density: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Bounciness in `[0, 1]`.
    pub restitution: f64,
    /// Closing speed below which no bounce is applied.
    pub restitution_velocity: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self { density: 1.0, friction: 0.2, restitution: 0.0, restitution_velocity: 1.0 }
    }
}

/// A rigid body: one shape, its mass, velocities and per-tick force accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    shape: Shape,
    mass: Mass,
    material: Material,
    linear_velocity: Vector2,
    angular_velocity: f64,
    linear_damping: f64,
    angular_damping: f64,
    force: Vector2,
    torque: f64,
    trigger: bool,
    gizmo: Gizmo,
}

impl PhysicsBody {
    /// Creates a body. Balls get mass from `material.density`; every other
    /// gizmo is immovable.
    pub fn new(shape: Shape, material: Material, gizmo: Gizmo) -> Self {
        let mass = Self::mass_for(&shape, &material, &gizmo);
        Self {
            shape,
            mass,
            material,
            linear_velocity: Vector2::ZERO,
            angular_velocity: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            force: Vector2::ZERO,
            torque: 0.0,
            trigger: false,
            gizmo,
        }
    }

    fn mass_for(shape: &Shape, material: &Material, gizmo: &Gizmo) -> Mass {
        if gizmo.is_dynamic() {
            Mass::from_shape(shape, material.density)
        } else {
            Mass::infinite(Mass::from_shape(shape, 1.0).center())
        }
    }

    /// Marks the body as a trigger: it is detected but never pushed against.
    pub fn with_trigger(mut self, trigger: bool) -> Self {
        self.trigger = trigger;
        self
    }

    /// Sets linear and angular damping.
    pub fn with_damping(mut self, linear: f64, angular: f64) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Sets the starting linear velocity.
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Collision shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Placement of the shape.
    pub fn transform(&self) -> &Transform {
        self.shape.transform()
    }

    pub(crate) fn transform_mut(&mut self) -> &mut Transform {
        self.shape.transform_mut()
    }

    /// Mass properties.
    pub fn mass(&self) -> &Mass {
        &self.mass
    }

    /// Material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// World-space centre of mass.
    pub fn world_center(&self) -> Vector2 {
        self.shape.transform().transform(self.mass.center())
    }

    /// Linear velocity.
    pub fn linear_velocity(&self) -> Vector2 {
        self.linear_velocity
    }

    /// Replaces the linear velocity.
    pub fn set_linear_velocity(&mut self, velocity: Vector2) {
        self.linear_velocity = velocity;
    }

    /// Angular velocity (radians per second, counter-clockwise positive).
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Replaces the angular velocity.
    pub fn set_angular_velocity(&mut self, velocity: f64) {
        self.angular_velocity = velocity;
    }

    /// Linear damping coefficient.
    pub fn linear_damping(&self) -> f64 {
        self.linear_damping
    }

    /// Angular damping coefficient.
    pub fn angular_damping(&self) -> f64 {
        self.angular_damping
    }

    /// Force accumulated for the current tick.
    pub fn force(&self) -> Vector2 {
        self.force
    }

    /// Torque accumulated for the current tick.
    pub fn torque(&self) -> f64 {
        self.torque
    }

    /// Adds `force` to this tick's accumulator.
    pub fn apply_force(&mut self, force: Vector2) {
        self.force += force;
    }

    /// Adds `torque` to this tick's accumulator.
    pub fn apply_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    pub(crate) fn clear_forces(&mut self) {
        self.force = Vector2::ZERO;
        self.torque = 0.0;
    }

    /// Applies `impulse` at world offset `r` from the centre of mass.
    pub(crate) fn apply_impulse(&mut self, impulse: Vector2, r: Vector2) {
        self.linear_velocity += impulse.scale(self.mass.inv_mass());
        self.angular_velocity += self.mass.inv_inertia() * r.cross(&impulse);
    }

    /// Velocity of the material point at world offset `r` from the centre of mass.
    pub fn velocity_at(&self, r: Vector2) -> Vector2 {
        self.linear_velocity + r.cross_scalar(self.angular_velocity)
    }

    /// Friction coefficient.
    pub fn friction(&self) -> f64 {
        self.material.friction
    }

    /// Restitution coefficient.
    pub fn restitution(&self) -> f64 {
        self.material.restitution
    }

    /// Minimum closing speed for a bounce.
    pub fn restitution_velocity(&self) -> f64 {
        self.material.restitution_velocity
    }

    /// `true` for trigger bodies.
    pub fn is_trigger(&self) -> bool {
        self.trigger
    }

    /// `true` when impulses cannot move this body.
    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    /// Gizmo kind and its state.
    pub fn gizmo(&self) -> &Gizmo {
        &self.gizmo
    }

    pub(crate) fn gizmo_mut(&mut self) -> &mut Gizmo {
        &mut self.gizmo
    }

    /// World category the body is grouped under.
    pub fn category(&self) -> Category {
        self.gizmo.category()
    }

    /// Integer zoom step of the shape.
    pub fn scale_rate(&self) -> u32 {
        self.shape.scale_rate()
    }

    /// Rescales the shape (and mass) to zoom step `rate`.
    ///
    /// # Panics
    /// Panics if `rate` is zero.
    pub fn set_scale_rate(&mut self, rate: u32) {
        let old = f64::from(self.shape.scale_rate());
        self.shape.set_scale_rate(rate);
        if let Gizmo::Flipper(state) = &mut self.gizmo {
            // Pivot scales with the geometry about the shape origin.
            let origin = self.shape.transform().translation();
            let offset = origin.to(&state.pivot).scale(f64::from(rate) / old);
            state.pivot = origin + offset;
        }
        self.mass = Self::mass_for(&self.shape, &self.material, &self.gizmo);
    }
}

/// A world's live bodies, keyed by [`BodyId`].
///
/// Ids come from a counter and are never handed out twice; removed bodies
/// leave nothing behind, so lookups and iteration scale with the live count.
#[derive(Debug, Default, Clone)]
pub struct BodySet {
    bodies: BTreeMap<BodyId, PhysicsBody>,
    next: usize,
}

impl BodySet {
    /// Empty set.
    pub fn new() -> Self {
        Self { bodies: BTreeMap::new(), next: 0 }
    }

    pub(crate) fn insert(&mut self, body: PhysicsBody) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        self.bodies.insert(id, body);
        id
    }

    pub(crate) fn remove(&mut self, id: BodyId) -> Option<PhysicsBody> {
        self.bodies.remove(&id)
    }

    /// Body for `id`, if live.
    pub fn get(&self, id: BodyId) -> Option<&PhysicsBody> {
        self.bodies.get(&id)
    }

    /// Mutable body for `id`, if live.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(&id)
    }

    /// `true` if `id` names a live body.
    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// `true` when no body is live.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Live bodies in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &PhysicsBody)> + '_ {
        self.bodies.iter().map(|(&id, b)| (id, b))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut PhysicsBody)> + '_ {
        self.bodies.iter_mut().map(|(&id, b)| (id, b))
    }

    /// Ids of live bodies in `category`, ascending.
    pub fn ids_in(&self, category: Category) -> Vec<BodyId> {
        self.iter().filter(|(_, b)| b.category() == category).map(|(id, _)| id).collect()
    }

    /// Two distinct live bodies borrowed mutably, in argument order.
    pub(crate) fn pair_mut(
        &mut self,
        a: BodyId,
        b: BodyId,
    ) -> Option<(&mut PhysicsBody, &mut PhysicsBody)> {
        if a == b {
            return None;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let mut range = self.bodies.range_mut(lo..=hi);
        let (&lo_id, lo_body) = range.next()?;
        let (&hi_id, hi_body) = range.next_back()?;
        if lo_id != lo || hi_id != hi {
            return None;
        }
        if a < b {
            Some((lo_body, hi_body))
        } else {
            Some((hi_body, lo_body))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn static_bodies_ignore_impulses() {
        let mut wall = PhysicsBody::new(
            Shape::rectangle(4.0, 1.0).unwrap(),
            Material::default(),
            Gizmo::Obstacle,
        );
        wall.apply_impulse(Vector2::new(10.0, 5.0), Vector2::new(1.0, 0.0));
        assert_eq!(wall.linear_velocity(), Vector2::ZERO);
        assert_eq!(wall.angular_velocity(), 0.0);
    }

    #[test]
    fn impulse_off_centre_spins_ball() {
        let mut ball = PhysicsBody::new(Shape::circle(0.5).unwrap(), Material::default(), Gizmo::Ball);
        ball.apply_impulse(Vector2::new(0.0, 1.0), Vector2::new(0.5, 0.0));
        assert!(ball.linear_velocity().y > 0.0);
        assert!(ball.angular_velocity() > 0.0);
    }

    #[test]
    fn pair_mut_respects_argument_order() {
        let mut set = BodySet::new();
        let a = set.insert(PhysicsBody::ball(Vector2::ZERO).unwrap());
        let b = set.insert(PhysicsBody::ball(Vector2::new(5.0, 0.0)).unwrap());
        let (first, second) = set.pair_mut(b, a).unwrap();
        assert_eq!(first.transform().translation(), Vector2::new(5.0, 0.0));
        assert_eq!(second.transform().translation(), Vector2::ZERO);
        assert!(set.pair_mut(a, a).is_none());
        set.remove(a);
        assert!(set.pair_mut(a, b).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn removed_ids_are_not_handed_out_again() {
        let mut set = BodySet::new();
        let a = set.insert(PhysicsBody::ball(Vector2::ZERO).unwrap());
        let b = set.insert(PhysicsBody::ball(Vector2::new(1.0, 0.0)).unwrap());
        set.remove(a);
        let c = set.insert(PhysicsBody::ball(Vector2::new(2.0, 0.0)).unwrap());
        assert!(c > b);
        assert!(!set.contains(a));
        assert_eq!(set.len(), 2);
        let ids: Vec<BodyId> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b, c]);
        // A gap between the two ids does not stop the pair borrow.
        assert!(set.pair_mut(c, b).is_some());
    }

    #[test]
    fn scale_rate_updates_mass() {
        let mut ball = PhysicsBody::new(Shape::circle(0.5).unwrap(), Material::default(), Gizmo::Ball);
        let m1 = ball.mass().mass();
        ball.set_scale_rate(2);
        assert!((ball.mass().mass() - 4.0 * m1).abs() < 1e-9);
    }
}
