// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Gizmo kinds, their per-kind state, and the preset bodies an editor places.
//!
//! Presets are sized on a grid cell of [`CELL`] world units and take the
//! position of the cell centre (curved pipes take the wedge corner).

use gizmo_geom::{Shape, ShapeError, Vector2};

use crate::body::{Material, PhysicsBody};
use crate::config::FlipperConfig;

/// Grid cell size in world units.
pub const CELL: f64 = 1.0;

/// Ball radius.
pub const BALL_RADIUS: f64 = 0.2 * CELL;

/// Swing gaps below this snap to the target.
const SETTLE_TOLERANCE: f64 = 1e-12;

/// Which flipper key a flipper answers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipperSide {
    /// Pivot on the left end; raising swings counter-clockwise.
    Left,
    /// Pivot on the right end; raising swings clockwise.
    Right,
}

impl FlipperSide {
    /// Rotation sign of a raise.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

/// Kinematic state of a flipper.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipperState {
    /// Side this flipper belongs to.
    pub side: FlipperSide,
    /// World-space hinge.
    pub pivot: Vector2,
    /// Current swing away from rest, in radians (never negative).
    pub angle: f64,
    /// Whether the flipper key is held.
    pub raised: bool,
}

impl FlipperState {
    /// Advances the swing one tick and returns the signed rotation to apply
    /// about the pivot together with the angular velocity for the tick.
    pub fn advance(&mut self, config: &FlipperConfig, tick_rate: u32) -> (f64, f64) {
        let target = if self.raised { config.max_angle } else { 0.0 };
        let gap = target - self.angle;
        if gap.abs() <= SETTLE_TOLERANCE {
            self.angle = target;
            return (0.0, 0.0);
        }
        let delta = gap.clamp(-config.step, config.step);
        self.angle += delta;
        let sign = self.side.sign();
        (sign * delta, sign * delta * f64::from(tick_rate))
    }
}

/// Kind of a body plus any state specific to that kind.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gizmo {
    /// The dynamic ball.
    Ball,
    /// Square, circle or triangle bumper.
    Obstacle,
    /// Outer wall of the playfield.
    Boundary,
    /// Straight pipe; balls travel along its local x axis.
    Pipe,
    /// Quarter-circle pipe; the channel runs between the inner radius
    /// (`inner_ratio` × outer) and the outer radius.
    CurvedPipe {
        /// Inner radius as a fraction of the outer radius.
        inner_ratio: f64,
    },
    /// Kinematic flipper.
    Flipper(FlipperState),
    /// Attracts and consumes balls.
    BlackHole,
}

/// World grouping used to pick which listener handles a pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Balls.
    Ball,
    /// Obstacles and boundary walls.
    Obstacle,
    /// Straight pipes.
    Pipe,
    /// Curved pipes.
    CurvedPipe,
    /// Flippers.
    Flipper,
    /// Black holes.
    BlackHole,
}

impl Gizmo {
    /// Category of this kind.
    pub fn category(&self) -> Category {
        match self {
            Self::Ball => Category::Ball,
            Self::Obstacle | Self::Boundary => Category::Obstacle,
            Self::Pipe => Category::Pipe,
            Self::CurvedPipe { .. } => Category::CurvedPipe,
            Self::Flipper(_) => Category::Flipper,
            Self::BlackHole => Category::BlackHole,
        }
    }

    /// Only balls respond to forces and impulses.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Ball)
    }
}

fn ball_material() -> Material {
    Material { density: 1.0, friction: 0.1, restitution: 0.5, restitution_velocity: 0.5 }
}

fn obstacle_material() -> Material {
    Material { density: 1.0, friction: 0.3, restitution: 0.6, restitution_velocity: 0.5 }
}

fn wall_material() -> Material {
    Material { density: 1.0, friction: 0.2, restitution: 0.3, restitution_velocity: 1.0 }
}

impl PhysicsBody {
    /// Ball centred at `position`.
    pub fn ball(position: Vector2) -> Result<Self, ShapeError> {
        let shape = Shape::circle(BALL_RADIUS)?.at(position);
        Ok(Self::new(shape, ball_material(), Gizmo::Ball))
    }

    /// Square bumper filling the cell centred at `position`.
    pub fn square(position: Vector2) -> Result<Self, ShapeError> {
        let shape = Shape::rectangle(CELL, CELL)?.at(position);
        Ok(Self::new(shape, obstacle_material(), Gizmo::Obstacle))
    }

    /// Round bumper inscribed in the cell centred at `position`.
    pub fn circle_obstacle(position: Vector2) -> Result<Self, ShapeError> {
        let shape = Shape::circle(CELL * 0.5)?.at(position);
        Ok(Self::new(shape, obstacle_material(), Gizmo::Obstacle))
    }

    /// Right-triangle bumper in the cell centred at `position`, right angle
    /// in the lower-left corner.
    pub fn triangle(position: Vector2) -> Result<Self, ShapeError> {
        let h = CELL * 0.5;
        let shape = Shape::triangle(
            position + Vector2::new(-h, -h),
            position + Vector2::new(h, -h),
            position + Vector2::new(-h, h),
        )?;
        Ok(Self::new(shape, obstacle_material(), Gizmo::Obstacle))
    }

    /// Wall rectangle of `width` × `height` centred at `center`.
    pub fn boundary(center: Vector2, width: f64, height: f64) -> Result<Self, ShapeError> {
        let shape = Shape::rectangle(width, height)?.at(center);
        Ok(Self::new(shape, wall_material(), Gizmo::Boundary))
    }

    /// Straight pipe one cell long and half a cell across, centred at
    /// `position`, its channel turned `angle` radians from the x axis.
    pub fn pipe(position: Vector2, angle: f64) -> Result<Self, ShapeError> {
        let shape = Shape::rectangle(CELL, CELL * 0.5)?.at(position).rotated(angle);
        Ok(Self::new(shape, wall_material(), Gizmo::Pipe))
    }

    /// Curved pipe with its wedge corner at `corner`, turned `angle` radians.
    pub fn curved_pipe(corner: Vector2, angle: f64) -> Result<Self, ShapeError> {
        let outer = CELL * 0.75;
        let inner = CELL * 0.25;
        let shape = Shape::quarter_circle(outer)?.at(corner).rotated(angle);
        Ok(Self::new(shape, wall_material(), Gizmo::CurvedPipe { inner_ratio: inner / outer }))
    }

    /// Flipper two cells long and a quarter cell thick, hinged at `pivot`
    /// and extending right (left side) or left (right side) at rest.
    pub fn flipper(pivot: Vector2, side: FlipperSide) -> Result<Self, ShapeError> {
        let length = CELL * 2.0;
        let center = pivot + Vector2::new(side.sign() * length * 0.5, 0.0);
        let shape = Shape::rectangle(length, CELL * 0.25)?.at(center);
        let state = FlipperState { side, pivot, angle: 0.0, raised: false };
        Ok(Self::new(shape, obstacle_material(), Gizmo::Flipper(state)))
    }

    /// Black hole filling the cell centred at `position`.
    pub fn black_hole(position: Vector2) -> Result<Self, ShapeError> {
        let shape = Shape::circle(CELL * 0.5)?.at(position);
        Ok(Self::new(shape, Material::default(), Gizmo::BlackHole).with_trigger(true))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn presets_pick_categories_and_mass() {
        let ball = PhysicsBody::ball(Vector2::new(1.0, 1.0)).unwrap();
        assert_eq!(ball.category(), Category::Ball);
        assert!(!ball.is_static());
        let hole = PhysicsBody::black_hole(Vector2::ZERO).unwrap();
        assert!(hole.is_trigger());
        assert!(hole.is_static());
        let wall = PhysicsBody::boundary(Vector2::ZERO, 10.0, 1.0).unwrap();
        assert_eq!(wall.category(), Category::Obstacle);
    }

    #[test]
    fn triangle_preset_covers_cell_corner() {
        let t = PhysicsBody::triangle(Vector2::new(0.5, 0.5)).unwrap();
        let bb = t.shape().aabb();
        assert!(bb.min().distance(&Vector2::ZERO) < 1e-9);
        assert!(bb.max().distance(&Vector2::new(1.0, 1.0)) < 1e-9);
    }

    #[test]
    fn flipper_swings_to_cap_and_back() {
        let config = FlipperConfig::default();
        let mut state =
            FlipperState { side: FlipperSide::Right, pivot: Vector2::ZERO, angle: 0.0, raised: true };
        let mut total = 0.0;
        for _ in 0..10 {
            let (delta, omega) = state.advance(&config, 60);
            assert!(delta <= 0.0);
            assert!(omega <= 0.0);
            total += delta;
        }
        assert!((state.angle - config.max_angle).abs() < 1e-12);
        assert!((total + config.max_angle).abs() < 1e-12);
        assert_eq!(state.advance(&config, 60), (0.0, 0.0));

        state.raised = false;
        let (delta, omega) = state.advance(&config, 60);
        assert!(delta > 0.0);
        assert!(omega > 0.0);
    }

    #[test]
    fn short_final_step_reports_its_own_speed() {
        let config = FlipperConfig { max_angle: 0.25, step: 0.1 };
        let mut state =
            FlipperState { side: FlipperSide::Right, pivot: Vector2::ZERO, angle: 0.0, raised: true };
        let (_, omega) = state.advance(&config, 60);
        assert!((omega + 6.0).abs() < 1e-9);
        state.advance(&config, 60);
        let (delta, omega) = state.advance(&config, 60);
        assert!((delta + 0.05).abs() < 1e-9);
        assert!((omega + 3.0).abs() < 1e-9);
        assert!((state.angle - 0.25).abs() < 1e-12);
    }
}
