// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plain scene records: what a saved board stores per body.
//!
//! Geometry is stored at zoom step 1 and re-scaled on load, so a record
//! written at any zoom rebuilds the same body.

use gizmo_geom::{Geometry, Shape, Transform, Vector2};

use crate::body::{Material, PhysicsBody};
use crate::error::RecordError;
use crate::gizmo::Gizmo;

/// Shape parameters at zoom step 1, in the shape's local frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ShapeParams {
    /// Circle centred on the body origin.
    Circle {
        /// Radius.
        radius: f64,
    },
    /// Convex polygon around the body origin.
    Polygon {
        /// Local vertices.
        vertices: Vec<Vector2>,
    },
    /// Quarter-circle wedge with its corner on the body origin.
    QuarterCircle {
        /// Radius.
        radius: f64,
    },
}

impl ShapeParams {
    fn of(shape: &Shape) -> Self {
        let base = f64::from(shape.scale_rate());
        match shape.geometry() {
            Geometry::Circle(c) => Self::Circle { radius: c.radius() / base },
            Geometry::Polygon(p) => Self::Polygon {
                vertices: p.vertices().iter().map(|v| v.scale(1.0 / base)).collect(),
            },
            Geometry::QuarterCircle(q) => Self::QuarterCircle { radius: q.radius() / base },
        }
    }

    fn build(&self) -> Result<Shape, RecordError> {
        let shape = match self {
            Self::Circle { radius } => Shape::circle(*radius)?,
            Self::Polygon { vertices } => Shape::polygon(vertices)?,
            Self::QuarterCircle { radius } => Shape::quarter_circle(*radius)?,
        };
        Ok(shape)
    }
}

/// One body of a saved scene.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyRecord {
    /// Kind and kind-specific state.
    pub gizmo: Gizmo,
    /// Geometry at zoom step 1.
    pub shape: ShapeParams,
    /// World x of the shape origin.
    pub x: f64,
    /// World y of the shape origin.
    pub y: f64,
    /// Rotation in radians.
    pub angle: f64,
    /// Surface and density.
    pub material: Material,
    /// Zoom step the body was saved at.
    pub scale_rate: u32,
    /// Whether the body is detect-only.
    pub trigger: bool,
}

impl BodyRecord {
    /// Captures `body`'s placement, geometry and kind. Velocities are not kept.
    pub fn from_body(body: &PhysicsBody) -> Self {
        let transform = body.transform();
        let position = transform.translation();
        Self {
            gizmo: *body.gizmo(),
            shape: ShapeParams::of(body.shape()),
            x: position.x,
            y: position.y,
            angle: transform.rotation(),
            material: *body.material(),
            scale_rate: body.scale_rate(),
            trigger: body.is_trigger(),
        }
    }

    /// Rebuilds the body.
    pub fn to_body(&self) -> Result<PhysicsBody, RecordError> {
        if self.scale_rate == 0 {
            return Err(RecordError::ZeroScaleRate);
        }
        let mut shape = self.shape.build()?;
        // Polygons come back centred on their centroid; keep that offset
        // (scaled and turned with the body) so off-centre vertices stay put.
        let offset =
            shape.transform().translation().scale(f64::from(self.scale_rate)).rotate(self.angle);
        *shape.transform_mut() = Transform::new(Vector2::new(self.x, self.y) + offset, self.angle);
        shape.set_scale_rate(self.scale_rate);
        Ok(PhysicsBody::new(shape, self.material, self.gizmo).with_trigger(self.trigger))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::gizmo::FlipperSide;

    #[test]
    fn flipper_record_keeps_state_and_pose() {
        let mut flipper = PhysicsBody::flipper(Vector2::new(2.0, 1.0), FlipperSide::Right).unwrap();
        flipper.transform_mut().rotate_about(-0.3, Vector2::new(2.0, 1.0));
        let record = BodyRecord::from_body(&flipper);
        let rebuilt = record.to_body().unwrap();
        assert_eq!(rebuilt.gizmo(), flipper.gizmo());
        let a = rebuilt.shape().aabb();
        let b = flipper.shape().aabb();
        assert!((a.min() - b.min()).length() < 1e-9);
        assert!((a.max() - b.max()).length() < 1e-9);
    }

    #[test]
    fn scaled_circle_is_stored_at_base_size() {
        let mut ball = PhysicsBody::ball(Vector2::ZERO).unwrap();
        ball.set_scale_rate(3);
        let record = BodyRecord::from_body(&ball);
        assert_eq!(record.scale_rate, 3);
        let ShapeParams::Circle { radius } = record.shape else {
            panic!("expected circle, got {:?}", record.shape);
        };
        assert!((radius - crate::gizmo::BALL_RADIUS).abs() < 1e-12);
        let rebuilt = record.to_body().unwrap();
        assert!((rebuilt.shape().radius().unwrap() - 3.0 * crate::gizmo::BALL_RADIUS).abs() < 1e-12);
    }

    #[test]
    fn off_centre_polygon_record_keeps_its_vertices() {
        let record = BodyRecord {
            gizmo: Gizmo::Obstacle,
            shape: ShapeParams::Polygon {
                vertices: vec![Vector2::ZERO, Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)],
            },
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            material: Material::default(),
            scale_rate: 1,
            trigger: false,
        };
        let body = record.to_body().unwrap();
        let aabb = body.shape().aabb();
        assert!(aabb.min().distance(&Vector2::ZERO) < 1e-12);
        assert!(aabb.max().distance(&Vector2::new(1.0, 1.0)) < 1e-12);

        let turned = BodyRecord {
            x: 2.0,
            y: 1.0,
            angle: core::f64::consts::FRAC_PI_2,
            scale_rate: 2,
            ..record
        };
        let aabb = turned.to_body().unwrap().shape().aabb();
        assert!(aabb.min().distance(&Vector2::new(0.0, 1.0)) < 1e-9);
        assert!(aabb.max().distance(&Vector2::new(2.0, 3.0)) < 1e-9);

        let again = BodyRecord::from_body(&turned.to_body().unwrap()).to_body().unwrap();
        let back = again.shape().aabb();
        assert!(back.min().distance(&aabb.min()) < 1e-9);
        assert!(back.max().distance(&aabb.max()) < 1e-9);
    }

    #[test]
    fn zero_scale_rate_is_rejected() {
        let mut record = BodyRecord::from_body(&PhysicsBody::ball(Vector2::ZERO).unwrap());
        record.scale_rate = 0;
        assert_eq!(record.to_body().unwrap_err(), RecordError::ZeroScaleRate);
    }
}
