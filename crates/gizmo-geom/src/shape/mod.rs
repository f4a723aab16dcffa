// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Convex shape model.
//!
//! A [`Shape`] is a closed set of geometry variants placed by a
//! [`Transform`]. Every variant answers the same four questions, which is all
//! the collision pipeline needs:
//! - what is my world AABB ([`Shape::aabb`]);
//! - what is my projection onto an axis ([`Shape::project`]);
//! - which separating-axis candidates do I contribute ([`Shape::axes`]);
//! - what is my farthest point along a direction ([`Shape::farthest_point`],
//!   [`Shape::contact_point`]).
//!
//! Adding a variant means one new arm per query here and one new entry in the
//! narrow-phase pair table.

use core::f64::consts::PI;

use thiserror::Error;

use crate::math::Vector2;
use crate::types::aabb::Aabb;
use crate::types::interval::Interval;
use crate::types::transform::Transform;

mod circle;
mod polygon;
mod quarter_circle;

pub use circle::Circle;
pub use polygon::Polygon;
pub use quarter_circle::QuarterCircle;

/// Errors raised while building shapes from user parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Radius, width or height was not a positive finite number.
    #[error("shape dimension must be positive and finite")]
    NonPositiveDimension,
    /// A polygon needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    /// Vertices are collinear (zero area).
    #[error("polygon is degenerate (zero area)")]
    Degenerate,
    /// Vertices do not describe a convex polygon.
    #[error("polygon is not convex")]
    NotConvex,
}

/// Discriminant of [`Geometry`], used to key pair dispatch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeTag {
    /// [`Circle`].
    Circle,
    /// [`Polygon`].
    Polygon,
    /// [`QuarterCircle`].
    QuarterCircle,
}

/// Local-space geometry of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Circle centred on the local origin.
    Circle(Circle),
    /// Convex polygon with its centroid on the local origin.
    Polygon(Polygon),
    /// Quarter-circle wedge with its corner on the local origin.
    QuarterCircle(QuarterCircle),
}

impl Geometry {
    pub(crate) const fn circle(radius: f64) -> Self {
        Self::Circle(Circle::new(radius))
    }

    pub(crate) fn rectangle(width: f64, height: f64) -> Self {
        Self::Polygon(Polygon::rectangle(width, height))
    }

    /// Tag of this variant.
    pub fn tag(&self) -> ShapeTag {
        match self {
            Self::Circle(_) => ShapeTag::Circle,
            Self::Polygon(_) => ShapeTag::Polygon,
            Self::QuarterCircle(_) => ShapeTag::QuarterCircle,
        }
    }

    fn scaled(&self, factor: f64) -> Self {
        match self {
            Self::Circle(c) => Self::Circle(c.scaled(factor)),
            Self::Polygon(p) => Self::Polygon(p.scaled(factor)),
            Self::QuarterCircle(q) => Self::QuarterCircle(q.scaled(factor)),
        }
    }
}

fn check_dimension(value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::NonPositiveDimension)
    }
}

/// A placed convex shape.
///
/// `scale_rate` is an integer zoom step (1 = base size). Changing it rescales
/// the local geometry about the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    geometry: Geometry,
    transform: Transform,
    scale_rate: u32,
}

impl Shape {
    pub(crate) fn from_parts(geometry: Geometry, transform: Transform) -> Self {
        Self { geometry, transform, scale_rate: 1 }
    }

    /// Circle of `radius` at the origin.
    pub fn circle(radius: f64) -> Result<Self, ShapeError> {
        Ok(Self::from_parts(Geometry::circle(check_dimension(radius)?), Transform::identity()))
    }

    /// Axis-aligned `width` × `height` rectangle centred on the origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, ShapeError> {
        let geometry = Geometry::rectangle(check_dimension(width)?, check_dimension(height)?);
        Ok(Self::from_parts(geometry, Transform::identity()))
    }

    /// Triangle through `a`, `b`, `c`; the transform is placed on the centroid
    /// so world vertices equal the inputs.
    pub fn triangle(a: Vector2, b: Vector2, c: Vector2) -> Result<Self, ShapeError> {
        Self::polygon(&[a, b, c])
    }

    /// Convex polygon through `vertices` (either winding); the transform is
    /// placed on the centroid so world vertices equal the inputs.
    pub fn polygon(vertices: &[Vector2]) -> Result<Self, ShapeError> {
        let (polygon, centroid) = Polygon::from_vertices(vertices)?;
        Ok(Self::from_parts(Geometry::Polygon(polygon), Transform::from_translation(centroid)))
    }

    /// Quarter-circle wedge of `radius` with its corner at the origin.
    pub fn quarter_circle(radius: f64) -> Result<Self, ShapeError> {
        let geometry = Geometry::QuarterCircle(QuarterCircle::new(check_dimension(radius)?));
        Ok(Self::from_parts(geometry, Transform::identity()))
    }

    /// Moves the shape so its local origin sits at `position`.
    pub fn at(mut self, position: Vector2) -> Self {
        self.transform.set_translation(position);
        self
    }

    /// Rotates the shape by `angle` radians about its local origin.
    pub fn rotated(mut self, angle: f64) -> Self {
        let pivot = self.transform.translation();
        self.transform.rotate_about(angle, pivot);
        self
    }

    /// Local geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Variant tag.
    pub fn tag(&self) -> ShapeTag {
        self.geometry.tag()
    }

    /// Placement.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable placement; the solver moves shapes through this.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Current integer zoom step.
    pub fn scale_rate(&self) -> u32 {
        self.scale_rate
    }

    /// Rescales the local geometry to zoom step `rate`.
    ///
    /// # Panics
    /// Panics if `rate` is zero.
    pub fn set_scale_rate(&mut self, rate: u32) {
        assert!(rate > 0, "scale rate must be at least 1");
        if rate == self.scale_rate {
            return;
        }
        let factor = f64::from(rate) / f64::from(self.scale_rate);
        self.geometry = self.geometry.scaled(factor);
        self.scale_rate = rate;
    }

    /// World-space geometric centre (centroid).
    pub fn center(&self) -> Vector2 {
        match &self.geometry {
            Geometry::Circle(_) | Geometry::Polygon(_) => self.transform.translation(),
            Geometry::QuarterCircle(q) => {
                let c = 4.0 * q.radius() / (3.0 * PI);
                self.transform.transform(Vector2::new(c, c))
            }
        }
    }

    /// World-space AABB.
    pub fn aabb(&self) -> Aabb {
        match &self.geometry {
            Geometry::Circle(c) => circle::aabb(c, &self.transform),
            Geometry::Polygon(p) => polygon::aabb(p, &self.transform),
            Geometry::QuarterCircle(q) => {
                let r = q.radius();
                let corners = [
                    Vector2::ZERO,
                    Vector2::new(r, 0.0),
                    Vector2::new(r, r),
                    Vector2::new(0.0, r),
                ]
                .map(|v| self.transform.transform(v));
                Aabb::from_points(&corners)
            }
        }
    }

    /// Projection onto the unit `axis`.
    pub fn project(&self, axis: Vector2) -> Interval {
        match &self.geometry {
            Geometry::Circle(c) => circle::project(c, &self.transform, axis),
            Geometry::Polygon(p) => polygon::project(p, &self.transform, axis),
            Geometry::QuarterCircle(q) => {
                quarter_circle::approximate_rectangle(q, &self.transform).project(axis)
            }
        }
    }

    /// Separating-axis candidates, given the other shape's foci.
    ///
    /// Returned axes are unit length or zero (degenerate; callers skip them).
    pub fn axes(&self, foci: &[Vector2]) -> Vec<Vector2> {
        match &self.geometry {
            Geometry::Circle(_) => circle::axes(&self.transform, foci),
            Geometry::Polygon(p) => polygon::axes(p, &self.transform, foci),
            Geometry::QuarterCircle(q) => {
                quarter_circle::approximate_rectangle(q, &self.transform).axes(foci)
            }
        }
    }

    /// Foci used by the other shape to build extra axes; only circles have one.
    pub fn foci(&self) -> Option<Vector2> {
        match &self.geometry {
            Geometry::Circle(_) => Some(self.transform.translation()),
            Geometry::Polygon(_) | Geometry::QuarterCircle(_) => None,
        }
    }

    /// Support point: the world point farthest along `direction`.
    pub fn farthest_point(&self, direction: Vector2) -> Vector2 {
        match &self.geometry {
            Geometry::Circle(c) => circle::farthest_point(c, &self.transform, direction),
            Geometry::Polygon(p) => polygon::farthest_point(p, &self.transform, direction),
            Geometry::QuarterCircle(q) => {
                quarter_circle::approximate_circle(q, &self.transform).farthest_point(direction)
            }
        }
    }

    /// Single contact point along `direction`, for shapes whose farthest
    /// feature is a point. Polygons answer with an edge or vertex pair and
    /// return `None`.
    pub fn contact_point(&self, direction: Vector2) -> Option<Vector2> {
        match &self.geometry {
            Geometry::Circle(c) => Some(circle::farthest_point(c, &self.transform, direction)),
            Geometry::Polygon(_) | Geometry::QuarterCircle(_) => None,
        }
    }

    /// World vertices of a quarter circle (corner, arc ends); `None` otherwise.
    pub fn quarter_circle_vertices(&self) -> Option<[Vector2; 3]> {
        match &self.geometry {
            Geometry::QuarterCircle(q) => Some(quarter_circle::world_vertices(q, &self.transform)),
            _ => None,
        }
    }

    /// For a quarter circle, whether `point` is inside the wedge; `None` otherwise.
    pub fn in_wedge(&self, point: Vector2) -> Option<bool> {
        match &self.geometry {
            Geometry::QuarterCircle(q) => Some(quarter_circle::in_wedge(q, &self.transform, point)),
            _ => None,
        }
    }

    /// For a quarter circle, the full circle centred on its corner.
    pub fn approximate_circle(&self) -> Option<Self> {
        match &self.geometry {
            Geometry::QuarterCircle(q) => Some(quarter_circle::approximate_circle(q, &self.transform)),
            _ => None,
        }
    }

    /// For a quarter circle, the square standing in for it outside the wedge.
    pub fn approximate_rectangle(&self) -> Option<Self> {
        match &self.geometry {
            Geometry::QuarterCircle(q) => {
                Some(quarter_circle::approximate_rectangle(q, &self.transform))
            }
            _ => None,
        }
    }

    /// Radius for circles and quarter circles; `None` for polygons.
    pub fn radius(&self) -> Option<f64> {
        match &self.geometry {
            Geometry::Circle(c) => Some(c.radius()),
            Geometry::QuarterCircle(q) => Some(q.radius()),
            Geometry::Polygon(_) => None,
        }
    }
}
