// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::math::epsilon;

/// 2D vector used for points, directions, velocities, and forces.
///
/// * Components are world units (metres) unless the calling context says
///   otherwise (local shape coordinates, impulses).
/// * Arithmetic returns new values; the only in-place operation is
///   [`Vector2::normalize`], which reports the magnitude it removed.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component (positive up).
    pub y: f64,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit vector along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0);

    /// Unit vector along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Cross product of a scalar (z axis) with this vector: `s × v`.
    ///
    /// Used to turn an angular velocity into the linear velocity of a point
    /// at offset `self` from the rotation centre.
    pub fn cross_scalar(&self, s: f64) -> Self {
        Self::new(-s * self.y, s * self.x)
    }

    /// Scales the vector by `scalar`.
    pub fn scale(&self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    /// Magnitude.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared magnitude.
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }

    /// Squared distance to `other`.
    pub fn distance_squared(&self, other: &Self) -> f64 {
        (*other - *self).length_squared()
    }

    /// Vector from `self` to `other` (`other - self`).
    pub fn to(&self, other: &Self) -> Self {
        *other - *self
    }

    /// Returns a unit-length copy, or the zero vector if the magnitude is
    /// ≤ [`epsilon`].
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len <= epsilon() {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Normalises in place and returns the original magnitude.
    ///
    /// Degenerate vectors (magnitude ≤ [`epsilon`]) are left unchanged and
    /// `0.0` is returned so callers can skip them.
    pub fn normalize(&mut self) -> f64 {
        let len = self.length();
        if len <= epsilon() {
            return 0.0;
        }
        self.x /= len;
        self.y /= len;
        len
    }

    /// Returns `true` if both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Counter-clockwise perpendicular `(-y, x)`.
    pub fn left_normal(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Clockwise perpendicular `(y, -x)`.
    ///
    /// For a counter-clockwise polygon edge this is the outward normal.
    pub fn right_normal(&self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Rotates by the rotation encoded as `(cos, sin)`.
    pub fn rotate_cs(&self, cos: f64, sin: f64) -> Self {
        Self::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    /// Rotates by `theta` radians about the origin.
    pub fn rotate(&self, theta: f64) -> Self {
        self.rotate_cs(theta.cos(), theta.sin())
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs.scale(self)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = self.scale(rhs);
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}
