// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{clamp, Vector2};

/// Rigid 2D transform used for shape placement and body motion.
///
/// Conventions:
/// - Rotation is stored as a `(cos, sin)` pair, not an angle. Rotations are
///   composed with the trig addition formulas and each component is clamped
///   to `[-1, 1]`, keeping `cos² + sin² ≈ 1` against floating drift.
/// - Translation is in world units and is applied after rotation:
///   `world = R * local + t`.
/// - Rotating the transform (without a pivot) rotates the translation about
///   the world origin as well; use [`Transform::rotate_about`] to pivot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    cost: f64,
    sint: f64,
    x: f64,
    y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no rotation, no translation).
    pub const fn identity() -> Self {
        Self { cost: 1.0, sint: 0.0, x: 0.0, y: 0.0 }
    }

    /// Creates a transform rotated by `angle` radians and translated to `translation`.
    pub fn new(translation: Vector2, angle: f64) -> Self {
        Self { cost: angle.cos(), sint: angle.sin(), x: translation.x, y: translation.y }
    }

    /// Creates a pure translation.
    pub const fn from_translation(translation: Vector2) -> Self {
        Self { cost: 1.0, sint: 0.0, x: translation.x, y: translation.y }
    }

    /// Cosine of the rotation.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Sine of the rotation.
    pub fn sint(&self) -> f64 {
        self.sint
    }

    /// Translation component.
    pub fn translation(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Rotation angle in radians, in `(-π, π]`.
    pub fn rotation(&self) -> f64 {
        self.sint.atan2(self.cost)
    }

    /// Replaces the translation, keeping the rotation.
    pub fn set_translation(&mut self, translation: Vector2) {
        self.x = translation.x;
        self.y = translation.y;
    }

    /// Replaces the rotation with `angle` radians, keeping the translation.
    pub fn set_rotation(&mut self, angle: f64) {
        self.cost = angle.cos();
        self.sint = angle.sin();
    }

    /// Translates by `delta`.
    pub fn translate(&mut self, delta: Vector2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn compose_rotation(&mut self, cos: f64, sin: f64) {
        let cost = clamp(self.cost * cos - self.sint * sin, -1.0, 1.0);
        let sint = clamp(self.sint * cos + self.cost * sin, -1.0, 1.0);
        self.cost = cost;
        self.sint = sint;
    }

    /// Rotates by `theta` radians about the world origin.
    pub fn rotate(&mut self, theta: f64) {
        let (sin, cos) = theta.sin_cos();
        self.compose_rotation(cos, sin);
        let t = Vector2::new(self.x, self.y).rotate_cs(cos, sin);
        self.x = t.x;
        self.y = t.y;
    }

    /// Rotates by `theta` radians about the world point `pivot`.
    pub fn rotate_about(&mut self, theta: f64, pivot: Vector2) {
        let (sin, cos) = theta.sin_cos();
        self.compose_rotation(cos, sin);
        let t = (Vector2::new(self.x, self.y) - pivot).rotate_cs(cos, sin) + pivot;
        self.x = t.x;
        self.y = t.y;
    }

    /// Maps a local point into world space.
    pub fn transform(&self, local: Vector2) -> Vector2 {
        local.rotate_cs(self.cost, self.sint) + Vector2::new(self.x, self.y)
    }

    /// Maps a world point into local space.
    pub fn inverse_transform(&self, world: Vector2) -> Vector2 {
        (world - Vector2::new(self.x, self.y)).rotate_cs(self.cost, -self.sint)
    }

    /// Rotates a local direction into world space (no translation).
    pub fn transform_r(&self, local: Vector2) -> Vector2 {
        local.rotate_cs(self.cost, self.sint)
    }

    /// Rotates a world direction into local space (no translation).
    pub fn inverse_transform_r(&self, world: Vector2) -> Vector2 {
        world.rotate_cs(self.cost, -self.sint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn rotation_stays_normalized_after_many_steps() {
        let mut t = Transform::identity();
        for _ in 0..10_000 {
            t.rotate(0.0137);
        }
        let norm = t.cost() * t.cost() + t.sint() * t.sint();
        assert!((norm - 1.0).abs() < 1e-9, "cos²+sin² drifted to {norm}");
    }

    #[test]
    fn inverse_transform_round_trips() {
        let mut t = Transform::new(Vector2::new(3.0, -2.0), 0.7);
        t.translate(Vector2::new(0.5, 0.5));
        let p = Vector2::new(1.25, 4.0);
        let back = t.inverse_transform(t.transform(p));
        assert!(back.distance(&p) < 1e-12);
    }

    #[test]
    fn rotate_about_pivot_keeps_pivot_fixed() {
        let mut t = Transform::from_translation(Vector2::new(2.0, 0.0));
        let pivot = Vector2::new(1.0, 0.0);
        t.rotate_about(FRAC_PI_2, pivot);
        let moved = t.translation();
        assert!(moved.distance(&Vector2::new(1.0, 1.0)) < 1e-12);
        assert!((t.rotation() - FRAC_PI_2).abs() < 1e-12);
    }
}
