// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Closed interval `[min, max]`, the projection of a shape onto an axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Creates an interval.
    ///
    /// # Panics
    /// Panics if `min > max`.
    pub fn new(min: f64, max: f64) -> Self {
        assert!(min <= max, "invalid interval: {min} > {max}");
        Self { min, max }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Length of the interval.
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if the intervals share at least one point.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.min > other.max || other.min > self.max)
    }

    /// Length of the shared region; only meaningful when [`Self::overlaps`] holds.
    pub fn overlap(&self, other: &Self) -> f64 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// Returns `true` if `other` lies strictly inside this interval.
    pub fn contains(&self, other: &Self) -> bool {
        other.min > self.min && other.max < self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_and_containment() {
        let a = Interval::new(0.0, 5.0);
        let b = Interval::new(4.0, 6.0);
        let c = Interval::new(1.0, 2.0);
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!((a.overlap(&b) - 1.0).abs() < 1e-12);
        assert!(a.contains(&c));
        assert!(!a.contains(&b));
        assert!(!Interval::new(0.0, 1.0).overlaps(&Interval::new(1.5, 2.0)));
    }
}
