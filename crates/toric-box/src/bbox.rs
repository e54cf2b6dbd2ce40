//! Axis-aligned integer boxes in the character lattice.

use serde::{Deserialize, Serialize};

/// A closed integer interval `[min, max]` along one lattice axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Smallest coordinate.
    pub min: i64,
    /// Largest coordinate.
    pub max: i64,
}

impl Interval {
    /// Create an interval from its endpoints.
    pub fn new(min: i64, max: i64) -> Self {
        debug_assert!(min <= max, "interval [{min}, {max}] is inverted");
        Self { min, max }
    }

    /// Expand the interval to include `v`.
    pub fn include(&mut self, v: i64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// Expand the interval by `margin` on both sides.
    pub fn expand(&mut self, margin: i64) {
        self.min = self.min.saturating_sub(margin);
        self.max = self.max.saturating_add(margin);
    }

    /// Whether `v` lies in the interval.
    pub fn contains(&self, v: i64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Number of lattice points in the interval.
    pub fn point_count(&self) -> u64 {
        self.max.abs_diff(self.min) + 1
    }
}

impl From<(i64, i64)> for Interval {
    fn from((min, max): (i64, i64)) -> Self {
        Self::new(min, max)
    }
}

/// An integer box: one [`Interval`] per lattice axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatticeBox {
    intervals: Vec<Interval>,
}

impl LatticeBox {
    /// The box holding only the origin in `dim` dimensions.
    pub fn origin(dim: usize) -> Self {
        Self {
            intervals: vec![Interval::new(0, 0); dim],
        }
    }

    /// Build a box from explicit intervals.
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.intervals.len()
    }

    /// The per-axis intervals.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Expand the box to include a lattice point.
    pub fn include_point(&mut self, p: &[i64]) {
        debug_assert_eq!(p.len(), self.dim());
        for (interval, &v) in self.intervals.iter_mut().zip(p) {
            interval.include(v);
        }
    }

    /// Expand every axis by `margin` on both sides.
    pub fn expand(&mut self, margin: i64) {
        for interval in &mut self.intervals {
            interval.expand(margin);
        }
    }

    /// Whether the box contains the lattice point `p`.
    pub fn contains(&self, p: &[i64]) -> bool {
        p.len() == self.dim() && self.intervals.iter().zip(p).all(|(i, &v)| i.contains(v))
    }

    /// Whether `other` lies inside this box.
    pub fn contains_box(&self, other: &LatticeBox) -> bool {
        other.dim() == self.dim()
            && self
                .intervals
                .iter()
                .zip(&other.intervals)
                .all(|(a, b)| a.min <= b.min && b.max <= a.max)
    }

    /// Total number of lattice points, saturating at `u128::MAX`.
    pub fn lattice_points(&self) -> u128 {
        self.intervals
            .iter()
            .try_fold(1u128, |acc, i| acc.checked_mul(u128::from(i.point_count())))
            .unwrap_or(u128::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_include_and_expand() {
        let mut i = Interval::new(0, 0);
        i.include(-3);
        i.include(2);
        assert_eq!(i, Interval::new(-3, 2));
        i.expand(1);
        assert_eq!(i, Interval::new(-4, 3));
        assert_eq!(i.point_count(), 8);
    }

    #[test]
    fn test_origin_box() {
        let b = LatticeBox::origin(3);
        assert_eq!(b.dim(), 3);
        assert!(b.contains(&[0, 0, 0]));
        assert!(!b.contains(&[0, 1, 0]));
        assert_eq!(b.lattice_points(), 1);
    }

    #[test]
    fn test_include_point() {
        let mut b = LatticeBox::origin(2);
        b.include_point(&[-7, 6]);
        assert_eq!(b.intervals(), &[Interval::new(-7, 0), Interval::new(0, 6)]);
    }

    #[test]
    fn test_contains_box() {
        let mut outer = LatticeBox::origin(2);
        outer.expand(2);
        let mut inner = LatticeBox::origin(2);
        inner.expand(1);
        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
        assert!(!outer.contains_box(&LatticeBox::origin(3)));
    }

    #[test]
    fn test_serialize_as_pairs() {
        let b = LatticeBox::from_intervals(vec![Interval::new(-1, 1), (-2, 3).into()]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"[{"min":-1,"max":1},{"min":-2,"max":3}]"#);
    }
}
