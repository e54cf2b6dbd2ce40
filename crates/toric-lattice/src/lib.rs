#![warn(missing_docs)]

//! Lattice primitives for toric fans.
//!
//! Thin wrappers around nalgebra providing the integer types used to
//! describe a fan (rays, square ray matrices) together with the two
//! pieces of combinatorics the box estimator needs: enumeration of
//! fixed-size subsets and solving square integer linear systems.
//!
//! # Example
//!
//! ```
//! use toric_lattice::{combinations, solve_exact, RayMatrix};
//!
//! let rays = [[1, 0], [0, 1], [-1, -1]];
//! assert_eq!(combinations(2, &rays).count(), 3);
//!
//! let m = RayMatrix::from_rows(&[[1i64, 0], [0, -1]]).unwrap();
//! let x = solve_exact(&m, &[-5, 2]).unwrap();
//! assert_eq!(x, Some(vec![-5, -2]));
//! ```

pub mod combinations;
pub mod error;
pub mod solve;

pub use combinations::{binomial, combinations, Combinations};
pub use error::{LatticeError, Result};
pub use solve::{determinant, solve_exact, solve_float};

use nalgebra::DMatrix;

/// A ray of the fan: a primitive integer vector in the cocharacter lattice.
pub type Ray = Vec<i64>;

/// A lattice point in the character lattice.
pub type LatticePoint = Vec<i64>;

/// A square integer matrix whose rows are rays.
#[derive(Debug, Clone, PartialEq)]
pub struct RayMatrix {
    /// The underlying matrix, widened to `i128` for elimination.
    pub matrix: DMatrix<i128>,
}

impl RayMatrix {
    /// Build a square matrix with one row per ray.
    ///
    /// Fails if the rows are not all of length `rows.len()`.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(LatticeError::NotSquare { rows: 0, cols: 0 });
        }
        if let Some(bad) = rows.iter().find(|r| r.as_ref().len() != n) {
            return Err(LatticeError::NotSquare {
                rows: n,
                cols: bad.as_ref().len(),
            });
        }
        let matrix = DMatrix::from_fn(n, n, |r, c| i128::from(rows[r].as_ref()[c]));
        Ok(Self { matrix })
    }

    /// Dimension of the (square) matrix.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// The same matrix with `f64` entries.
    pub fn to_f64(&self) -> DMatrix<f64> {
        self.matrix.map(|v| v as f64)
    }

    /// Replace column `col` with `rhs`, as used by Cramer's rule.
    pub fn with_column(&self, col: usize, rhs: &[i128]) -> Self {
        let mut matrix = self.matrix.clone();
        for (r, v) in rhs.iter().enumerate() {
            matrix[(r, col)] = *v;
        }
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_square() {
        let m = RayMatrix::from_rows(&[[1i64, 2], [3, 4]]).unwrap();
        assert_eq!(m.dim(), 2);
        assert_eq!(m.matrix[(0, 1)], 2);
        assert_eq!(m.matrix[(1, 0)], 3);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = RayMatrix::from_rows(&[vec![1i64, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, LatticeError::NotSquare { rows: 2, cols: 1 }));
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        let rows: [Ray; 0] = [];
        assert!(RayMatrix::from_rows(&rows).is_err());
    }

    #[test]
    fn test_with_column() {
        let m = RayMatrix::from_rows(&[[1i64, 2], [3, 4]]).unwrap();
        let c = m.with_column(0, &[9, 8]);
        assert_eq!(c.matrix[(0, 0)], 9);
        assert_eq!(c.matrix[(1, 0)], 8);
        assert_eq!(c.matrix[(1, 1)], 4);
    }
}
