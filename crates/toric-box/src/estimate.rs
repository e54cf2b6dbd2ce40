//! Box estimation from ray subsystems.
//!
//! Every `dim`-sized subset of `(ray, coefficient)` pairs defines a square
//! system `M · m = -a` whose solution is the point where the divisor's
//! local trivialization vanishes. The box is the coordinate-wise hull of
//! those points and the origin, widened by one unit on every side.

use serde::{Deserialize, Serialize};
use toric_lattice::{
    binomial, combinations, solve_exact, solve_float, LatticeError, LatticePoint, RayMatrix,
};
use tracing::{debug, trace};

use crate::bbox::LatticeBox;
use crate::error::{BoxError, Result};

/// Margin added on each side of every axis after aggregation.
pub const BOX_MARGIN: i64 = 1;

/// How square ray systems are solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveMethod {
    /// Integer determinants and Cramer's rule; deterministic.
    #[default]
    Exact,
    /// `f64` matrix inversion through nalgebra.
    Float,
}

/// The solved candidate point of one invertible ray subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VanishingPoint {
    /// Indices of the rays forming the subsystem, ascending.
    pub rays: Vec<usize>,
    /// Solution truncated toward zero.
    pub point: LatticePoint,
}

/// Validate the shape of the inputs and return the lattice dimension.
pub fn check_shape<R: AsRef<[i64]>>(rays: &[R], divisor: &[i64]) -> Result<usize> {
    let first = rays.first().ok_or(BoxError::NoRays)?;
    let dim = first.as_ref().len();
    if dim == 0 {
        return Err(BoxError::ZeroDimension);
    }
    if let Some((index, ray)) = rays
        .iter()
        .enumerate()
        .find(|(_, r)| r.as_ref().len() != dim)
    {
        return Err(BoxError::RaggedRays {
            index,
            expected: dim,
            actual: ray.as_ref().len(),
        });
    }
    if divisor.len() != rays.len() {
        return Err(BoxError::ShapeMismatch {
            rays: rays.len(),
            divisor: divisor.len(),
        });
    }
    Ok(dim)
}

/// Candidate vanishing points of every invertible `dim`-subsystem.
///
/// Singular subsystems are skipped. Points are reported in the order the
/// subsets are enumerated and before any widening.
pub fn vanishing_points<R: AsRef<[i64]>>(
    rays: &[R],
    divisor: &[i64],
    method: SolveMethod,
) -> Result<Vec<VanishingPoint>> {
    let dim = check_shape(rays, divisor)?;
    let pairs: Vec<(usize, &[i64], i64)> = rays
        .iter()
        .zip(divisor)
        .enumerate()
        .map(|(i, (r, &a))| (i, r.as_ref(), a))
        .collect();

    debug!(
        rays = rays.len(),
        dim,
        subsystems = %binomial(rays.len(), dim),
        ?method,
        "enumerating ray subsystems"
    );

    let mut points = Vec::new();
    let mut singular = 0usize;
    for system in combinations(dim, &pairs) {
        let indices: Vec<usize> = system.iter().map(|(i, _, _)| *i).collect();
        let rows: Vec<&[i64]> = system.iter().map(|(_, r, _)| *r).collect();
        let rhs: Vec<i64> = system
            .iter()
            .map(|(_, _, a)| a.checked_neg().ok_or(LatticeError::Overflow))
            .collect::<std::result::Result<_, _>>()?;

        let m = RayMatrix::from_rows(&rows)?;
        let solved = match method {
            SolveMethod::Exact => solve_exact(&m, &rhs)?,
            SolveMethod::Float => solve_float(&m, &rhs)?,
        };
        match solved {
            Some(point) => {
                trace!(rays = ?indices, ?point, "subsystem solved");
                points.push(VanishingPoint {
                    rays: indices,
                    point,
                });
            }
            None => {
                trace!(rays = ?indices, "singular subsystem skipped");
                singular += 1;
            }
        }
    }

    debug!(solved = points.len(), singular, "ray subsystems done");
    Ok(points)
}

/// Bounding box of candidate lattice points, solved exactly.
///
/// See [`compute_box_with`].
pub fn compute_box<R: AsRef<[i64]>>(rays: &[R], divisor: &[i64]) -> Result<LatticeBox> {
    compute_box_with(rays, divisor, SolveMethod::Exact)
}

/// Bounding box of candidate lattice points.
///
/// Starts from the origin, extends to every vanishing point and widens
/// each axis by [`BOX_MARGIN`]. When no subsystem is invertible the
/// result is `[(-1, 1)]` on every axis.
pub fn compute_box_with<R: AsRef<[i64]>>(
    rays: &[R],
    divisor: &[i64],
    method: SolveMethod,
) -> Result<LatticeBox> {
    let points = vanishing_points(rays, divisor, method)?;
    let dim = rays.first().map(|r| r.as_ref().len()).unwrap_or_default();

    let mut bounds = LatticeBox::origin(dim);
    for vp in &points {
        bounds.include_point(&vp.point);
    }
    if points.is_empty() {
        debug!(dim, "no invertible subsystem, box is the widened origin");
    }
    bounds.expand(BOX_MARGIN);
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::Interval;

    const P2: [[i64; 2]; 3] = [[1, 0], [0, 1], [-1, -1]];
    const DP1: [[i64; 2]; 4] = [[1, 0], [0, 1], [-1, -1], [0, -1]];

    #[test]
    fn test_p2_box_contains_widened_origin() {
        let b = compute_box(&P2, &[7, 1, -1]).unwrap();
        assert_eq!(b.dim(), 2);
        for i in b.intervals() {
            assert!(i.min <= -1 && i.max >= 1);
        }
    }

    #[test]
    fn test_p2_box_exact_values() {
        // {u0,u1}: (-7,-1); {u0,u2}: (-7,6); {u1,u2}: (0,-1)
        let pts = vanishing_points(&P2, &[7, 1, -1], SolveMethod::Exact).unwrap();
        let got: Vec<_> = pts.iter().map(|p| p.point.clone()).collect();
        assert_eq!(got, vec![vec![-7, -1], vec![-7, 6], vec![0, -1]]);

        let b = compute_box(&P2, &[7, 1, -1]).unwrap();
        assert_eq!(
            b.intervals(),
            &[Interval::new(-8, 1), Interval::new(-2, 7)]
        );
    }

    #[test]
    fn test_dp1_candidate_point_before_widening() {
        let pts = vanishing_points(&DP1, &[5, 0, 0, -2], SolveMethod::Exact).unwrap();
        let vp = pts.iter().find(|p| p.rays == vec![0, 3]).unwrap();
        // x = -5, -y = 2
        assert_eq!(vp.point, vec![-5, -2]);
    }

    #[test]
    fn test_dp1_skips_parallel_rays() {
        // {u1, u3} = {(0,1), (0,-1)} is singular.
        let pts = vanishing_points(&DP1, &[5, 0, 0, -2], SolveMethod::Exact).unwrap();
        assert_eq!(pts.len(), 5);
        assert!(pts.iter().all(|p| p.rays != vec![1, 3]));
    }

    #[test]
    fn test_degenerate_box_is_widened_origin() {
        // All rays parallel: nothing is solvable.
        let rays: [[i64; 2]; 3] = [[1, 0], [2, 0], [-1, 0]];
        let b = compute_box(&rays, &[3, 4, 5]).unwrap();
        assert_eq!(b.intervals(), &[Interval::new(-1, 1); 2]);
    }

    #[test]
    fn test_fewer_rays_than_dim_is_degenerate() {
        let rays: [[i64; 3]; 2] = [[1, 0, 0], [0, 1, 0]];
        let b = compute_box(&rays, &[1, 1]).unwrap();
        assert_eq!(b, {
            let mut o = LatticeBox::origin(3);
            o.expand(1);
            o
        });
    }

    #[test]
    fn test_divisor_length_mismatch_fails_fast() {
        let err = compute_box(&P2, &[7, 1]).unwrap_err();
        assert_eq!(err, BoxError::ShapeMismatch { rays: 3, divisor: 2 });
    }

    #[test]
    fn test_ragged_rays_rejected() {
        let rays: Vec<Vec<i64>> = vec![vec![1, 0], vec![0, 1, 0]];
        let err = compute_box(&rays, &[0, 0]).unwrap_err();
        assert!(matches!(err, BoxError::RaggedRays { index: 1, .. }));
    }

    #[test]
    fn test_empty_and_zero_dim_rejected() {
        let none: Vec<Vec<i64>> = Vec::new();
        assert_eq!(compute_box(&none, &[]).unwrap_err(), BoxError::NoRays);
        let flat: Vec<Vec<i64>> = vec![vec![], vec![]];
        assert_eq!(
            compute_box(&flat, &[1, 2]).unwrap_err(),
            BoxError::ZeroDimension
        );
    }

    #[test]
    fn test_deterministic() {
        let a = compute_box(&DP1, &[5, 0, 0, -2]).unwrap();
        let b = compute_box(&DP1, &[5, 0, 0, -2]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_float_agrees_with_exact_on_small_fans() {
        for divisor in [[5, 0, 0, -2], [1, 1, 1, 1], [-3, 2, 0, 7]] {
            let exact = compute_box_with(&DP1, &divisor, SolveMethod::Exact).unwrap();
            let float = compute_box_with(&DP1, &divisor, SolveMethod::Float).unwrap();
            assert_eq!(exact, float);
        }
    }

    #[test]
    fn test_truncation_toward_zero() {
        // 2x = -3 -> -1.5 -> -1; y = 0
        let rays: [[i64; 2]; 2] = [[2, 0], [0, 1]];
        let pts = vanishing_points(&rays, &[3, 0], SolveMethod::Exact).unwrap();
        assert_eq!(pts[0].point, vec![-1, 0]);
    }

    #[test]
    fn test_nonzero_candidate_strictly_widens() {
        let b = compute_box(&DP1, &[5, 0, 0, -2]).unwrap();
        let mut unit = LatticeBox::origin(2);
        unit.expand(1);
        assert!(b.contains_box(&unit));
        assert!(b.intervals()[0].min < -1);
        assert!(b.intervals()[1].min < -1);
    }

    #[test]
    fn test_overflow_is_an_error_not_a_skip() {
        let big = i64::MAX;
        let rays: [[i64; 3]; 3] = [[big, big, 1], [big, -big, big], [1, big, -big]];
        let err = compute_box(&rays, &[1, 1, 1]).unwrap_err();
        assert_eq!(err, BoxError::Lattice(LatticeError::Overflow));
    }
}
