//! Square integer linear solves.
//!
//! Two solvers with the same contract: given a square [`RayMatrix`] `M`
//! and a right-hand side `a`, return `Some(x)` with `M · x = a` and every
//! coordinate of `x` truncated toward zero, or `None` if `M` is singular.
//!
//! [`solve_exact`] works over the integers (Bareiss determinants and
//! Cramer's rule) and is deterministic. [`solve_float`] inverts the
//! matrix in `f64` with nalgebra.

use nalgebra::DVector;

use crate::error::{LatticeError, Result};
use crate::{LatticePoint, RayMatrix};

/// Determinant by fraction-free Bareiss elimination.
///
/// All intermediate divisions are exact. Overflow of `i128` is reported
/// as [`LatticeError::Overflow`].
pub fn determinant(m: &RayMatrix) -> Result<i128> {
    let mut a = m.matrix.clone();
    let n = a.nrows();
    if n == 0 {
        return Ok(1);
    }
    let mut sign: i128 = 1;
    let mut prev: i128 = 1;

    for k in 0..n {
        if a[(k, k)] == 0 {
            let Some(pivot) = (k + 1..n).find(|&r| a[(r, k)] != 0) else {
                return Ok(0);
            };
            a.swap_rows(k, pivot);
            sign = -sign;
        }
        let p = a[(k, k)];
        for i in k + 1..n {
            for j in k + 1..n {
                let lhs = a[(i, j)].checked_mul(p).ok_or(LatticeError::Overflow)?;
                let rhs = a[(i, k)]
                    .checked_mul(a[(k, j)])
                    .ok_or(LatticeError::Overflow)?;
                let num = lhs.checked_sub(rhs).ok_or(LatticeError::Overflow)?;
                a[(i, j)] = num / prev;
            }
        }
        prev = p;
    }

    Ok(sign * a[(n - 1, n - 1)])
}

/// Exact solve of `M · x = rhs`, truncating toward zero.
///
/// Returns `Ok(None)` when `M` is singular.
pub fn solve_exact(m: &RayMatrix, rhs: &[i64]) -> Result<Option<LatticePoint>> {
    check_rhs(m, rhs)?;
    let det = determinant(m)?;
    if det == 0 {
        return Ok(None);
    }

    let rhs: Vec<i128> = rhs.iter().map(|&v| i128::from(v)).collect();
    let mut x = Vec::with_capacity(m.dim());
    for col in 0..m.dim() {
        let num = determinant(&m.with_column(col, &rhs))?;
        // Integer division truncates toward zero.
        let coord = num / det;
        x.push(i64::try_from(coord).map_err(|_| LatticeError::Overflow)?);
    }
    Ok(Some(x))
}

/// Floating-point solve of `M · x = rhs` via `M⁻¹ · rhs`, truncating toward zero.
///
/// Returns `Ok(None)` when nalgebra cannot invert `M`. Results near an
/// integer boundary may differ from [`solve_exact`].
pub fn solve_float(m: &RayMatrix, rhs: &[i64]) -> Result<Option<LatticePoint>> {
    check_rhs(m, rhs)?;
    let Some(inv) = m.to_f64().try_inverse() else {
        return Ok(None);
    };
    let a = DVector::from_iterator(rhs.len(), rhs.iter().map(|&v| v as f64));
    let x = inv * a;
    if x.iter().any(|v| !v.is_finite()) {
        return Ok(None);
    }
    Ok(Some(x.iter().map(|v| v.trunc() as i64).collect()))
}

fn check_rhs(m: &RayMatrix, rhs: &[i64]) -> Result<()> {
    if rhs.len() != m.dim() {
        return Err(LatticeError::RhsLength {
            expected: m.dim(),
            actual: rhs.len(),
        });
    }
    Ok(())
}
