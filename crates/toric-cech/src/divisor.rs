//! Torus-invariant divisors as coefficient vectors.

use std::fmt;
use std::ops::{Add, Deref, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A torus-invariant divisor `Σ a_i D_i`, one coefficient per ray.
///
/// Arithmetic is coefficient-wise. Mixing divisors of different lengths
/// panics, as with mismatched matrix dimensions, and so does a coefficient
/// leaving the `i64` range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Divisor(pub Vec<i64>);

impl Divisor {
    /// Divisor from explicit coefficients.
    pub fn new(coefficients: Vec<i64>) -> Self {
        Self(coefficients)
    }

    /// The zero divisor on `n` rays.
    pub fn zero(n: usize) -> Self {
        Self(vec![0; n])
    }

    /// The prime divisor `D_i` on `n` rays.
    pub fn prime(n: usize, i: usize) -> Self {
        let mut d = Self::zero(n);
        d.0[i] = 1;
        d
    }

    /// The canonical divisor `K = -Σ D_i` on `n` rays.
    pub fn canonical(n: usize) -> Self {
        Self(vec![-1; n])
    }

    /// The coefficients.
    pub fn coefficients(&self) -> &[i64] {
        &self.0
    }

    fn zip_with(&self, other: &Divisor, f: impl Fn(i64, i64) -> Option<i64>) -> Divisor {
        assert_eq!(
            self.len(),
            other.len(),
            "divisors have different numbers of coefficients"
        );
        self.map_checked(self.iter().zip(other.iter()).map(|(&a, &b)| f(a, b)))
    }

    fn map_checked(&self, coefficients: impl Iterator<Item = Option<i64>>) -> Divisor {
        let coefficients = coefficients
            .map(|c| c.unwrap_or_else(|| panic!("divisor coefficient overflow in {self}")))
            .collect();
        Divisor(coefficients)
    }
}

impl Deref for Divisor {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for Divisor {
    fn from(v: Vec<i64>) -> Self {
        Self(v)
    }
}

impl Add for &Divisor {
    type Output = Divisor;

    fn add(self, rhs: &Divisor) -> Divisor {
        self.zip_with(rhs, i64::checked_add)
    }
}

impl Add for Divisor {
    type Output = Divisor;

    fn add(self, rhs: Divisor) -> Divisor {
        &self + &rhs
    }
}

impl Add<&Divisor> for Divisor {
    type Output = Divisor;

    fn add(self, rhs: &Divisor) -> Divisor {
        &self + rhs
    }
}

impl Sub for &Divisor {
    type Output = Divisor;

    fn sub(self, rhs: &Divisor) -> Divisor {
        self.zip_with(rhs, i64::checked_sub)
    }
}

impl Sub for Divisor {
    type Output = Divisor;

    fn sub(self, rhs: Divisor) -> Divisor {
        &self - &rhs
    }
}

impl Sub<&Divisor> for Divisor {
    type Output = Divisor;

    fn sub(self, rhs: &Divisor) -> Divisor {
        &self - rhs
    }
}

impl Neg for Divisor {
    type Output = Divisor;

    fn neg(self) -> Divisor {
        self.map_checked(self.iter().map(|a| a.checked_neg()))
    }
}

impl Mul<Divisor> for i64 {
    type Output = Divisor;

    fn mul(self, rhs: Divisor) -> Divisor {
        rhs.map_checked(rhs.iter().map(|a| a.checked_mul(self)))
    }
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{a}")?;
        }
        Ok(())
    }
}

/// Parse a comma- or whitespace-separated coefficient list, e.g. `5,0,0,-2`.
impl FromStr for Divisor {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_matches(|c| c == '[' || c == ']')
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<i64>, _>>()
            .map(Divisor)
    }
}
