//! Error types for box estimation.

use thiserror::Error;
use toric_lattice::LatticeError;

/// Errors that can occur while estimating a box.
///
/// Singular ray subsystems are skipped and never reported here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoxError {
    /// The fan has no rays.
    #[error("fan has no rays")]
    NoRays,

    /// Rays have length zero.
    #[error("rays have dimension zero")]
    ZeroDimension,

    /// A ray's length differs from the first ray's.
    #[error("ray {index} has {actual} coordinates, expected {expected}")]
    RaggedRays {
        /// Index of the offending ray.
        index: usize,
        /// Dimension taken from the first ray.
        expected: usize,
        /// Length of the offending ray.
        actual: usize,
    },

    /// Divisor length differs from the number of rays.
    #[error("divisor has {divisor} coefficients but the fan has {rays} rays")]
    ShapeMismatch {
        /// Number of rays.
        rays: usize,
        /// Number of divisor coefficients.
        divisor: usize,
    },

    /// Lattice arithmetic failed for a reason other than singularity.
    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

/// Result type for box estimation.
pub type Result<T> = std::result::Result<T, BoxError>;
