//! Error types for lattice operations.

use thiserror::Error;

/// Errors that can occur while solving lattice systems.
///
/// A singular system is not an error: solvers report it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// The system is not square.
    #[error("matrix is not square: {rows} rows, row of length {cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Offending row length.
        cols: usize,
    },

    /// Right-hand side length does not match the matrix.
    #[error("right-hand side has {actual} entries, expected {expected}")]
    RhsLength {
        /// Matrix dimension.
        expected: usize,
        /// Actual right-hand side length.
        actual: usize,
    },

    /// Exact arithmetic exceeded the integer range.
    #[error("integer overflow during exact elimination")]
    Overflow,
}

/// Result type for lattice operations.
pub type Result<T> = std::result::Result<T, LatticeError>;
