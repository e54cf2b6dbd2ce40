#![warn(missing_docs)]

//! Bounding boxes for sections of toric line bundles.
//!
//! Given the rays of a fan and the coefficients of a torus-invariant
//! divisor, [`compute_box`] returns the smallest integer box (plus a
//! one-unit margin) that holds every lattice point where a local section
//! of the line bundle can be nonzero on some cone.
//!
//! # Example
//!
//! ```
//! use toric_box::{compute_box, Interval};
//!
//! // The projective plane with D = 7D_0 + D_1 - D_2.
//! let rays: [[i64; 2]; 3] = [[1, 0], [0, 1], [-1, -1]];
//! let b = compute_box(&rays, &[7, 1, -1]).unwrap();
//! assert_eq!(b.intervals(), &[Interval::new(-8, 1), Interval::new(-2, 7)]);
//! ```

pub mod bbox;
pub mod error;
pub mod estimate;

pub use bbox::{Interval, LatticeBox};
pub use error::{BoxError, Result};
pub use estimate::{
    check_shape, compute_box, compute_box_with, vanishing_points, SolveMethod, VanishingPoint,
    BOX_MARGIN,
};
pub use toric_lattice::{LatticePoint, Ray};
