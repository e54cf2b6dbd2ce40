#![warn(missing_docs)]

//! Cohomology of line bundles on toric varieties via an external Čech engine.
//!
//! This crate validates a fan and divisor, computes the box of candidate
//! lattice points with [`toric_box`], writes the request artifact the Čech
//! engine reads, and runs the engine through a [`CohomologyOracle`].
//!
//! # Example
//!
//! ```no_run
//! use toric_cech::{compute_kth_cohomology, EngineConfig, Fan, ProcessEngine};
//!
//! let p2 = Fan::new(
//!     vec![vec![1, 0], vec![0, 1], vec![-1, -1]],
//!     vec![vec![0, 1], vec![1, 2], vec![2, 0]],
//! );
//! let engine = ProcessEngine::new(EngineConfig::default().with_env_overrides());
//! let h0 = compute_kth_cohomology(&engine, &p2, &[7, 1, -1], 0)?;
//! println!("h^0 = {h0}");
//! # Ok::<(), toric_cech::CechError>(())
//! ```

pub mod config;
pub mod divisor;
pub mod engine;
pub mod error;
pub mod fan;
pub mod request;

pub use config::{EngineConfig, DEFAULT_ENGINE, ENGINE_ENV};
pub use divisor::Divisor;
pub use engine::{
    cohomology_dimensions, compute_kth_cohomology, parse_engine_output, CohomologyOracle,
    ProcessEngine,
};
pub use error::{CechError, EngineError, Result};
pub use fan::Fan;
pub use request::CohomologyRequest;
pub use toric_box::{LatticeBox, SolveMethod};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Fan>();
        assert_send_sync::<Divisor>();
        assert_send_sync::<LatticeBox>();
        assert_send_sync::<CohomologyRequest>();
        assert_send_sync::<EngineConfig>();
        assert_send_sync::<ProcessEngine>();
        assert_send_sync::<CechError>();
        assert_send_sync::<toric_lattice::RayMatrix>();
        assert_send_sync::<toric_box::VanishingPoint>();
    }
}
