//! Cohomology oracles.
//!
//! An oracle takes a serialized request and a degree `k` and returns
//! `dim H^k`. [`ProcessEngine`] runs the external Čech engine; tests and
//! callers with their own engine implement [`CohomologyOracle`] directly.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempPath;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::fan::Fan;
use crate::request::CohomologyRequest;

/// Something that can compute the dimension of `H^k` for a request artifact.
pub trait CohomologyOracle {
    /// Dimension of the `k`-th cohomology group described by `artifact`.
    fn kth_cohomology(&self, artifact: &str, k: usize) -> std::result::Result<u64, EngineError>;
}

impl<T: CohomologyOracle + ?Sized> CohomologyOracle for &T {
    fn kth_cohomology(&self, artifact: &str, k: usize) -> std::result::Result<u64, EngineError> {
        (**self).kth_cohomology(artifact, k)
    }
}

/// The external engine, run once per request.
///
/// The artifact is written to a temporary file which is removed on every
/// exit path, including spawn failures and unparsable output.
#[derive(Debug, Clone, Default)]
pub struct ProcessEngine {
    config: EngineConfig,
}

impl ProcessEngine {
    /// Create an engine from its configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn write_artifact(&self, artifact: &str) -> std::io::Result<TempPath> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("toric-request-").suffix(".txt");
        let mut file = match &self.config.artifact_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        std::io::Write::write_all(&mut file, artifact.as_bytes())?;
        std::io::Write::flush(&mut file)?;
        Ok(file.into_temp_path())
    }

    fn run(&self, artifact: &Path, k: usize) -> std::result::Result<Output, EngineError> {
        debug!(
            program = %self.config.program.display(),
            artifact = %artifact.display(),
            k,
            "invoking cohomology engine"
        );
        Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(artifact)
            .arg(k.to_string())
            .output()
            .map_err(|source| EngineError::Spawn {
                program: self.config.program.display().to_string(),
                source,
            })
    }
}

impl CohomologyOracle for ProcessEngine {
    fn kth_cohomology(&self, artifact: &str, k: usize) -> std::result::Result<u64, EngineError> {
        let path = self.write_artifact(artifact).map_err(EngineError::Artifact)?;
        let output = self.run(&path, k);
        if let Err(err) = path.close() {
            warn!(%err, "could not remove request artifact");
        }
        let output = output?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_engine_output(&output.stdout)
    }
}

/// Read the engine's standard output: a single non-negative integer.
pub fn parse_engine_output(stdout: &[u8]) -> std::result::Result<u64, EngineError> {
    let text = std::str::from_utf8(stdout)
        .map_err(|_| EngineError::MalformedOutput("output is not UTF-8".into()))?;
    let trimmed = text.trim();
    trimmed.parse().map_err(|_| {
        EngineError::MalformedOutput(format!("expected a single integer, got {trimmed:?}"))
    })
}

/// Dimension of `H^k` of the line bundle `O(divisor)` on the toric variety of `fan`.
///
/// Validation happens before the oracle is consulted, so a malformed fan
/// never reaches the engine.
pub fn compute_kth_cohomology<O: CohomologyOracle + ?Sized>(
    oracle: &O,
    fan: &Fan,
    divisor: &[i64],
    k: usize,
) -> Result<u64> {
    let request = CohomologyRequest::new(fan, divisor)?;
    let h = oracle.kth_cohomology(&request.to_artifact(), k)?;
    debug!(k, h, "cohomology computed");
    Ok(h)
}

/// Dimensions of `H^0 .. H^dim`, reusing one request for every degree.
pub fn cohomology_dimensions<O: CohomologyOracle + ?Sized>(
    oracle: &O,
    fan: &Fan,
    divisor: &[i64],
) -> Result<Vec<u64>> {
    let request = CohomologyRequest::new(fan, divisor)?;
    let artifact = request.to_artifact();
    (0..=request.dim())
        .map(|k| -> Result<u64> { Ok(oracle.kth_cohomology(&artifact, k)?) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records the artifacts it sees and answers with `k + 1`.
    #[derive(Default)]
    struct Recording {
        seen: RefCell<Vec<(String, usize)>>,
    }

    impl CohomologyOracle for Recording {
        fn kth_cohomology(
            &self,
            artifact: &str,
            k: usize,
        ) -> std::result::Result<u64, EngineError> {
            self.seen.borrow_mut().push((artifact.to_string(), k));
            Ok(k as u64 + 1)
        }
    }

    fn p2() -> Fan {
        Fan::new(
            vec![vec![1, 0], vec![0, 1], vec![-1, -1]],
            vec![vec![0, 1], vec![1, 2], vec![2, 0]],
        )
    }

    #[test]
    fn test_parse_engine_output() {
        assert_eq!(parse_engine_output(b"42\n").unwrap(), 42);
        assert_eq!(parse_engine_output(b"  0 ").unwrap(), 0);
        assert!(matches!(
            parse_engine_output(b"-1"),
            Err(EngineError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_engine_output(b"3 4"),
            Err(EngineError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_engine_output(b""),
            Err(EngineError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_engine_output(&[0xff, 0xfe]),
            Err(EngineError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_compute_kth_passes_artifact_and_degree() {
        let oracle = Recording::default();
        let h = compute_kth_cohomology(&oracle, &p2(), &[7, 1, -1], 2).unwrap();
        assert_eq!(h, 3);

        let seen = oracle.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, 2);
        let parsed = CohomologyRequest::parse(&seen[0].0).unwrap();
        assert_eq!(parsed.divisor(), &[7, 1, -1]);
    }

    #[test]
    fn test_invalid_request_never_reaches_oracle() {
        let oracle = Recording::default();
        let err = compute_kth_cohomology(&oracle, &p2(), &[7, 1], 0).unwrap_err();
        assert!(matches!(err, crate::CechError::ShapeMismatch(_)));
        assert!(oracle.seen.borrow().is_empty());
    }

    #[test]
    fn test_all_degrees() {
        let oracle = Recording::default();
        let dims = cohomology_dimensions(&oracle, &p2(), &[0, 0, 0]).unwrap();
        assert_eq!(dims, vec![1, 2, 3]);
        let degrees: Vec<usize> = oracle.seen.borrow().iter().map(|(_, k)| *k).collect();
        assert_eq!(degrees, vec![0, 1, 2]);
    }

    #[test]
    fn test_oracle_error_is_engine_failure() {
        struct Broken;
        impl CohomologyOracle for Broken {
            fn kth_cohomology(&self, _: &str, _: usize) -> std::result::Result<u64, EngineError> {
                Err(EngineError::MalformedOutput("nope".into()))
            }
        }
        let err = compute_kth_cohomology(&Broken, &p2(), &[0, 0, 0], 0).unwrap_err();
        assert!(err.is_engine_failure());
    }
}
