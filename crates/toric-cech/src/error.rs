//! Error types for cohomology requests.

use std::process::ExitStatus;

use thiserror::Error;
use toric_lattice::LatticeError;

/// Errors that can occur while building or evaluating a cohomology request.
#[derive(Error, Debug)]
pub enum CechError {
    /// Fan and divisor do not fit together.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Exact lattice arithmetic failed.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// A request artifact could not be read.
    #[error("artifact parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// A fan or configuration file is malformed.
    #[error("invalid {kind} file: {message}")]
    Format {
        /// What was being read (`fan`, `config`).
        kind: &'static str,
        /// Error message.
        message: String,
    },

    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cohomology engine could not produce a result.
    #[error("cohomology engine failed: {0}")]
    Engine(#[from] EngineError),
}

impl CechError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a format error.
    pub fn format(kind: &'static str, message: impl ToString) -> Self {
        Self::Format {
            kind,
            message: message.to_string(),
        }
    }

    /// Whether the error came from invoking the external engine.
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}

/// Errors from a cohomology oracle.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The request artifact could not be written.
    #[error("could not write request artifact: {0}")]
    Artifact(#[source] std::io::Error),

    /// The engine process could not be started.
    #[error("could not start `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The engine exited unsuccessfully.
    #[error("engine exited with {status}{}", stderr_suffix(.stderr))]
    Failed {
        /// Exit status of the process.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The engine's output is not a single non-negative integer.
    #[error("malformed engine output: {0}")]
    MalformedOutput(String),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Result type for cohomology requests.
pub type Result<T> = std::result::Result<T, CechError>;
