//! Configuration for the external cohomology engine.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CechError, Result};

/// Program name used when nothing else is configured.
pub const DEFAULT_ENGINE: &str = "cech_cohomology";

/// Environment variable overriding the engine program.
pub const ENGINE_ENV: &str = "TORIC_CECH_ENGINE";

/// How to reach the cohomology engine.
///
/// Read from the `[engine]` table of a TOML file:
///
/// ```toml
/// [engine]
/// program = "/opt/cech/bin/cech_cohomology"
/// artifact_dir = "/tmp/cech"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine executable, resolved through `PATH` if relative.
    pub program: PathBuf,
    /// Arguments placed before the artifact path and degree.
    pub args: Vec<String>,
    /// Directory for request artifacts; the system temp dir if unset.
    pub artifact_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_ENGINE),
            args: Vec::new(),
            artifact_dir: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
}

impl EngineConfig {
    /// Engine configuration running `program` with no extra arguments.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Parse the `[engine]` table of a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| CechError::format("config", e))?;
        Ok(file.engine)
    }

    /// Read a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply the [`ENGINE_ENV`] override from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_engine_override(std::env::var_os(ENGINE_ENV))
    }

    /// Replace the program if `program` is set and non-empty.
    pub fn with_engine_override(mut self, program: Option<OsString>) -> Self {
        if let Some(p) = program.filter(|p| !p.is_empty()) {
            self.program = PathBuf::from(p);
        }
        self
    }
}
