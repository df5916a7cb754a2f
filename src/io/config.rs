//! Read a YAML run configuration.
//!
//! ```yaml
//! integration:
//!   n: 100000
//!   spacing: 1.0
//!   bounding_box: { x: 10.0, y: 5.0, z: 5.0 }
//! sweep: { start: 0.0, stop: 13.0, step: 0.5 }
//! overlap: 1s2px
//! seed: 42
//! parallel: true
//! ```
//!
//! Every key is optional and falls back to its default.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{IntegrationConfig, SweepRange};
use crate::error::{OverlapError, Result};
use crate::sampling::Overlap;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub integration: IntegrationConfig,
    pub sweep: SweepRange,
    /// Overlap recorded by a sweep: `1s1s` or `1s2px`.
    pub overlap: Overlap,
    /// Seed for reproducible runs; unseeded runs use the thread-local generator.
    pub seed: Option<u64>,
    /// Spread trials across the rayon pool.
    pub parallel: bool,
}

impl RunConfig {
    fn validated(self) -> Result<Self> {
        self.integration.validate()?;
        self.sweep.spacings()?;
        Ok(self)
    }
}

/// Deserialize and validate a `RunConfig` from a YAML file.
pub fn read_run_config(path: impl AsRef<Path>) -> Result<RunConfig> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| OverlapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RunConfig = serde_yaml::from_reader(BufReader::new(file))?;
    config.validated()
}

/// Deserialize and validate a `RunConfig` from YAML text.
pub fn parse_run_config(yaml: &str) -> Result<RunConfig> {
    let config: RunConfig = serde_yaml::from_str(yaml)?;
    config.validated()
}
