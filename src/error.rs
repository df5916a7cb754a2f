use std::path::PathBuf;
use thiserror::Error;

/// Error type for every fallible operation in the crate.
///
/// Stochastic spread of an estimate is not an error: callers wanting a tighter
/// value raise the sample count instead.
#[derive(Error, Debug)]
pub enum OverlapError {
    /// Rejected input, e.g. a zero sample count, a non-positive box length or
    /// a sweep range that is not strictly ascending. Raised before any
    /// sampling takes place.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The analytic 1s-1s reference underflowed to zero (or is not finite), so
    /// a relative error is undefined.
    #[error("Analytic 1s-1s overlap is degenerate at R = {spacing}")]
    NumericDegeneracy {
        /// Interatomic spacing in Bohr radii.
        spacing: f64,
    },

    /// An I/O error while reading a run configuration.
    #[error("I/O error at path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run configuration is not valid YAML or does not match `RunConfig`.
    #[error("Failed to deserialize YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A background integration thread panicked before producing a result.
    #[error("Background integration worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, OverlapError>;

impl OverlapError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        OverlapError::InvalidConfiguration(msg.into())
    }
}
