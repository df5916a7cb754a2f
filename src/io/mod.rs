//! IO module - YAML run configuration.

mod config;

pub use config::{parse_run_config, read_run_config, RunConfig};
