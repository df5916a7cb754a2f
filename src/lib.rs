//! Overlap MC - Monte Carlo overlap integrals for hydrogen-like orbitals.
//!
//! Estimates the 1s-1s and 1s-2px overlap of two hydrogen centers a distance R
//! apart by uniform sampling in a box around the bond, and compares the 1s-1s
//! estimate with the closed-form result S(R) = e^(−R)(1 + R + R²/3).

pub mod analytic;
pub mod config;
pub mod error;
pub mod io;
pub mod sampling;
pub mod wavefunction;

// Re-export commonly used types at crate root
pub use analytic::{analytic_overlap_1s1s, log_relative_error, try_log_relative_error, BOHR_RADIUS};
pub use config::{BoundingBox, IntegrationConfig, SweepRange};
pub use error::{OverlapError, Result};
pub use io::{parse_run_config, read_run_config, RunConfig};
pub use sampling::{
    integrate, integrate_parallel, integrate_seeded, integrate_with_rng, monte_carlo_mvt,
    orbital_overlap, sweep, sweep_parallel, sweep_seeded, sweep_with_rng, IntegralResult,
    IntegrationTask, Overlap, OverlapIntegrator, SamplePoint, SweepPoint, UniformBox,
};
pub use wavefunction::{Hydrogen1s, Hydrogen2px, Orbital, SphericalCoord};

#[cfg(test)]
mod tests;
