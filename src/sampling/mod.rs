//! Sampling module - Monte Carlo estimators for the overlap integrals.

mod mvt;
mod overlap;
mod parallel;
mod sweep;
mod task;

pub use mvt::{monte_carlo_mvt, UniformBox};
pub use overlap::{
    integrate, integrate_seeded, integrate_with_rng, orbital_overlap, IntegralResult,
    OverlapIntegrator, SamplePoint,
};
pub use parallel::{integrate_parallel, CHUNK_SIZE};
pub use sweep::{sweep, sweep_parallel, sweep_seeded, sweep_with_rng, Overlap, SweepPoint};
pub use task::IntegrationTask;
