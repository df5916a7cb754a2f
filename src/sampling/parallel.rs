//! Rayon-backed evaluation of the overlap trials.
//!
//! Trials are cut into fixed-size chunks, each with its own `StdRng` whose seed
//! is mixed from the master seed and the chunk index. Partial sums are merged
//! in chunk order after the parallel section, so a given seed produces the
//! same result regardless of the pool size.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::debug;

use super::overlap::{sampling_domain, DiatomicOrbitals, IntegralResult, OverlapSums};
use crate::config::IntegrationConfig;
use crate::error::Result;

/// Trials per independent stream.
pub const CHUNK_SIZE: usize = 1 << 16;

/// SplitMix64 finalizer, used to derive decorrelated stream seeds.
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

pub(crate) fn stream_seed(seed: u64, index: u64) -> u64 {
    splitmix64(seed ^ splitmix64(index))
}

/// Parallel counterpart of [`integrate_seeded`](super::integrate_seeded).
pub fn integrate_parallel(config: &IntegrationConfig, seed: u64) -> Result<IntegralResult> {
    config.validate()?;
    let domain = sampling_domain(config)?;
    let orbitals = DiatomicOrbitals::new(config.spacing);
    let n_chunks = config.n.div_ceil(CHUNK_SIZE);
    debug!(n = config.n, n_chunks, spacing = config.spacing, "parallel overlap sampling");

    let partials: Vec<OverlapSums> = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * CHUNK_SIZE;
            let len = CHUNK_SIZE.min(config.n - start);
            let mut rng = StdRng::seed_from_u64(stream_seed(seed, chunk as u64));
            orbitals.accumulate(&domain, len, &mut rng)
        })
        .collect();

    let sums = partials
        .into_iter()
        .fold(OverlapSums::default(), OverlapSums::merge);
    Ok(orbitals.finish(config, sums))
}
