//! Two-center overlap integrals by uniform box sampling.
//!
//! One hydrogen center sits at the origin, the other at `(R, 0, 0)`. Each trial
//! draws a point in the box centered on `(R/2, 0, 0)`, expresses it in
//! spherical coordinates about both centers and accumulates the unnormalized
//! products ψ1s·ψ1s and ψ2px·ψ1s. Normalization and the box volume are applied
//! once at the end.

use nalgebra::Vector3;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mvt::{monte_carlo_mvt, UniformBox};
use crate::analytic::log_relative_error;
use crate::config::IntegrationConfig;
use crate::error::Result;
use crate::wavefunction::{Hydrogen1s, Hydrogen2px, Orbital, SphericalCoord};

/// One trial's draw, seen from both centers.
#[derive(Debug, Clone, Copy)]
pub struct SamplePoint {
    pub cartesian: Vector3<f64>,
    /// Relative to the origin
    pub first: SphericalCoord,
    /// Relative to `(R, 0, 0)`
    pub second: SphericalCoord,
}

impl SamplePoint {
    pub fn new(cartesian: Vector3<f64>, spacing: f64) -> Self {
        let displaced = cartesian - Vector3::new(spacing, 0.0, 0.0);
        Self {
            cartesian,
            first: SphericalCoord::from_cartesian(&cartesian),
            second: SphericalCoord::from_cartesian(&displaced),
        }
    }
}

/// Result of one integration call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct IntegralResult {
    pub overlap_1s1s: f64,
    pub overlap_1s2px: f64,
    /// log10 of the relative error of `overlap_1s1s` against the analytic value.
    /// `-inf` on an exact match, `+inf` when the reference has underflowed.
    pub log_error_1s1s: f64,
}

/// Running sums over a batch of trials.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct OverlapSums {
    pub s1s1s: f64,
    pub s1s2px: f64,
    pub count: usize,
}

impl OverlapSums {
    pub fn merge(self, other: Self) -> Self {
        Self {
            s1s1s: self.s1s1s + other.s1s1s,
            s1s2px: self.s1s2px + other.s1s2px,
            count: self.count + other.count,
        }
    }
}

/// The three orbitals of the two-center problem for a given spacing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DiatomicOrbitals {
    spacing: f64,
    origin_1s: Hydrogen1s,
    origin_2px: Hydrogen2px,
    shifted_1s: Hydrogen1s,
}

impl DiatomicOrbitals {
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            origin_1s: Hydrogen1s::new(Vector3::zeros()),
            origin_2px: Hydrogen2px::new(Vector3::zeros()),
            shifted_1s: Hydrogen1s::new(Vector3::new(spacing, 0.0, 0.0)),
        }
    }

    pub fn accumulate<R: Rng + ?Sized>(&self, domain: &UniformBox, n: usize, rng: &mut R) -> OverlapSums {
        let mut sums = OverlapSums::default();
        for _ in 0..n {
            let point = SamplePoint::new(domain.sample(rng), self.spacing);
            let partner = self.shifted_1s.evaluate_spherical(&point.second);
            sums.s1s1s += self.origin_1s.evaluate_spherical(&point.first) * partner;
            sums.s1s2px += self.origin_2px.evaluate_spherical(&point.first) * partner;
        }
        sums.count = n;
        sums
    }

    /// Apply normalization constants and the volume to the raw sums.
    pub fn finish(&self, config: &IntegrationConfig, sums: OverlapSums) -> IntegralResult {
        let volume = config.bounding_box.volume();
        let n = sums.count as f64;
        let norm_1s1s = self.origin_1s.normalization() * self.shifted_1s.normalization();
        let norm_1s2px = self.origin_2px.normalization() * self.shifted_1s.normalization();

        let overlap_1s1s = volume * norm_1s1s * sums.s1s1s / n;
        let overlap_1s2px = volume * norm_1s2px * sums.s1s2px / n;
        IntegralResult {
            overlap_1s1s,
            overlap_1s2px,
            log_error_1s1s: log_relative_error(config.spacing, overlap_1s1s),
        }
    }
}

pub(crate) fn sampling_domain(config: &IntegrationConfig) -> Result<UniformBox> {
    let bbox = &config.bounding_box;
    UniformBox::new(bbox.lower(config.spacing), bbox.upper(config.spacing))
}

/// Sequential overlap integrator.
pub struct OverlapIntegrator<R: Rng> {
    config: IntegrationConfig,
    domain: UniformBox,
    orbitals: DiatomicOrbitals,
    rng: R,
}

impl OverlapIntegrator<ThreadRng> {
    pub fn new(config: IntegrationConfig) -> Result<Self> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> OverlapIntegrator<R> {
    /// Validates `config` up front; sampling itself cannot fail.
    pub fn with_rng(config: IntegrationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            domain: sampling_domain(&config)?,
            orbitals: DiatomicOrbitals::new(config.spacing),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// Draw a single trial point.
    pub fn draw(&mut self) -> SamplePoint {
        SamplePoint::new(self.domain.sample(&mut self.rng), self.config.spacing)
    }

    pub fn run(&mut self) -> IntegralResult {
        debug!(
            n = self.config.n,
            spacing = self.config.spacing,
            volume = self.config.bounding_box.volume(),
            "sampling overlap integrals"
        );
        let sums = self.orbitals.accumulate(&self.domain, self.config.n, &mut self.rng);
        let result = self.orbitals.finish(&self.config, sums);
        debug!(
            overlap_1s1s = result.overlap_1s1s,
            overlap_1s2px = result.overlap_1s2px,
            log_error = result.log_error_1s1s,
            "integration finished"
        );
        result
    }
}

/// Integrate with the thread-local generator.
pub fn integrate(config: &IntegrationConfig) -> Result<IntegralResult> {
    Ok(OverlapIntegrator::new(*config)?.run())
}

/// Integrate with a reproducible `StdRng` stream.
pub fn integrate_seeded(config: &IntegrationConfig, seed: u64) -> Result<IntegralResult> {
    Ok(OverlapIntegrator::with_rng(*config, StdRng::seed_from_u64(seed))?.run())
}

/// Integrate drawing from a caller-owned generator.
pub fn integrate_with_rng<R: Rng + ?Sized>(config: &IntegrationConfig, rng: &mut R) -> Result<IntegralResult> {
    Ok(OverlapIntegrator::with_rng(*config, rng)?.run())
}

/// Normalized overlap ⟨a|b⟩ of two arbitrary orbitals over the box
/// `[lower, upper]`.
pub fn orbital_overlap<A, B, R>(
    a: &A,
    b: &B,
    lower: Vector3<f64>,
    upper: Vector3<f64>,
    n: usize,
    rng: &mut R,
) -> Result<f64>
where
    A: Orbital,
    B: Orbital,
    R: Rng + ?Sized,
{
    let raw = monte_carlo_mvt(lower, upper, n, |p| a.evaluate(p) * b.evaluate(p), rng)?;
    Ok(a.normalization() * b.normalization() * raw)
}
