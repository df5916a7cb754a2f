//! Mean-value Monte Carlo over an axis-aligned box.

use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{OverlapError, Result};

/// Uniform distribution over the closed box `[lower, upper]`.
#[derive(Debug, Clone)]
pub struct UniformBox {
    x: Uniform<f64>,
    y: Uniform<f64>,
    z: Uniform<f64>,
    volume: f64,
}

impl UniformBox {
    pub fn new(lower: Vector3<f64>, upper: Vector3<f64>) -> Result<Self> {
        for axis in 0..3 {
            let (lo, hi) = (lower[axis], upper[axis]);
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(OverlapError::invalid(format!(
                    "degenerate sampling interval [{lo}, {hi}] on axis {axis}"
                )));
            }
        }
        let extent = upper - lower;
        // Uniform::new_inclusive divides the width by (1 - ε) and panics on overflow.
        for axis in 0..3 {
            if !(extent[axis] / (1.0 - f64::EPSILON)).is_finite() {
                return Err(OverlapError::invalid(format!(
                    "sampling interval on axis {axis} is too wide: [{}, {}]",
                    lower[axis], upper[axis]
                )));
            }
        }
        let volume = extent.x * extent.y * extent.z;
        if !volume.is_finite() {
            return Err(OverlapError::invalid(format!("sampling volume overflows: {volume}")));
        }
        Ok(Self {
            x: Uniform::new_inclusive(lower.x, upper.x),
            y: Uniform::new_inclusive(lower.y, upper.y),
            z: Uniform::new_inclusive(lower.z, upper.z),
            volume,
        })
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl Distribution<Vector3<f64>> for UniformBox {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        Vector3::new(self.x.sample(rng), self.y.sample(rng), self.z.sample(rng))
    }
}

/// Estimate `∫ f dV` over `[lower, upper]` as `volume · mean(f)` using `n`
/// uniform samples.
pub fn monte_carlo_mvt<F, R>(
    lower: Vector3<f64>,
    upper: Vector3<f64>,
    n: usize,
    mut f: F,
    rng: &mut R,
) -> Result<f64>
where
    F: FnMut(&Vector3<f64>) -> f64,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(OverlapError::invalid("sample count N must be at least 1"));
    }
    let domain = UniformBox::new(lower, upper)?;
    let sum: f64 = (0..n).map(|_| f(&domain.sample(rng))).sum();
    Ok(domain.volume() * sum / n as f64)
}
