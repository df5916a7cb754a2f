//! Integration inputs: sample count, spacing and the sampling box.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{OverlapError, Result};

/// Edge lengths of the sampling box, in Bohr radii.
///
/// The box is always centered on the bond midpoint `(R/2, 0, 0)` so that it
/// straddles both orbital centers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self { x: 10.0, y: 5.0, z: 5.0 }
    }
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Lower corner of the box for spacing `spacing`.
    pub fn lower(&self, spacing: f64) -> Vector3<f64> {
        Vector3::new((spacing - self.x) / 2.0, -self.y / 2.0, -self.z / 2.0)
    }

    /// Upper corner of the box for spacing `spacing`.
    pub fn upper(&self, spacing: f64) -> Vector3<f64> {
        Vector3::new((spacing + self.x) / 2.0, self.y / 2.0, self.z / 2.0)
    }

    /// Same box with every edge multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn validate(&self) -> Result<()> {
        for (axis, len) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !(len.is_finite() && len > 0.0) {
                return Err(OverlapError::invalid(format!(
                    "box length along {axis} must be positive and finite, got {len}"
                )));
            }
        }
        if !self.volume().is_finite() {
            return Err(OverlapError::invalid(format!(
                "box volume overflows: {} x {} x {}",
                self.x, self.y, self.z
            )));
        }
        Ok(())
    }
}

/// Everything a single integration call needs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Number of Monte Carlo trials
    pub n: usize,
    /// Interatomic spacing R in Bohr radii
    pub spacing: f64,
    pub bounding_box: BoundingBox,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            n: 10_000,
            spacing: 1.0,
            bounding_box: BoundingBox::default(),
        }
    }
}

impl IntegrationConfig {
    pub fn new(n: usize, spacing: f64, bounding_box: BoundingBox) -> Self {
        Self { n, spacing, bounding_box }
    }

    /// Copy of this config with a different spacing, used by sweeps.
    pub fn with_spacing(&self, spacing: f64) -> Self {
        Self { spacing, ..*self }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n < 1 {
            return Err(OverlapError::invalid("sample count N must be at least 1"));
        }
        if !self.spacing.is_finite() {
            return Err(OverlapError::invalid(format!(
                "spacing R must be finite, got {}",
                self.spacing
            )));
        }
        self.bounding_box.validate()
    }
}

/// Upper bound on the number of points a `SweepRange` may produce.
pub const MAX_SWEEP_POINTS: usize = 10_000_000;

/// Inclusive grid of spacings `start, start + step, ..., stop`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SweepRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self { start: 0.0, stop: 13.0, step: 0.5 }
    }
}

impl SweepRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Materialize the grid. Points are computed as `start + i * step` so
    /// rounding does not accumulate, and `stop` is kept when it lies on the grid.
    pub fn spacings(&self) -> Result<Vec<f64>> {
        if !(self.start.is_finite() && self.stop.is_finite() && self.step.is_finite()) {
            return Err(OverlapError::invalid("sweep bounds must be finite"));
        }
        if self.step <= 0.0 {
            return Err(OverlapError::invalid(format!(
                "sweep step must be positive, got {}",
                self.step
            )));
        }
        if self.stop < self.start {
            return Err(OverlapError::invalid(format!(
                "sweep stop {} lies below start {}",
                self.stop, self.start
            )));
        }
        let intervals = ((self.stop - self.start) / self.step + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_SWEEP_POINTS as f64 {
            return Err(OverlapError::invalid(format!(
                "sweep from {} to {} by {} exceeds {MAX_SWEEP_POINTS} points",
                self.start, self.stop, self.step
            )));
        }
        Ok((0..=intervals as usize)
            .map(|i| self.start + i as f64 * self.step)
            .collect())
    }
}
