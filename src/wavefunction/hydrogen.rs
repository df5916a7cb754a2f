//! Hydrogen-like 1s and 2px orbitals in atomic units (Z = 1, lengths in a0).

use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use super::spherical::SphericalCoord;
use super::traits::Orbital;

/// Hydrogen 1s orbital, ψ ∝ e^(−r).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Hydrogen1s {
    /// Center position of the orbital
    pub center: Vector3<f64>,
}

impl Hydrogen1s {
    pub fn new(center: Vector3<f64>) -> Self {
        Self { center }
    }
}

impl Orbital for Hydrogen1s {
    fn center(&self) -> Vector3<f64> {
        self.center
    }

    fn evaluate_spherical(&self, s: &SphericalCoord) -> f64 {
        (-s.r).exp()
    }

    /// 1/√π
    fn normalization(&self) -> f64 {
        1.0 / PI.sqrt()
    }
}

/// Hydrogen 2px orbital, ψ ∝ r e^(−r/2) sin θ cos φ (a dumbbell along x).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Hydrogen2px {
    /// Center position of the orbital
    pub center: Vector3<f64>,
}

impl Hydrogen2px {
    pub fn new(center: Vector3<f64>) -> Self {
        Self { center }
    }
}

impl Orbital for Hydrogen2px {
    fn center(&self) -> Vector3<f64> {
        self.center
    }

    fn evaluate_spherical(&self, s: &SphericalCoord) -> f64 {
        s.r * (-s.r / 2.0).exp() * s.theta.sin() * s.phi.cos()
    }

    /// 1/(4√(2π))
    fn normalization(&self) -> f64 {
        1.0 / (4.0 * (2.0 * PI).sqrt())
    }
}
