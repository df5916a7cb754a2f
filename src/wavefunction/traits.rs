//! Orbital trait for single-center wavefunctions.

use nalgebra::Vector3;
use super::spherical::SphericalCoord;

/// Single-center, real-valued orbital.
///
/// Implementors evaluate the *unnormalized* radial/angular form; the
/// normalization constant is kept separate so Monte Carlo sums can be scaled
/// once after accumulation.
pub trait Orbital {
    /// Center of the orbital.
    fn center(&self) -> Vector3<f64>;

    /// Unnormalized value at spherical coordinates relative to `center`.
    fn evaluate_spherical(&self, s: &SphericalCoord) -> f64;

    /// Constant that makes `∫ |ψ|² dV = 1`.
    fn normalization(&self) -> f64;

    /// Unnormalized value at the Cartesian point `r`.
    fn evaluate(&self, r: &Vector3<f64>) -> f64 {
        let d = r - self.center();
        self.evaluate_spherical(&SphericalCoord::from_cartesian(&d))
    }

    fn evaluate_normalized(&self, r: &Vector3<f64>) -> f64 {
        self.normalization() * self.evaluate(r)
    }
}
