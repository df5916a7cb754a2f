//! Spherical coordinates relative to an orbital center.

use nalgebra::Vector3;

/// Spherical coordinates `(r, θ, φ)` with θ measured from +z and φ from +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoord {
    pub r: f64,
    /// Polar angle in `[0, π]`.
    pub theta: f64,
    /// Azimuthal angle in `(-π, π]`.
    pub phi: f64,
}

impl SphericalCoord {
    /// Convert a displacement from the orbital center into spherical coordinates.
    ///
    /// Both angles go through `atan2`, so points on the axes (and the center
    /// itself) map to finite angles without dividing by zero.
    pub fn from_cartesian(d: &Vector3<f64>) -> Self {
        let rho = d.x.hypot(d.y);
        Self {
            r: d.norm(),
            theta: rho.atan2(d.z),
            phi: d.y.atan2(d.x),
        }
    }
}
