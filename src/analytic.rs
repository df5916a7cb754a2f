//! Closed-form 1s-1s overlap and the log relative error of a numeric estimate.

use tracing::warn;

use crate::error::{OverlapError, Result};

/// Bohr radius in meters.
pub const BOHR_RADIUS: f64 = 5.2917721090380e-11;

/// Analytic overlap of two hydrogen 1s orbitals a distance `spacing` apart:
/// S(R) = e^(−R) (1 + R + R²/3).
///
/// Only the separation matters, so a negative spacing is treated as |R|.
pub fn analytic_overlap_1s1s(spacing: f64) -> f64 {
    let r = spacing.abs();
    (-r).exp() * (1.0 + r + r * r / 3.0)
}

/// log10(|estimate − S(R)| / S(R)).
///
/// Fails with `NumericDegeneracy` when S(R) has underflowed to zero or is not
/// finite. An exact match gives `-inf`.
pub fn try_log_relative_error(spacing: f64, estimate: f64) -> Result<f64> {
    let reference = analytic_overlap_1s1s(spacing);
    if !(reference.is_finite() && reference > 0.0) {
        return Err(OverlapError::NumericDegeneracy { spacing });
    }
    Ok(((estimate - reference).abs() / reference).log10())
}

/// Infallible form of [`try_log_relative_error`].
///
/// A degenerate reference yields `f64::INFINITY`: the relative error is
/// unbounded. A NaN estimate propagates as NaN.
pub fn log_relative_error(spacing: f64, estimate: f64) -> f64 {
    match try_log_relative_error(spacing, estimate) {
        Ok(err) => err,
        Err(e) => {
            warn!("{e}; reporting +inf relative error");
            f64::INFINITY
        }
    }
}
