//! Statistical checks of the overlap estimators against known results.
//!
//! Every run is seeded. Tolerances are at least five standard errors of the
//! estimate for the given box and sample count.

use approx::assert_abs_diff_eq;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analytic::{analytic_overlap_1s1s, log_relative_error};
use crate::config::{BoundingBox, IntegrationConfig};
use crate::sampling::{integrate_parallel, integrate_seeded, monte_carlo_mvt, orbital_overlap};
use crate::wavefunction::{Hydrogen1s, Hydrogen2px, Orbital};

/// Wide enough that truncating the orbital tails costs < 1e-4.
fn wide_box() -> BoundingBox {
    BoundingBox::new(12.0, 10.0, 10.0)
}

#[test]
fn test_self_overlap_at_zero_spacing_is_one() {
    assert_eq!(analytic_overlap_1s1s(0.0), 1.0);
    let config = IntegrationConfig::new(400_000, 0.0, wide_box());
    let result = integrate_seeded(&config, 1).unwrap();
    assert_abs_diff_eq!(result.overlap_1s1s, 1.0, epsilon = 0.06);
    // 2px is odd in x, 1s is even: no net overlap on a shared center
    assert_abs_diff_eq!(result.overlap_1s2px, 0.0, epsilon = 0.015);
}

#[test]
fn test_matches_analytic_at_bonding_distance() {
    for (spacing, seed) in [(1.0, 2), (2.0, 3)] {
        let config = IntegrationConfig::new(400_000, spacing, wide_box());
        let result = integrate_seeded(&config, seed).unwrap();
        assert_abs_diff_eq!(result.overlap_1s1s, analytic_overlap_1s1s(spacing), epsilon = 0.05);
        assert!(result.log_error_1s1s < -1.0, "log error {} at R = {spacing}", result.log_error_1s1s);
        assert_eq!(result.log_error_1s1s, log_relative_error(spacing, result.overlap_1s1s));
    }
}

#[test]
fn test_1s2px_overlap_is_positive_toward_partner() {
    // The +x lobe of 2px points at the 1s center on +x.
    let config = IntegrationConfig::new(200_000, 1.0, wide_box());
    let result = integrate_seeded(&config, 4).unwrap();
    assert!(result.overlap_1s2px > 0.15 && result.overlap_1s2px < 0.35, "{}", result.overlap_1s2px);

    let mirrored = integrate_seeded(&config.with_spacing(-1.0), 5).unwrap();
    assert!(mirrored.overlap_1s2px < -0.15, "{}", mirrored.overlap_1s2px);
}

#[test]
fn test_small_samples_stay_finite() {
    let mut rng = StdRng::seed_from_u64(6);
    for seed in 0..50 {
        let n = rng.gen_range(1..20);
        let spacing = rng.gen_range(0.0..8.0);
        let bbox = BoundingBox::new(
            rng.gen_range(0.1..20.0),
            rng.gen_range(0.1..20.0),
            rng.gen_range(0.1..20.0),
        );
        let result = integrate_seeded(&IntegrationConfig::new(n, spacing, bbox), seed).unwrap();
        assert!(result.overlap_1s1s.is_finite());
        assert!(result.overlap_1s2px.is_finite());
        assert!(result.overlap_1s1s > 0.0);
    }
}

#[test]
fn test_error_shrinks_with_more_samples() {
    let mean_log_error = |n: usize| -> f64 {
        let config = IntegrationConfig::new(n, 1.0, wide_box());
        (0..8)
            .map(|seed| integrate_seeded(&config, 100 + seed).unwrap().log_error_1s1s)
            .sum::<f64>()
            / 8.0
    };
    let coarse = mean_log_error(100);
    let fine = mean_log_error(100_000);
    assert!(fine < coarse, "coarse {coarse}, fine {fine}");
    assert!(fine < -1.0);
}

#[test]
fn test_mirrored_geometry_is_symmetric() {
    let spacing = 1.0;
    let bbox = wide_box();
    let forward = integrate_seeded(&IntegrationConfig::new(400_000, spacing, bbox), 7).unwrap();
    let mirrored = integrate_seeded(&IntegrationConfig::new(400_000, -spacing, bbox), 8).unwrap();

    // Swapping which side the second nucleus sits on leaves ⟨1s|1s⟩ alone
    // and flips the sign of the x-directed lobe.
    assert_abs_diff_eq!(forward.overlap_1s1s, mirrored.overlap_1s1s, epsilon = 0.06);
    assert_abs_diff_eq!(forward.overlap_1s2px, -mirrored.overlap_1s2px, epsilon = 0.06);

    let (lower, upper) = (bbox.lower(spacing), bbox.upper(spacing));
    let at_origin = Hydrogen1s::new(Vector3::zeros());
    let at_partner = Hydrogen1s::new(Vector3::new(spacing, 0.0, 0.0));
    let generic = orbital_overlap(&at_origin, &at_partner, lower, upper, 400_000, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_abs_diff_eq!(generic, forward.overlap_1s1s, epsilon = 0.06);
}

#[test]
fn test_doubling_box_keeps_estimate() {
    let spacing = 1.0;
    let small = integrate_seeded(&IntegrationConfig::new(400_000, spacing, wide_box()), 10).unwrap();
    let large = integrate_seeded(&IntegrationConfig::new(400_000, spacing, wide_box().scaled(2.0)), 11).unwrap();
    assert_abs_diff_eq!(small.overlap_1s1s, large.overlap_1s1s, epsilon = 0.15);
    assert_abs_diff_eq!(large.overlap_1s1s, analytic_overlap_1s1s(spacing), epsilon = 0.15);
}

#[test]
fn test_parallel_agrees_with_sequential() {
    let config = IntegrationConfig::new(400_000, 1.0, wide_box());
    let parallel = integrate_parallel(&config, 12).unwrap();
    let sequential = integrate_seeded(&config, 13).unwrap();
    assert_abs_diff_eq!(parallel.overlap_1s1s, sequential.overlap_1s1s, epsilon = 0.06);
    assert_abs_diff_eq!(parallel.overlap_1s2px, sequential.overlap_1s2px, epsilon = 0.03);
    assert_abs_diff_eq!(parallel.overlap_1s1s, analytic_overlap_1s1s(1.0), epsilon = 0.05);
}

#[test]
fn test_orbitals_are_normalized() {
    let s = Hydrogen1s::new(Vector3::zeros());
    let norm_1s = monte_carlo_mvt(
        Vector3::repeat(-8.0),
        Vector3::repeat(8.0),
        200_000,
        |p| s.evaluate_normalized(p).powi(2),
        &mut StdRng::seed_from_u64(14),
    )
    .unwrap();
    assert_abs_diff_eq!(norm_1s, 1.0, epsilon = 0.15);

    let p = Hydrogen2px::new(Vector3::zeros());
    let norm_2px = monte_carlo_mvt(
        Vector3::repeat(-20.0),
        Vector3::repeat(20.0),
        200_000,
        |r| p.evaluate_normalized(r).powi(2),
        &mut StdRng::seed_from_u64(15),
    )
    .unwrap();
    assert_abs_diff_eq!(norm_2px, 1.0, epsilon = 0.12);
}
