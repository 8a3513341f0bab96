use std::f64::consts::{FRAC_PI_2, PI};

use mobility_core::MobilityError;
use mobility_scatter::{integrate, integrate_arcsine_weighted, QuadratureOpts};

#[test]
fn arcsine_weight_alone_integrates_to_half_pi() {
    let result =
        integrate_arcsine_weighted(|_| 1.0, &QuadratureOpts::default()).expect("integrate");
    assert!((result.value - FRAC_PI_2).abs() < 1e-12, "got {}", result.value);
    assert!(result.error_estimate <= 1.49e-8);
}

#[test]
fn arcsine_weighted_polynomials_match_closed_forms() {
    let opts = QuadratureOpts::default();
    // ∫₀¹ x/√(1-x²) dx = 1, ∫₀¹ x²/√(1-x²) dx = π/4
    let first = integrate_arcsine_weighted(|x| x, &opts).expect("first moment");
    let second = integrate_arcsine_weighted(|x| x * x, &opts).expect("second moment");
    assert!((first.value - 1.0).abs() < 1e-12);
    assert!((second.value - PI / 4.0).abs() < 1e-12);
}

#[test]
fn regular_integrands_converge() {
    let opts = QuadratureOpts::default();
    let quadratic = integrate(|x| x * x, 0.0, 1.0, &opts).expect("x^2");
    assert!((quadratic.value - 1.0 / 3.0).abs() < 1e-14);
    assert_eq!(quadratic.subdivisions, 1);

    let sine = integrate(f64::sin, 0.0, PI, &opts).expect("sin");
    assert!((sine.value - 2.0).abs() < 1e-12);

    let peaked = integrate(|x| (-(50.0 * x) * (50.0 * x)).exp(), -1.0, 1.0, &opts)
        .expect("gaussian");
    assert!((peaked.value - PI.sqrt() / 50.0).abs() < 1e-9);
    assert!(peaked.subdivisions > 1);
}

#[test]
fn empty_interval_is_zero() {
    let result = integrate(|x| x, 0.5, 0.5, &QuadratureOpts::default()).expect("empty");
    assert_eq!(result.value, 0.0);
    assert_eq!(result.evaluations, 0);
}

#[test]
fn non_finite_integrand_is_integration_error() {
    let err = integrate(|x| 1.0 / x, -1.0, 1.0, &QuadratureOpts::default())
        .expect_err("pole at the midpoint");
    assert!(matches!(err, MobilityError::Integration(_)));
    assert_eq!(err.info().code, "non-finite-integrand");
    assert!(err.is_configuration_class());
}

#[test]
fn exhausted_budget_is_reported() {
    let opts = QuadratureOpts {
        abs_tol: 1e-15,
        rel_tol: 0.0,
        max_subdivisions: 1,
    };
    let err = integrate(f64::sqrt, 0.0, 1.0, &opts).expect_err("budget");
    assert_eq!(err.info().code, "quadrature-budget");
    assert!(err.info().context.contains_key("subdivisions"));
}

#[test]
fn invalid_options_are_rejected() {
    let opts = QuadratureOpts {
        abs_tol: 0.0,
        rel_tol: 0.0,
        max_subdivisions: 10,
    };
    let err = opts.validate().expect_err("zero tolerances");
    assert!(matches!(err, MobilityError::Configuration(_)));
    assert!(QuadratureOpts::default().validate().is_ok());
}
