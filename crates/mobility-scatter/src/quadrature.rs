//! Globally adaptive Gauss–Kronrod quadrature.
//!
//! Each interval is integrated with the 15-point Kronrod rule; the embedded
//! 7-point Gauss rule provides the error estimate. The interval with the
//! largest estimate is bisected until the summed error meets
//! `max(abs_tol, rel_tol * |I|)` or the subdivision budget runs out.
//!
//! Scattering integrals carry a `1/√(1-x²)` factor that diverges at x = 1.
//! [`integrate_arcsine_weighted`] removes it with x = sin θ:
//!   ∫₀¹ h(x) / √(1-x²) dx = ∫₀^{π/2} h(sin θ) dθ

use std::f64::consts::FRAC_PI_2;

use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

// Kronrod abscissae on [-1, 1] (positive half, descending); odd indices are the Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_2,
    0.140_653_259_715_525_9,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_8,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

fn default_abs_tol() -> f64 {
    1.49e-8
}

fn default_rel_tol() -> f64 {
    1.49e-8
}

fn default_max_subdivisions() -> usize {
    200
}

/// Tolerances and evaluation budget for adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureOpts {
    /// Absolute error target.
    #[serde(default = "default_abs_tol")]
    pub abs_tol: f64,
    /// Relative error target.
    #[serde(default = "default_rel_tol")]
    pub rel_tol: f64,
    /// Maximum number of intervals before giving up.
    #[serde(default = "default_max_subdivisions")]
    pub max_subdivisions: usize,
}

impl Default for QuadratureOpts {
    fn default() -> Self {
        Self {
            abs_tol: default_abs_tol(),
            rel_tol: default_rel_tol(),
            max_subdivisions: default_max_subdivisions(),
        }
    }
}

impl QuadratureOpts {
    /// Rejects non-positive tolerances and an empty subdivision budget.
    pub fn validate(&self) -> Result<(), MobilityError> {
        let tolerances_ok = self.abs_tol.is_finite()
            && self.rel_tol.is_finite()
            && self.abs_tol >= 0.0
            && self.rel_tol >= 0.0
            && (self.abs_tol > 0.0 || self.rel_tol > 0.0);
        if !tolerances_ok || self.max_subdivisions == 0 {
            return Err(MobilityError::Configuration(
                ErrorInfo::new("quadrature-options", "invalid quadrature tolerances")
                    .with_context("abs_tol", self.abs_tol)
                    .with_context("rel_tol", self.rel_tol)
                    .with_context("max_subdivisions", self.max_subdivisions),
            ));
        }
        Ok(())
    }
}

/// Outcome of a converged integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    /// Integral estimate.
    pub value: f64,
    /// Summed Kronrod–Gauss error estimate.
    pub error_estimate: f64,
    /// Number of intervals in the final partition.
    pub subdivisions: usize,
    /// Number of integrand evaluations.
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

fn quadrature_error(code: &str, message: &str, lower: f64, upper: f64) -> MobilityError {
    MobilityError::Integration(
        ErrorInfo::new(code, message)
            .with_context("lower", lower)
            .with_context("upper", upper),
    )
}

fn gauss_kronrod_15<F>(f: &F, lower: f64, upper: f64) -> Result<Segment, MobilityError>
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);
    let f_center = f(center);
    let mut kronrod = f_center * WGK[7];
    let mut gauss = f_center * WG[3];
    for (j, node) in XGK.iter().take(7).enumerate() {
        let offset = half * node;
        let pair = f(center - offset) + f(center + offset);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }
    let value = kronrod * half;
    let error = ((kronrod - gauss) * half).abs();
    if !value.is_finite() || !error.is_finite() {
        return Err(quadrature_error(
            "non-finite-integrand",
            "integrand produced a non-finite value",
            lower,
            upper,
        ));
    }
    Ok(Segment {
        lower,
        upper,
        value,
        error,
    })
}

/// Integrates `f` over `[lower, upper]`.
pub fn integrate<F>(
    f: F,
    lower: f64,
    upper: f64,
    opts: &QuadratureOpts,
) -> Result<QuadratureResult, MobilityError>
where
    F: Fn(f64) -> f64,
{
    if lower == upper {
        return Ok(QuadratureResult {
            value: 0.0,
            error_estimate: 0.0,
            subdivisions: 0,
            evaluations: 0,
        });
    }
    let mut segments = vec![gauss_kronrod_15(&f, lower, upper)?];
    let mut evaluations = 15;
    loop {
        let value: f64 = segments.iter().map(|segment| segment.value).sum();
        let error: f64 = segments.iter().map(|segment| segment.error).sum();
        if error <= opts.abs_tol.max(opts.rel_tol * value.abs()) {
            return Ok(QuadratureResult {
                value,
                error_estimate: error,
                subdivisions: segments.len(),
                evaluations,
            });
        }
        if segments.len() >= opts.max_subdivisions.max(1) {
            return Err(MobilityError::Integration(
                ErrorInfo::new(
                    "quadrature-budget",
                    "adaptive quadrature exhausted its subdivision budget",
                )
                .with_context("value", value)
                .with_context("error", error)
                .with_context("subdivisions", segments.len()),
            ));
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.error.total_cmp(&b.1.error))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.lower + segment.upper);
        if mid <= segment.lower || mid >= segment.upper {
            return Err(quadrature_error(
                "quadrature-roundoff",
                "interval cannot be bisected further",
                segment.lower,
                segment.upper,
            ));
        }
        segments.push(gauss_kronrod_15(&f, segment.lower, mid)?);
        segments.push(gauss_kronrod_15(&f, mid, segment.upper)?);
        evaluations += 30;
    }
}

/// Evaluates `∫₀¹ h(x) / √(1-x²) dx` through the substitution x = sin θ.
pub fn integrate_arcsine_weighted<H>(
    h: H,
    opts: &QuadratureOpts,
) -> Result<QuadratureResult, MobilityError>
where
    H: Fn(f64) -> f64,
{
    integrate(|theta: f64| h(theta.sin()), 0.0, FRAC_PI_2, opts)
}
