//! Inverse relaxation times of the individual scattering mechanisms.
//!
//! Every rate is in s⁻¹ and is exactly zero when the carrier density is below
//! the configured floor. Integrals over `x = sin(θ/2)` are evaluated with the
//! arcsine-weighted quadrature so the `1/√(1-x²)` endpoint singularity never
//! reaches the integrator.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use mobility_core::constants::{
    BOLTZMANN, DEFAULT_CARRIER_FLOOR, ELECTRON_CHARGE, EPSILON_0, FACT_ALLOY, FACT_PHONON,
    FACT_POP, FACT_POP_Y, PURE_BINARY_TOLERANCE,
};
use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

use crate::context::ScatteringContext;
use crate::form_factor::FormFactorMode;
use crate::quadrature::{integrate_arcsine_weighted, QuadratureOpts};

fn default_carrier_floor() -> f64 {
    DEFAULT_CARRIER_FLOOR
}

/// Numerical settings shared by every rate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOpts {
    /// Densities (nm⁻²) below this value contribute no scattering.
    #[serde(default = "default_carrier_floor")]
    pub carrier_floor: f64,
    /// Quadrature tolerances for the integral mechanisms.
    #[serde(default)]
    pub quadrature: QuadratureOpts,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            carrier_floor: default_carrier_floor(),
            quadrature: QuadratureOpts::default(),
        }
    }
}

/// Scattering mechanism identifier.
///
/// Variant order is the column order of mobility tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Mechanism {
    /// Alloy disorder.
    #[serde(rename = "AD")]
    AlloyDisorder,
    /// Interface roughness.
    #[serde(rename = "IFR")]
    InterfaceRoughness,
    /// Charged threading dislocations.
    #[serde(rename = "DIS")]
    Dislocation,
    /// Polar optical phonons.
    #[serde(rename = "POP")]
    PolarOpticalPhonon,
    /// Acoustic phonons, the sum of deformation potential and piezoelectric scattering.
    #[serde(rename = "AP")]
    AcousticPhonon,
    /// Acoustic deformation potential.
    #[serde(rename = "DP")]
    DeformationPotential,
    /// Piezoelectric acoustic phonons.
    #[serde(rename = "PE")]
    Piezoelectric,
}

impl Mechanism {
    /// Every mechanism in column order.
    pub const ALL: [Mechanism; 7] = [
        Mechanism::AlloyDisorder,
        Mechanism::InterfaceRoughness,
        Mechanism::Dislocation,
        Mechanism::PolarOpticalPhonon,
        Mechanism::AcousticPhonon,
        Mechanism::DeformationPotential,
        Mechanism::Piezoelectric,
    ];

    /// Column label used in mobility tables.
    pub fn label(&self) -> &'static str {
        match self {
            Mechanism::AlloyDisorder => "AD",
            Mechanism::InterfaceRoughness => "IFR",
            Mechanism::Dislocation => "DIS",
            Mechanism::PolarOpticalPhonon => "POP",
            Mechanism::AcousticPhonon => "AP",
            Mechanism::DeformationPotential => "DP",
            Mechanism::Piezoelectric => "PE",
        }
    }

    /// Long snake-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Mechanism::AlloyDisorder => "alloy_disorder",
            Mechanism::InterfaceRoughness => "interface_roughness",
            Mechanism::Dislocation => "dislocation",
            Mechanism::PolarOpticalPhonon => "polar_optical_phonon",
            Mechanism::AcousticPhonon => "acoustic_phonon",
            Mechanism::DeformationPotential => "deformation_potential",
            Mechanism::Piezoelectric => "piezoelectric",
        }
    }

    /// Form factor used inside the mechanism's rate, if it has one of its own.
    pub fn form_factor_mode(&self) -> Option<FormFactorMode> {
        match self {
            Mechanism::InterfaceRoughness => Some(FormFactorMode::InterfaceRoughness),
            Mechanism::Dislocation => Some(FormFactorMode::Dislocation),
            Mechanism::PolarOpticalPhonon => Some(FormFactorMode::PolarOpticalPhonon),
            Mechanism::DeformationPotential => Some(FormFactorMode::DeformationPotential),
            Mechanism::Piezoelectric => Some(FormFactorMode::Piezoelectric),
            Mechanism::AlloyDisorder | Mechanism::AcousticPhonon => None,
        }
    }

    /// Inverse relaxation time (s⁻¹) of this mechanism in the given context.
    pub fn rate(&self, ctx: &ScatteringContext, opts: &EngineOpts) -> Result<f64, MobilityError> {
        if ctx.carrier_density < opts.carrier_floor {
            return Ok(0.0);
        }
        let rate = match self {
            Mechanism::AlloyDisorder => alloy_disorder(ctx),
            Mechanism::InterfaceRoughness => interface_roughness(ctx, &opts.quadrature),
            Mechanism::Dislocation => dislocation(ctx, &opts.quadrature),
            Mechanism::PolarOpticalPhonon => polar_optical_phonon(ctx),
            Mechanism::AcousticPhonon => deformation_potential(ctx, &opts.quadrature)
                .and_then(|dp| Ok(dp + piezoelectric(ctx, &opts.quadrature)?)),
            Mechanism::DeformationPotential => deformation_potential(ctx, &opts.quadrature),
            Mechanism::Piezoelectric => piezoelectric(ctx, &opts.quadrature),
        }
        .map_err(|err| {
            err.with_context("mechanism", self.label())
                .with_context("composition", ctx.composition())
        })?;
        if !rate.is_finite() || rate < 0.0 {
            return Err(MobilityError::Configuration(
                ErrorInfo::new("invalid-rate", "scattering rate is not a finite non-negative value")
                    .with_context("mechanism", self.label())
                    .with_context("composition", ctx.composition())
                    .with_context("rate", rate)
                    .with_hint("check the material parameters feeding this mechanism"),
            ));
        }
        Ok(rate)
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mechanism {
    type Err = MobilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Mechanism::ALL
            .iter()
            .copied()
            .find(|mechanism| mechanism.label() == value || mechanism.name() == value)
            .ok_or_else(|| {
                MobilityError::Configuration(
                    ErrorInfo::new("unknown-mechanism", "unknown scattering mechanism")
                        .with_context("mechanism", value)
                        .with_hint("use one of AD, IFR, DIS, POP, AP, DP, PE"),
                )
            })
    }
}

// (x + qTF·F(x) / 2kF)², the screened Coulomb denominator without its √(1-x²).
fn screened_denominator(ctx: &ScatteringContext, mode: FormFactorMode, x: f64) -> f64 {
    let term =
        x + ctx.thomas_fermi_wavevector * mode.evaluate(ctx, x) / (2.0 * ctx.fermi_wavevector);
    term * term
}

// x³ / (2kF·x + qTF·F(x))², the acoustic phonon kernel without its √(1-x²).
fn phonon_kernel(ctx: &ScatteringContext, mode: FormFactorMode, x: f64) -> f64 {
    let term = 2.0 * ctx.fermi_wavevector * x + ctx.thomas_fermi_wavevector * mode.evaluate(ctx, x);
    x * x * x / (term * term)
}

fn alloy_disorder(ctx: &ScatteringContext) -> Result<f64, MobilityError> {
    let x = ctx.composition();
    if x < PURE_BINARY_TOLERANCE || (1.0 - x) < PURE_BINARY_TOLERANCE {
        return Ok(0.0);
    }
    let point = &ctx.point;
    Ok(FACT_ALLOY
        * point.effective_mass
        * ctx.cell_volume
        * point.alloy_scattering_potential
        * point.alloy_scattering_potential
        * x
        * (1.0 - x)
        * ctx.fang_howard_b)
}

fn interface_roughness(ctx: &ScatteringContext, quad: &QuadratureOpts) -> Result<f64, MobilityError> {
    let spectrum = ctx.rms_roughness * ctx.correlation_length * ctx.carrier_density;
    let prefactor = ctx.screening_prefactor * spectrum * spectrum / 8.0;
    if prefactor == 0.0 {
        return Ok(0.0);
    }
    let decay = ctx.correlation_length * ctx.fermi_wavevector;
    let integral = integrate_arcsine_weighted(
        |x| {
            let damping = (-(decay * x) * (decay * x)).exp();
            x.powi(4) * damping
                / screened_denominator(ctx, FormFactorMode::InterfaceRoughness, x)
        },
        quad,
    )?;
    Ok(prefactor * integral.value)
}

fn dislocation(ctx: &ScatteringContext, quad: &QuadratureOpts) -> Result<f64, MobilityError> {
    let charged = ctx.dislocation_density * ctx.dislocation_occupancy * ctx.dislocation_occupancy;
    if charged == 0.0 {
        return Ok(0.0);
    }
    let k_f = ctx.fermi_wavevector;
    let c = ctx.point.lattice_c;
    let prefactor = ctx.screening_prefactor * charged / (4.0 * PI * k_f.powi(4) * c * c);
    let integral = integrate_arcsine_weighted(
        |x| 1.0 / screened_denominator(ctx, FormFactorMode::Dislocation, x),
        quad,
    )?;
    Ok(prefactor * integral.value)
}

fn deformation_potential(
    ctx: &ScatteringContext,
    quad: &QuadratureOpts,
) -> Result<f64, MobilityError> {
    let point = &ctx.point;
    let k_f = ctx.fermi_wavevector;
    let prefactor = FACT_PHONON
        * 1e9
        * (3.0
            * point.deformation_potential
            * point.deformation_potential
            * point.effective_mass
            * ctx.temperature
            * k_f
            * k_f
            * ctx.fang_howard_b)
        / (point.mass_density * point.la_phonon_velocity * point.la_phonon_velocity);
    if prefactor == 0.0 {
        return Ok(0.0);
    }
    let integral = integrate_arcsine_weighted(
        |x| x * phonon_kernel(ctx, FormFactorMode::DeformationPotential, x),
        quad,
    )?;
    Ok(prefactor * integral.value)
}

fn piezoelectric(ctx: &ScatteringContext, quad: &QuadratureOpts) -> Result<f64, MobilityError> {
    let point = &ctx.point;
    let prefactor = FACT_PHONON
        * 1e-9
        * (4.0
            * ctx.fermi_wavevector
            * point.electromechanical_coupling
            * point.effective_mass
            * ctx.temperature)
        / (EPSILON_0 * point.static_dielectric);
    if prefactor == 0.0 {
        return Ok(0.0);
    }
    let mode = FormFactorMode::Piezoelectric;
    let integral = integrate_arcsine_weighted(
        |x| mode.evaluate(ctx, x) * phonon_kernel(ctx, mode, x),
        quad,
    )?;
    Ok(prefactor * integral.value)
}

fn polar_optical_phonon(ctx: &ScatteringContext) -> Result<f64, MobilityError> {
    let point = &ctx.point;
    let eps_star = 1.0 / (1.0 / point.high_frequency_dielectric - 1.0 / point.static_dielectric);
    let coupling = point.effective_mass
        * point.po_phonon_energy
        * FormFactorMode::PolarOpticalPhonon.evaluate(ctx, 0.0)
        / eps_star
        / ctx.phonon_wavevector;
    let y = FACT_POP_Y * ctx.carrier_density / point.effective_mass / ctx.temperature;
    let occupation =
        1.0 / ((point.po_phonon_energy * ELECTRON_CHARGE / (BOLTZMANN * ctx.temperature)).exp() - 1.0);
    let degeneracy = y / (1.0 + y - (-y).exp());
    Ok(FACT_POP * coupling * occupation * degeneracy)
}
