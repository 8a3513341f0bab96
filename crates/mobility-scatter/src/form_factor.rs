use std::fmt;
use std::str::FromStr;

use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

use crate::context::ScatteringContext;

/// Which Fang–Howard form factor a scattering integral uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormFactorMode {
    /// `G(η)` with `η = b / (b + 2 kF x)`.
    #[serde(rename = "IRF")]
    InterfaceRoughness,
    /// Identically one.
    #[serde(rename = "DIS")]
    Dislocation,
    /// `η³` with `η = b / (b + 2 kF x)`.
    #[serde(rename = "DP")]
    DeformationPotential,
    /// `η³` with `η = b / (b + 2 kF x)`.
    #[serde(rename = "PE")]
    Piezoelectric,
    /// `G(η)` with `η = b / (b + k0)`, independent of x.
    #[serde(rename = "POP")]
    PolarOpticalPhonon,
}

/// `G(η) = (2η³ + 3η² + 3η) / 8`.
pub fn fang_howard_g(eta: f64) -> f64 {
    eta * (eta * (2.0 * eta + 3.0) + 3.0) / 8.0
}

impl FormFactorMode {
    /// Evaluates the form factor at `x = sin(θ/2)` for the given context.
    pub fn evaluate(&self, ctx: &ScatteringContext, x: f64) -> f64 {
        let b = ctx.fang_howard_b;
        match self {
            FormFactorMode::InterfaceRoughness => {
                fang_howard_g(b / (b + 2.0 * ctx.fermi_wavevector * x))
            }
            FormFactorMode::Dislocation => 1.0,
            FormFactorMode::DeformationPotential | FormFactorMode::Piezoelectric => {
                let eta = b / (b + 2.0 * ctx.fermi_wavevector * x);
                eta * eta * eta
            }
            FormFactorMode::PolarOpticalPhonon => fang_howard_g(b / (b + ctx.phonon_wavevector)),
        }
    }

    /// Short label of the mode.
    pub fn label(&self) -> &'static str {
        match self {
            FormFactorMode::InterfaceRoughness => "IRF",
            FormFactorMode::Dislocation => "DIS",
            FormFactorMode::DeformationPotential => "DP",
            FormFactorMode::Piezoelectric => "PE",
            FormFactorMode::PolarOpticalPhonon => "POP",
        }
    }
}

impl fmt::Display for FormFactorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormFactorMode {
    type Err = MobilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "IRF" | "IFR" => Ok(FormFactorMode::InterfaceRoughness),
            "DIS" => Ok(FormFactorMode::Dislocation),
            "DP" => Ok(FormFactorMode::DeformationPotential),
            "PE" => Ok(FormFactorMode::Piezoelectric),
            "POP" => Ok(FormFactorMode::PolarOpticalPhonon),
            other => Err(MobilityError::Configuration(
                ErrorInfo::new("unknown-form-factor", "no form factor defined for mode")
                    .with_context("mode", other),
            )),
        }
    }
}
