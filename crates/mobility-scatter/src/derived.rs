//! Sheet resistance, bandgap temperature dependence and lateral figure of merit.

use std::fmt;
use std::str::FromStr;

use mobility_core::constants::{
    CRITICAL_FIELD_DIRECT, CRITICAL_FIELD_INDIRECT, LFOM_FACTOR, SHEET_RESISTANCE_FACTOR,
};
use mobility_core::errors::{ErrorInfo, MobilityError};
use mobility_core::UNDEFINED;
use serde::{Deserialize, Serialize};

/// Sheet resistance (Ω/□) for a density in nm⁻² and a mobility in cm² V⁻¹ s⁻¹.
///
/// Undefined when the mobility is undefined or the product vanishes.
pub fn sheet_resistance(carrier_density: f64, mobility: f64) -> f64 {
    let conductance = carrier_density * mobility;
    if conductance.is_nan() || conductance == 0.0 {
        return UNDEFINED;
    }
    SHEET_RESISTANCE_FACTOR / conductance
}

/// Mobility (cm² V⁻¹ s⁻¹) reproducing a measured sheet resistance.
pub fn mobility_from_sheet_resistance(carrier_density: f64, sheet_resistance: f64) -> f64 {
    let product = carrier_density * sheet_resistance;
    if product.is_nan() || product == 0.0 {
        return UNDEFINED;
    }
    SHEET_RESISTANCE_FACTOR / product
}

/// Varshni bandgap `Eg0 − α·T² / (T + β)` in eV.
pub fn varshni_bandgap(bandgap_0k: f64, temperature: f64, alpha: f64, beta: f64) -> f64 {
    bandgap_0k - alpha * temperature * temperature / (temperature + beta)
}

/// Character of the fundamental bandgap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandgapKind {
    /// Direct gap, `Ecr = 1.73e5·Eg^2.5`.
    Direct,
    /// Indirect gap, `Ecr = 2.38e5·Eg²`.
    Indirect,
}

impl BandgapKind {
    /// Resolves the pair of boolean flags; exactly one of them must be set.
    pub fn from_flags(direct: bool, indirect: bool) -> Result<Self, MobilityError> {
        match (direct, indirect) {
            (true, false) => Ok(BandgapKind::Direct),
            (false, true) => Ok(BandgapKind::Indirect),
            _ => Err(MobilityError::Configuration(
                ErrorInfo::new(
                    "bandgap-kind",
                    "exactly one of direct_bandgap and indirect_bandgap must be set",
                )
                .with_context("direct_bandgap", direct)
                .with_context("indirect_bandgap", indirect),
            )),
        }
    }
}

/// Critical breakdown field (V/cm) from the bandgap (eV).
pub fn critical_field(bandgap: f64, kind: BandgapKind) -> f64 {
    match kind {
        BandgapKind::Direct => CRITICAL_FIELD_DIRECT * bandgap.powf(2.5),
        BandgapKind::Indirect => CRITICAL_FIELD_INDIRECT * bandgap * bandgap,
    }
}

/// Lateral figure of merit (MW/cm²).
pub fn lateral_figure_of_merit(carrier_density: f64, mobility: f64, critical_field: f64) -> f64 {
    LFOM_FACTOR * carrier_density * mobility * critical_field * critical_field
}

/// Figure-of-merit family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FomMode {
    /// Lateral figure of merit, `q·n2d·μ·Ecr²`.
    #[default]
    #[serde(rename = "LFOM")]
    Lfom,
}

impl fmt::Display for FomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FomMode::Lfom => f.write_str("LFOM"),
        }
    }
}

impl FromStr for FomMode {
    type Err = MobilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "LFOM" => Ok(FomMode::Lfom),
            other => Err(MobilityError::Configuration(
                ErrorInfo::new("unknown-fom", "unsupported figure of merit")
                    .with_context("fom", other)
                    .with_hint("the only available figure of merit is LFOM"),
            )),
        }
    }
}

fn default_temperature() -> f64 {
    300.0
}

fn default_true() -> bool {
    true
}

/// Options of [`MobilityCalculator::figure_of_merit`](crate::MobilityCalculator::figure_of_merit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FomOptions {
    /// Figure-of-merit family.
    #[serde(default)]
    pub mode: FomMode,
    /// Temperature (K) used by the Varshni correction.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Apply the Varshni correction to the tabulated bandgap.
    #[serde(default)]
    pub temperature_corrected_bandgap: bool,
    /// Treat the bandgap as direct.
    #[serde(default = "default_true")]
    pub direct_bandgap: bool,
    /// Treat the bandgap as indirect.
    #[serde(default)]
    pub indirect_bandgap: bool,
}

impl Default for FomOptions {
    fn default() -> Self {
        Self {
            mode: FomMode::default(),
            temperature: default_temperature(),
            temperature_corrected_bandgap: false,
            direct_bandgap: true,
            indirect_bandgap: false,
        }
    }
}

impl FomOptions {
    /// Bandgap character selected by the flags.
    pub fn bandgap_kind(&self) -> Result<BandgapKind, MobilityError> {
        BandgapKind::from_flags(self.direct_bandgap, self.indirect_bandgap)
    }
}
