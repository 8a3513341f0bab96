use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

/// Named physical constant carried by a compound record.
///
/// Units are fixed per key: densities in kg/m³, lattice constants in Å,
/// energies in eV, dielectric constants in ε0, velocities in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialParameter {
    /// Mass density (kg/m³).
    #[serde(rename = "mass_density")]
    MassDensity,
    /// In-plane lattice constant a (Å).
    #[serde(rename = "lattice_a0")]
    LatticeA0,
    /// Out-of-plane lattice constant c (Å).
    #[serde(rename = "lattice_c0")]
    LatticeC0,
    /// Bandgap (eV).
    #[serde(rename = "bandgap")]
    Bandgap,
    /// Varshni α coefficient (eV/K).
    #[serde(rename = "bandgap_alpha")]
    BandgapAlpha,
    /// Varshni β coefficient (K).
    #[serde(rename = "bandgap_beta")]
    BandgapBeta,
    /// Electron effective mass (m0).
    #[serde(rename = "e_effective_mass")]
    EffectiveMass,
    /// Alloy scattering potential (eV).
    #[serde(rename = "alloy_scattering_potential")]
    AlloyScatteringPotential,
    /// Static dielectric constant (ε0).
    #[serde(rename = "static_dielectric_constant")]
    StaticDielectricConstant,
    /// High-frequency dielectric constant (ε0).
    #[serde(rename = "high_frequency_dielectric_constant")]
    HighFrequencyDielectricConstant,
    /// Longitudinal acoustic phonon velocity (m/s).
    #[serde(rename = "LA_phonon_velocity")]
    LaPhononVelocity,
    /// Transverse acoustic phonon velocity (m/s).
    #[serde(rename = "TA_phonon_velocity")]
    TaPhononVelocity,
    /// Acoustic deformation potential (eV).
    #[serde(rename = "deformation_potential")]
    DeformationPotential,
    /// Polar optical phonon energy (eV).
    #[serde(rename = "PO_phonon_energy")]
    PoPhononEnergy,
    /// Squared electromechanical coupling constant (unitless).
    #[serde(rename = "electromechanical_coupling_const")]
    ElectromechanicalCoupling,
}

impl MaterialParameter {
    /// Every key, in database order.
    pub const ALL: [MaterialParameter; 15] = [
        MaterialParameter::MassDensity,
        MaterialParameter::LatticeA0,
        MaterialParameter::LatticeC0,
        MaterialParameter::Bandgap,
        MaterialParameter::BandgapAlpha,
        MaterialParameter::BandgapBeta,
        MaterialParameter::EffectiveMass,
        MaterialParameter::AlloyScatteringPotential,
        MaterialParameter::StaticDielectricConstant,
        MaterialParameter::HighFrequencyDielectricConstant,
        MaterialParameter::LaPhononVelocity,
        MaterialParameter::TaPhononVelocity,
        MaterialParameter::DeformationPotential,
        MaterialParameter::PoPhononEnergy,
        MaterialParameter::ElectromechanicalCoupling,
    ];

    /// Serialized key of the parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialParameter::MassDensity => "mass_density",
            MaterialParameter::LatticeA0 => "lattice_a0",
            MaterialParameter::LatticeC0 => "lattice_c0",
            MaterialParameter::Bandgap => "bandgap",
            MaterialParameter::BandgapAlpha => "bandgap_alpha",
            MaterialParameter::BandgapBeta => "bandgap_beta",
            MaterialParameter::EffectiveMass => "e_effective_mass",
            MaterialParameter::AlloyScatteringPotential => "alloy_scattering_potential",
            MaterialParameter::StaticDielectricConstant => "static_dielectric_constant",
            MaterialParameter::HighFrequencyDielectricConstant => {
                "high_frequency_dielectric_constant"
            }
            MaterialParameter::LaPhononVelocity => "LA_phonon_velocity",
            MaterialParameter::TaPhononVelocity => "TA_phonon_velocity",
            MaterialParameter::DeformationPotential => "deformation_potential",
            MaterialParameter::PoPhononEnergy => "PO_phonon_energy",
            MaterialParameter::ElectromechanicalCoupling => "electromechanical_coupling_const",
        }
    }
}

impl fmt::Display for MaterialParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialParameter {
    type Err = MobilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MaterialParameter::ALL
            .iter()
            .copied()
            .find(|param| param.as_str() == value)
            .ok_or_else(|| {
                MobilityError::Database(
                    ErrorInfo::new("unknown-parameter", "unknown material parameter")
                        .with_context("parameter", value),
                )
            })
    }
}

/// Immutable set of named constants for one compound, or an alloy's bowing record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundRecord {
    values: IndexMap<MaterialParameter, f64>,
}

impl CompoundRecord {
    /// Builds a record from `(parameter, value)` pairs, keeping their order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (MaterialParameter, f64)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Returns the value stored for `param`, if any.
    pub fn get(&self, param: MaterialParameter) -> Option<f64> {
        self.values.get(&param).copied()
    }

    /// Iterates over the stored parameters in record order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialParameter, f64)> + '_ {
        self.values.iter().map(|(param, value)| (*param, *value))
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Alloy parameters at a single composition, in the units the scattering engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPoint {
    /// Mole fraction of the first binary.
    pub composition: f64,
    /// Mass density (kg/m³).
    pub mass_density: f64,
    /// In-plane lattice constant (nm).
    pub lattice_a: f64,
    /// Out-of-plane lattice constant (nm).
    pub lattice_c: f64,
    /// Electron effective mass (m0).
    pub effective_mass: f64,
    /// Alloy scattering potential (eV).
    pub alloy_scattering_potential: f64,
    /// Static dielectric constant (ε0).
    pub static_dielectric: f64,
    /// High-frequency dielectric constant (ε0).
    pub high_frequency_dielectric: f64,
    /// Longitudinal acoustic phonon velocity (m/s).
    pub la_phonon_velocity: f64,
    /// Acoustic deformation potential (eV).
    pub deformation_potential: f64,
    /// Polar optical phonon energy (eV).
    pub po_phonon_energy: f64,
    /// Squared electromechanical coupling constant.
    pub electromechanical_coupling: f64,
}
