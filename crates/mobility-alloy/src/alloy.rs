use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use mobility_core::constants::ANGSTROM_TO_NM;
use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

use crate::composition::CompositionSet;
use crate::database::MaterialDatabase;
use crate::parameter::{MaterialParameter, MaterialPoint};

fn alloy_error(code: &str, message: impl Into<String>) -> MobilityError {
    MobilityError::Configuration(ErrorInfo::new(code, message.into()))
}

/// Alloy family. Only ternaries (two binaries, one mole fraction) are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlloySystem {
    /// A_x B_(1-x) alloy of two binaries.
    #[default]
    Ternary,
}

impl AlloySystem {
    /// Number of binary end members the system interpolates between.
    pub fn binary_count(&self) -> usize {
        match self {
            AlloySystem::Ternary => 2,
        }
    }
}

impl fmt::Display for AlloySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlloySystem::Ternary => f.write_str("ternary"),
        }
    }
}

impl FromStr for AlloySystem {
    type Err = MobilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ternary" => Ok(AlloySystem::Ternary),
            other => Err(MobilityError::Configuration(
                ErrorInfo::new("unsupported-system", "only ternary alloys are supported")
                    .with_context("system", other),
            )),
        }
    }
}

/// Per-composition alloy parameters keyed by parameter name.
///
/// Every array has the length of the composition set. Keys follow the order of
/// the alloy's bowing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlloyParameterTable {
    /// Binary end members; the composition refers to the first one.
    pub binaries: [String; 2],
    /// Alloy name used for the bowing record.
    pub alloy: String,
    /// Compositions indexing every array.
    pub compositions: CompositionSet,
    /// Interpolated parameter arrays.
    pub parameters: IndexMap<MaterialParameter, Vec<f64>>,
}

impl AlloyParameterTable {
    /// Number of composition points.
    pub fn len(&self) -> usize {
        self.compositions.len()
    }

    /// Whether the table has no composition points.
    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }

    /// Returns the per-composition array for `param`, if the bowing record defined it.
    pub fn column(&self, param: MaterialParameter) -> Option<&[f64]> {
        self.parameters.get(&param).map(Vec::as_slice)
    }

    /// Like [`column`](Self::column) but reports an absent key as an error.
    pub fn require(&self, param: MaterialParameter) -> Result<&[f64], MobilityError> {
        self.column(param).ok_or_else(|| {
            MobilityError::Database(
                ErrorInfo::new("missing-parameter", "alloy table lacks a required parameter")
                    .with_context("parameter", param)
                    .with_context("alloy", &self.alloy)
                    .with_hint("add the key to the alloy bowing record"),
            )
        })
    }

    /// Extracts the material point at composition index `index`.
    pub fn point(&self, index: usize) -> Result<MaterialPoint, MobilityError> {
        let composition = *self.compositions.values().get(index).ok_or_else(|| {
            MobilityError::Configuration(
                ErrorInfo::new("composition-index", "composition index out of range")
                    .with_context("index", index)
                    .with_context("len", self.len()),
            )
        })?;
        let at = |param: MaterialParameter| -> Result<f64, MobilityError> {
            self.require(param)?.get(index).copied().ok_or_else(|| {
                MobilityError::Configuration(
                    ErrorInfo::new("composition-index", "parameter column shorter than compositions")
                        .with_context("index", index)
                        .with_context("parameter", param.as_str())
                        .with_context("len", self.len()),
                )
            })
        };
        Ok(MaterialPoint {
            composition,
            mass_density: at(MaterialParameter::MassDensity)?,
            lattice_a: at(MaterialParameter::LatticeA0)? * ANGSTROM_TO_NM,
            lattice_c: at(MaterialParameter::LatticeC0)? * ANGSTROM_TO_NM,
            effective_mass: at(MaterialParameter::EffectiveMass)?,
            alloy_scattering_potential: at(MaterialParameter::AlloyScatteringPotential)?,
            static_dielectric: at(MaterialParameter::StaticDielectricConstant)?,
            high_frequency_dielectric: at(MaterialParameter::HighFrequencyDielectricConstant)?,
            la_phonon_velocity: at(MaterialParameter::LaPhononVelocity)?,
            deformation_potential: at(MaterialParameter::DeformationPotential)?,
            po_phonon_energy: at(MaterialParameter::PoPhononEnergy)?,
            electromechanical_coupling: at(MaterialParameter::ElectromechanicalCoupling)?,
        })
    }
}

/// Quadratic interpolation `x·p1 + (1-x)·p2 - bowing·x·(1-x)`.
pub fn interpolate(x: f64, p1: f64, p2: f64, bowing: f64) -> f64 {
    x * p1 + (1.0 - x) * p2 - bowing * x * (1.0 - x)
}

/// Derives the alloy parameter table of a ternary from its binaries.
///
/// `compositions` defaults to [`CompositionSet::default_scan`]. Parameters are
/// driven by the alloy's bowing record: keys it does not list are absent from
/// the result, keys it lists must exist in both binaries.
pub fn derive(
    database: &MaterialDatabase,
    binaries: &[&str],
    alloy: &str,
    compositions: Option<CompositionSet>,
) -> Result<AlloyParameterTable, MobilityError> {
    let system = AlloySystem::Ternary;
    if binaries.len() != system.binary_count() {
        return Err(MobilityError::Configuration(
            ErrorInfo::new("binary-count", "a ternary alloy needs exactly two binaries")
                .with_context("given", binaries.len()),
        ));
    }
    let compositions = compositions.unwrap_or_default();
    let first = database.get(binaries[0])?;
    let second = database.get(binaries[1])?;
    let bowing_record = database.get(alloy)?;
    if bowing_record.is_empty() {
        return Err(alloy_error(
            "empty-bowing-record",
            format!("alloy record {alloy} defines no parameters"),
        ));
    }

    let mut parameters = IndexMap::with_capacity(bowing_record.len());
    for (param, bowing) in bowing_record.iter() {
        let missing = |binary: &str| {
            MobilityError::Database(
                ErrorInfo::new("missing-parameter", "binary lacks a parameter the alloy bows")
                    .with_context("parameter", param)
                    .with_context("binary", binary),
            )
        };
        let p1 = first.get(param).ok_or_else(|| missing(binaries[0]))?;
        let p2 = second.get(param).ok_or_else(|| missing(binaries[1]))?;
        let values = compositions
            .iter()
            .map(|x| interpolate(x, p1, p2, bowing))
            .collect();
        parameters.insert(param, values);
    }

    tracing::debug!(
        alloy,
        first = binaries[0],
        second = binaries[1],
        points = compositions.len(),
        parameters = parameters.len(),
        "derived alloy parameters"
    );

    Ok(AlloyParameterTable {
        binaries: [binaries[0].to_string(), binaries[1].to_string()],
        alloy: alloy.to_string(),
        compositions,
        parameters,
    })
}
