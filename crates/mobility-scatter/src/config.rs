use std::fs;
use std::path::{Path, PathBuf};

use mobility_alloy::{AlloySystem, CompositionSet, CompositionSpec};
use mobility_core::constants::DEFAULT_CARRIER_FLOOR;
use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregationMode, MechanismSelection};
use crate::condition::OperatingCondition;
use crate::derived::{FomMode, FomOptions};
use crate::mechanism::EngineOpts;
use crate::model::MobilityModel;
use crate::quadrature::QuadratureOpts;
use crate::table::TOTAL_COLUMN;

/// YAML-configurable description of a mobility run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Alloy and database selection.
    #[serde(default)]
    pub material: MaterialConfig,
    /// Compositions to scan; the default 101-point scan when absent.
    #[serde(default)]
    pub compositions: Option<CompositionSpec>,
    /// Operating point shared by every composition.
    #[serde(default)]
    pub condition: OperatingCondition,
    /// Mechanism labels or long names.
    #[serde(default = "default_mechanisms")]
    pub mechanisms: Vec<String>,
    /// Reported columns.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Mobility model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Carrier density floor (nm⁻²).
    #[serde(default = "default_carrier_floor")]
    pub carrier_floor: f64,
    /// Quadrature tolerances.
    #[serde(default)]
    pub quadrature: QuadratureOpts,
    /// Worker threads for the composition scan.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Derived quantities computed from a mobility column.
    #[serde(default)]
    pub derived: Option<DerivedConfig>,
}

fn default_mechanisms() -> Vec<String> {
    ["AD", "IFR", "DIS", "POP", "AP"]
        .iter()
        .map(|label| label.to_string())
        .collect()
}

fn default_model() -> String {
    MobilityModel::default().name().to_string()
}

fn default_carrier_floor() -> f64 {
    DEFAULT_CARRIER_FLOOR
}

fn default_threads() -> usize {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            material: MaterialConfig::default(),
            compositions: None,
            condition: OperatingCondition::default(),
            mechanisms: default_mechanisms(),
            aggregation: AggregationConfig::default(),
            model: default_model(),
            carrier_floor: default_carrier_floor(),
            quadrature: QuadratureOpts::default(),
            threads: default_threads(),
            derived: None,
        }
    }
}

/// Alloy selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    /// Binary end members; compositions refer to the first one.
    #[serde(default = "default_binaries")]
    pub binaries: Vec<String>,
    /// Name of the alloy bowing record.
    #[serde(default = "default_alloy")]
    pub alloy: String,
    /// Alloy system name.
    #[serde(default = "default_system")]
    pub system: String,
    /// Database file overlaid onto the built-in records.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

fn default_binaries() -> Vec<String> {
    vec!["AlN".to_string(), "GaN".to_string()]
}

fn default_alloy() -> String {
    "AlGaN".to_string()
}

fn default_system() -> String {
    AlloySystem::default().to_string()
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            binaries: default_binaries(),
            alloy: default_alloy(),
            system: default_system(),
            database: None,
        }
    }
}

/// Aggregation switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Report the Matthiessen total only.
    #[serde(default)]
    pub total_only: bool,
    /// Append the total to a per-mechanism breakdown.
    #[serde(default = "default_true")]
    pub include_total: bool,
    /// Keep the raw inverse relaxation times.
    #[serde(default)]
    pub record_rates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            total_only: false,
            include_total: true,
            record_rates: false,
        }
    }
}

impl AggregationConfig {
    fn mode(&self) -> AggregationMode {
        if self.total_only {
            AggregationMode::TotalOnly
        } else {
            AggregationMode::Breakdown {
                include_total: self.include_total,
            }
        }
    }
}

/// Derived quantities requested after the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConfig {
    /// Mobility column feeding the derived quantities.
    #[serde(default = "default_column")]
    pub column: String,
    /// Compute the sheet resistance.
    #[serde(default = "default_true")]
    pub sheet_resistance: bool,
    /// Compute a figure of merit.
    #[serde(default)]
    pub figure_of_merit: Option<FomConfig>,
}

fn default_column() -> String {
    TOTAL_COLUMN.to_string()
}

impl Default for DerivedConfig {
    fn default() -> Self {
        Self {
            column: default_column(),
            sheet_resistance: true,
            figure_of_merit: None,
        }
    }
}

/// Figure-of-merit options as written in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FomConfig {
    /// Figure-of-merit name.
    #[serde(default = "default_fom_mode")]
    pub mode: String,
    /// Temperature (K) for the Varshni correction.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Apply the Varshni correction.
    #[serde(default)]
    pub temperature_corrected_bandgap: bool,
    /// Treat the bandgap as direct.
    #[serde(default = "default_true")]
    pub direct_bandgap: bool,
    /// Treat the bandgap as indirect.
    #[serde(default)]
    pub indirect_bandgap: bool,
}

fn default_fom_mode() -> String {
    FomMode::default().to_string()
}

fn default_temperature() -> f64 {
    300.0
}

impl Default for FomConfig {
    fn default() -> Self {
        Self {
            mode: default_fom_mode(),
            temperature: default_temperature(),
            temperature_corrected_bandgap: false,
            direct_bandgap: true,
            indirect_bandgap: false,
        }
    }
}

impl FomConfig {
    /// Parses the mode name and validates the bandgap flags.
    pub fn options(&self) -> Result<FomOptions, MobilityError> {
        let options = FomOptions {
            mode: self.mode.parse()?,
            temperature: self.temperature,
            temperature_corrected_bandgap: self.temperature_corrected_bandgap,
            direct_bandgap: self.direct_bandgap,
            indirect_bandgap: self.indirect_bandgap,
        };
        options.bandgap_kind()?;
        Ok(options)
    }
}

impl RunConfig {
    /// Parses a YAML run configuration.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, MobilityError> {
        serde_yaml::from_slice(data).map_err(|err| MobilityError::serde("yaml_deserialize", err))
    }

    /// Reads and parses a YAML run configuration.
    pub fn load(path: &Path) -> Result<Self, MobilityError> {
        let bytes = fs::read(path).map_err(|err| {
            MobilityError::Serde(
                ErrorInfo::new("config_read", err.to_string()).with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_slice(&bytes).map_err(|err| err.with_context("path", path.display()))
    }

    /// Alloy system named by the material block.
    pub fn system(&self) -> Result<AlloySystem, MobilityError> {
        self.material.system.parse()
    }

    /// Mobility model named by the configuration.
    pub fn model(&self) -> Result<MobilityModel, MobilityError> {
        self.model.parse()
    }

    /// Resolved composition set, `None` for the default scan.
    pub fn composition_set(&self) -> Result<Option<CompositionSet>, MobilityError> {
        self.compositions
            .as_ref()
            .map(CompositionSpec::resolve)
            .transpose()
    }

    /// Mechanism selection with the configured aggregation switches.
    pub fn selection(&self) -> Result<MechanismSelection, MobilityError> {
        let mut selection = MechanismSelection::from_labels(self.mechanisms.as_slice())?;
        selection.mode = self.aggregation.mode();
        selection.record_rates = self.aggregation.record_rates;
        Ok(selection)
    }

    /// Engine options built from the numerical settings.
    pub fn engine_opts(&self) -> EngineOpts {
        EngineOpts {
            carrier_floor: self.carrier_floor,
            quadrature: self.quadrature,
        }
    }

    /// Binary names as string slices.
    pub fn binaries(&self) -> Vec<&str> {
        self.material.binaries.iter().map(String::as_str).collect()
    }
}
