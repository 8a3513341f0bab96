//! End-to-end runs driven by a [`RunConfig`].

use std::collections::BTreeMap;

use mobility_alloy::{AlloyParameterTable, MaterialDatabase};
use mobility_core::errors::{ErrorInfo, MobilityError};
use mobility_core::hash::content_hash;
use mobility_core::{RunProvenance, ARTEFACT_SCHEMA};
use serde::{Deserialize, Serialize};

use crate::calculator::MobilityCalculator;
use crate::config::RunConfig;
use crate::derived::FomOptions;
use crate::model::MobilityModel;
use crate::table::MobilityTable;

/// Sheet resistance and figure of merit computed from one mobility column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuantities {
    /// Mobility column the series were computed from.
    pub column: String,
    /// Compositions indexing every series.
    pub compositions: Vec<f64>,
    /// Mobility series used (cm² V⁻¹ s⁻¹).
    pub mobility: Vec<f64>,
    /// Sheet resistance (Ω/□).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_resistance: Option<Vec<f64>>,
    /// Figure-of-merit options in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fom_options: Option<FomOptions>,
    /// Figure of merit (MW/cm²).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure_of_merit: Option<Vec<f64>>,
}

/// Everything produced by one configured run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    /// Interpolated alloy parameters.
    pub alloy: AlloyParameterTable,
    /// Mobility table.
    pub table: MobilityTable,
    /// Derived quantities, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<DerivedQuantities>,
    /// Provenance of the artefacts.
    pub provenance: RunProvenance,
}

/// Built-in records overlaid with the configured database file, if any.
pub fn resolve_database(config: &RunConfig) -> Result<MaterialDatabase, MobilityError> {
    let builtin = MaterialDatabase::builtin();
    match &config.material.database {
        Some(path) => Ok(builtin.merge(MaterialDatabase::load(path)?)),
        None => Ok(builtin),
    }
}

/// Builds the calculator described by `config` on top of `database`.
pub fn build_calculator(
    config: &RunConfig,
    database: &MaterialDatabase,
) -> Result<MobilityCalculator, MobilityError> {
    config.system()?;
    let model = config.model()?;
    let calculator = MobilityCalculator::from_database(
        database,
        &config.binaries(),
        &config.material.alloy,
        config.composition_set()?,
        model,
    )?;
    Ok(calculator
        .with_engine_opts(config.engine_opts())
        .with_threads(config.threads))
}

/// Runs `config` against the resolved database.
pub fn run(config: &RunConfig) -> Result<RunOutput, MobilityError> {
    let database = resolve_database(config)?;
    run_with_database(config, &database)
}

/// Runs `config` against an explicit database.
pub fn run_with_database(
    config: &RunConfig,
    database: &MaterialDatabase,
) -> Result<RunOutput, MobilityError> {
    let selection = config.selection()?;
    let calculator = build_calculator(config, database)?;
    let table = calculator.calculate(&config.condition, &selection)?;

    let derived = match &config.derived {
        Some(derived) => {
            let mobility = table.column(&derived.column).ok_or_else(|| {
                MobilityError::Configuration(
                    ErrorInfo::new("unknown-column", "derived quantities need a computed column")
                        .with_context("column", &derived.column)
                        .with_hint("enable include_total or select the mechanism"),
                )
            })?;
            let sheet_resistance = if derived.sheet_resistance {
                Some(calculator.sheet_resistance(&config.condition.carrier_density, &mobility)?)
            } else {
                None
            };
            let (fom_options, figure_of_merit) = match &derived.figure_of_merit {
                Some(fom) => {
                    let options = fom.options()?;
                    let values = calculator.figure_of_merit(
                        &config.condition.carrier_density,
                        &mobility,
                        &options,
                    )?;
                    (Some(options), Some(values))
                }
                None => (None, None),
            };
            Some(DerivedQuantities {
                column: derived.column.clone(),
                compositions: table.compositions(),
                mobility,
                sheet_resistance,
                fom_options,
                figure_of_merit,
            })
        }
        None => None,
    };

    let provenance = RunProvenance {
        schema_version: ARTEFACT_SCHEMA,
        config_hash: content_hash(config)?,
        database_hash: content_hash(database)?,
        table_hash: content_hash(&table)?,
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_versions: tool_versions(calculator.model()),
    };

    Ok(RunOutput {
        alloy: calculator.table().clone(),
        table,
        derived,
        provenance,
    })
}

/// Versions of the crates and the model involved in a run.
pub fn tool_versions(model: MobilityModel) -> BTreeMap<String, String> {
    let mut versions = BTreeMap::new();
    versions.insert(
        "mobility-scatter".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    versions.insert("model".to_string(), model.to_string());
    versions
}
