#![deny(missing_docs)]
#![doc = "Scattering-rate engine, Matthiessen aggregation and derived transport quantities for two-dimensional carrier gases."]

pub mod aggregate;
pub mod calculator;
/// Operating conditions shared by a composition scan.
pub mod condition;
/// YAML run configuration.
pub mod config;
/// Per-composition scattering context.
pub mod context;
pub mod derived;
/// Fang–Howard form factors.
pub mod form_factor;
pub mod mechanism;
/// Mobility model selection.
pub mod model;
pub mod quadrature;
pub mod report;
/// Mobility tables and their CSV export.
pub mod table;

pub use aggregate::{aggregate, mobility_from_rate, AggregationMode, MechanismSelection};
pub use calculator::MobilityCalculator;
pub use condition::{CarrierDensity, OperatingCondition};
pub use config::{AggregationConfig, DerivedConfig, FomConfig, MaterialConfig, RunConfig};
pub use context::ScatteringContext;
pub use derived::{
    critical_field, lateral_figure_of_merit, mobility_from_sheet_resistance, sheet_resistance,
    varshni_bandgap, BandgapKind, FomMode, FomOptions,
};
pub use form_factor::{fang_howard_g, FormFactorMode};
pub use mechanism::{EngineOpts, Mechanism};
pub use model::MobilityModel;
pub use quadrature::{integrate, integrate_arcsine_weighted, QuadratureOpts, QuadratureResult};
pub use report::{
    build_calculator, resolve_database, run, run_with_database, DerivedQuantities, RunOutput,
};
pub use table::{MobilityRecord, MobilityTable, TOTAL_COLUMN};
