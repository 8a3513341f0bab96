//! Composition scans over an alloy parameter table.

use mobility_alloy::{AlloyParameterTable, CompositionSet, MaterialDatabase, MaterialParameter};
use mobility_core::constants::PURE_BINARY_TOLERANCE;
use mobility_core::errors::{ErrorInfo, MobilityError};
use rayon::prelude::*;

use crate::aggregate::{aggregate, MechanismSelection};
use crate::condition::{CarrierDensity, OperatingCondition};
use crate::context::ScatteringContext;
use crate::derived::{
    critical_field, lateral_figure_of_merit, sheet_resistance, varshni_bandgap, FomMode,
    FomOptions,
};
use crate::mechanism::{EngineOpts, Mechanism};
use crate::model::MobilityModel;
use crate::quadrature::QuadratureOpts;
use crate::table::{MobilityRecord, MobilityTable};

/// Mobility calculator bound to one alloy parameter table.
///
/// The table is read-only; every composition index is evaluated independently,
/// so scans can be spread over a rayon pool without changing the result order.
#[derive(Debug, Clone)]
pub struct MobilityCalculator {
    table: AlloyParameterTable,
    model: MobilityModel,
    opts: EngineOpts,
    threads: usize,
}

impl MobilityCalculator {
    /// Wraps an alloy parameter table.
    pub fn new(table: AlloyParameterTable, model: MobilityModel) -> Self {
        Self {
            table,
            model,
            opts: EngineOpts::default(),
            threads: 1,
        }
    }

    /// Derives the alloy table from `database` and wraps it.
    pub fn from_database(
        database: &MaterialDatabase,
        binaries: &[&str],
        alloy: &str,
        compositions: Option<CompositionSet>,
        model: MobilityModel,
    ) -> Result<Self, MobilityError> {
        let table = mobility_alloy::derive(database, binaries, alloy, compositions)?;
        Ok(Self::new(table, model))
    }

    /// Overrides the carrier density floor (nm⁻²).
    pub fn with_carrier_floor(mut self, carrier_floor: f64) -> Self {
        self.opts.carrier_floor = carrier_floor;
        self
    }

    /// Overrides the quadrature tolerances.
    pub fn with_quadrature(mut self, quadrature: QuadratureOpts) -> Self {
        self.opts.quadrature = quadrature;
        self
    }

    /// Replaces every engine option at once.
    pub fn with_engine_opts(mut self, opts: EngineOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Number of worker threads; values above one enable the rayon pool.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Underlying alloy parameter table.
    pub fn table(&self) -> &AlloyParameterTable {
        &self.table
    }

    /// Mobility model in use.
    pub fn model(&self) -> MobilityModel {
        self.model
    }

    /// Engine options in use.
    pub fn engine_opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Scattering context at composition index `index`.
    pub fn context_at(
        &self,
        index: usize,
        condition: &OperatingCondition,
    ) -> Result<ScatteringContext, MobilityError> {
        let point = self.table.point(index)?;
        Ok(ScatteringContext::build(
            &point,
            condition.carrier_density.at(index),
            condition,
        ))
    }

    /// Mobility table over every composition of the alloy table.
    pub fn calculate(
        &self,
        condition: &OperatingCondition,
        selection: &MechanismSelection,
    ) -> Result<MobilityTable, MobilityError> {
        condition.validate(self.table.len())?;
        self.validate_opts()?;
        if selection.mechanisms.contains(&Mechanism::AlloyDisorder) {
            self.warn_pure_binaries();
        }

        tracing::info!(
            model = %self.model,
            compositions = self.table.len(),
            mechanisms = selection.mechanisms.len(),
            threads = self.threads,
            "starting mobility scan"
        );

        let evaluate = |index: usize| -> Result<MobilityRecord, MobilityError> {
            let ctx = self.context_at(index, condition)?;
            tracing::debug!(
                composition = ctx.composition(),
                carrier_density = ctx.carrier_density,
                effective_mass = ctx.point.effective_mass,
                fermi_wavevector = ctx.fermi_wavevector,
                fang_howard_b = ctx.fang_howard_b,
                "evaluating composition"
            );
            aggregate(&ctx, selection, &self.opts)
        };

        let records = if self.threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .map_err(|err| {
                    MobilityError::Configuration(
                        ErrorInfo::new("thread-pool", "failed to build the worker pool")
                            .with_context("threads", self.threads)
                            .with_context("source", err),
                    )
                })?;
            pool.install(|| {
                (0..self.table.len())
                    .into_par_iter()
                    .map(evaluate)
                    .collect::<Result<Vec<_>, _>>()
            })?
        } else {
            (0..self.table.len())
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?
        };

        tracing::info!(records = records.len(), "mobility scan finished");
        Ok(MobilityTable::new(records))
    }

    /// Sheet resistance (Ω/□) per composition.
    pub fn sheet_resistance(
        &self,
        carrier_density: &CarrierDensity,
        mobility: &[f64],
    ) -> Result<Vec<f64>, MobilityError> {
        let densities = self.series_densities(carrier_density, mobility)?;
        Ok(densities
            .iter()
            .zip(mobility)
            .map(|(n, mu)| sheet_resistance(*n, *mu))
            .collect())
    }

    /// Figure of merit (MW/cm²) per composition from the tabulated bandgap.
    pub fn figure_of_merit(
        &self,
        carrier_density: &CarrierDensity,
        mobility: &[f64],
        opts: &FomOptions,
    ) -> Result<Vec<f64>, MobilityError> {
        let kind = opts.bandgap_kind()?;
        let densities = self.series_densities(carrier_density, mobility)?;
        let bandgaps = self.bandgaps(opts)?;
        let values = match opts.mode {
            FomMode::Lfom => densities
                .iter()
                .zip(mobility)
                .zip(&bandgaps)
                .map(|((n, mu), eg)| lateral_figure_of_merit(*n, *mu, critical_field(*eg, kind)))
                .collect(),
        };
        Ok(values)
    }

    /// Bandgap (eV) per composition, Varshni-corrected when requested.
    pub fn bandgaps(&self, opts: &FomOptions) -> Result<Vec<f64>, MobilityError> {
        let bandgap = self.table.require(MaterialParameter::Bandgap)?;
        if !opts.temperature_corrected_bandgap {
            return Ok(bandgap.to_vec());
        }
        let alpha = self.table.require(MaterialParameter::BandgapAlpha)?;
        let beta = self.table.require(MaterialParameter::BandgapBeta)?;
        Ok(bandgap
            .iter()
            .zip(alpha)
            .zip(beta)
            .map(|((eg, a), b)| varshni_bandgap(*eg, opts.temperature, *a, *b))
            .collect())
    }

    fn series_densities(
        &self,
        carrier_density: &CarrierDensity,
        mobility: &[f64],
    ) -> Result<Vec<f64>, MobilityError> {
        if mobility.len() != self.table.len() {
            return Err(MobilityError::Configuration(
                ErrorInfo::new("mobility-length", "mobility series must match the composition count")
                    .with_context("mobility", mobility.len())
                    .with_context("compositions", self.table.len()),
            ));
        }
        carrier_density.resolve(self.table.len())
    }

    fn validate_opts(&self) -> Result<(), MobilityError> {
        let floor = self.opts.carrier_floor;
        if !floor.is_finite() || floor < 0.0 {
            return Err(MobilityError::Configuration(
                ErrorInfo::new("carrier-floor", "carrier floor must be finite and non-negative")
                    .with_context("carrier_floor", floor),
            ));
        }
        self.opts.quadrature.validate()
    }

    fn warn_pure_binaries(&self) {
        for x in self.table.compositions.iter() {
            if x < PURE_BINARY_TOLERANCE || (1.0 - x) < PURE_BINARY_TOLERANCE {
                tracing::warn!(
                    composition = x,
                    "alloy disorder vanishes at a pure binary composition"
                );
            }
        }
    }
}
