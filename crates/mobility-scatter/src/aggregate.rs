//! Matthiessen aggregation of per-mechanism scattering rates into mobilities.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use mobility_core::constants::MOBILITY_M2_TO_CM2;
use mobility_core::errors::MobilityError;
use mobility_core::UNDEFINED;
use serde::{Deserialize, Serialize};

use crate::context::ScatteringContext;
use crate::mechanism::{EngineOpts, Mechanism};
use crate::table::{MobilityRecord, TOTAL_COLUMN};

/// Which columns an aggregation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum AggregationMode {
    /// Only the Matthiessen total.
    TotalOnly,
    /// One column per selected mechanism, optionally followed by the total.
    Breakdown {
        /// Append the `TOT` column.
        include_total: bool,
    },
}

impl Default for AggregationMode {
    fn default() -> Self {
        AggregationMode::Breakdown {
            include_total: true,
        }
    }
}

/// Mechanisms to evaluate and how to report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanismSelection {
    /// Selected mechanisms; iteration follows column order.
    pub mechanisms: BTreeSet<Mechanism>,
    /// Reported columns.
    #[serde(default)]
    pub mode: AggregationMode,
    /// Keep inverse relaxation times and m*·m0/e next to the mobilities.
    #[serde(default)]
    pub record_rates: bool,
}

impl Default for MechanismSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl MechanismSelection {
    /// Selection of the given mechanisms with a breakdown including the total.
    pub fn new<I: IntoIterator<Item = Mechanism>>(mechanisms: I) -> Self {
        Self {
            mechanisms: mechanisms.into_iter().collect(),
            mode: AggregationMode::default(),
            record_rates: false,
        }
    }

    /// The physically complete set: AD, IFR, DIS, POP and AP.
    pub fn all() -> Self {
        Self::new([
            Mechanism::AlloyDisorder,
            Mechanism::InterfaceRoughness,
            Mechanism::Dislocation,
            Mechanism::PolarOpticalPhonon,
            Mechanism::AcousticPhonon,
        ])
    }

    /// Parses labels or long names such as `"IFR"` or `"acoustic_phonon"`.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, MobilityError> {
        let mechanisms = labels
            .iter()
            .map(|label| label.as_ref().parse::<Mechanism>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(mechanisms))
    }

    /// Report the total only.
    pub fn total_only(mut self) -> Self {
        self.mode = AggregationMode::TotalOnly;
        self
    }

    /// Report every selected mechanism, with or without the total.
    pub fn breakdown(mut self, include_total: bool) -> Self {
        self.mode = AggregationMode::Breakdown { include_total };
        self
    }

    /// Keep raw rates in the produced records.
    pub fn with_rates(mut self, record_rates: bool) -> Self {
        self.record_rates = record_rates;
        self
    }

    /// Mechanisms entering the Matthiessen sum.
    ///
    /// AP already contains DP and PE, so those two are dropped from the sum
    /// whenever AP is selected.
    pub fn summed_mechanisms(&self) -> Vec<Mechanism> {
        let acoustic = self.mechanisms.contains(&Mechanism::AcousticPhonon);
        self.mechanisms
            .iter()
            .copied()
            .filter(|mechanism| {
                !(acoustic
                    && matches!(
                        mechanism,
                        Mechanism::DeformationPotential | Mechanism::Piezoelectric
                    ))
            })
            .collect()
    }
}

/// Converts an inverse relaxation time into a mobility in cm² V⁻¹ s⁻¹.
///
/// A rate of exactly zero means no scattering and yields the undefined sentinel.
pub fn mobility_from_rate(mass_to_charge: f64, rate: f64) -> f64 {
    if rate == 0.0 {
        return UNDEFINED;
    }
    MOBILITY_M2_TO_CM2 / (mass_to_charge * rate)
}

// Rates evaluated once per context; AP reuses DP and PE.
struct RateCache<'a> {
    ctx: &'a ScatteringContext,
    opts: &'a EngineOpts,
    rates: BTreeMap<Mechanism, f64>,
}

impl<'a> RateCache<'a> {
    fn new(ctx: &'a ScatteringContext, opts: &'a EngineOpts) -> Self {
        Self {
            ctx,
            opts,
            rates: BTreeMap::new(),
        }
    }

    fn get(&mut self, mechanism: Mechanism) -> Result<f64, MobilityError> {
        if let Some(rate) = self.rates.get(&mechanism) {
            return Ok(*rate);
        }
        let rate = match mechanism {
            Mechanism::AcousticPhonon => {
                self.get(Mechanism::DeformationPotential)? + self.get(Mechanism::Piezoelectric)?
            }
            other => other.rate(self.ctx, self.opts)?,
        };
        self.rates.insert(mechanism, rate);
        Ok(rate)
    }
}

/// Evaluates the selection at one composition and combines it with Matthiessen's rule.
///
/// An empty selection sums to a zero rate, so its total is [`UNDEFINED`].
pub fn aggregate(
    ctx: &ScatteringContext,
    selection: &MechanismSelection,
    opts: &EngineOpts,
) -> Result<MobilityRecord, MobilityError> {
    let mut cache = RateCache::new(ctx, opts);
    let mass_to_charge = ctx.mass_to_charge;

    let mut total_rate = 0.0;
    for mechanism in selection.summed_mechanisms() {
        total_rate += cache.get(mechanism)?;
    }

    let mut mobility = IndexMap::new();
    let mut scattering_rates = IndexMap::new();
    let include_total = match selection.mode {
        AggregationMode::TotalOnly => true,
        AggregationMode::Breakdown { include_total } => {
            for mechanism in &selection.mechanisms {
                let rate = cache.get(*mechanism)?;
                mobility.insert(
                    mechanism.label().to_string(),
                    mobility_from_rate(mass_to_charge, rate),
                );
                if selection.record_rates {
                    scattering_rates.insert(mechanism.label().to_string(), rate);
                }
            }
            include_total
        }
    };
    if include_total {
        mobility.insert(
            TOTAL_COLUMN.to_string(),
            mobility_from_rate(mass_to_charge, total_rate),
        );
        if selection.record_rates {
            scattering_rates.insert(TOTAL_COLUMN.to_string(), total_rate);
        }
    }

    Ok(MobilityRecord {
        composition: ctx.composition(),
        carrier_density: ctx.carrier_density,
        mobility,
        scattering_rates,
        mass_to_charge: selection.record_rates.then_some(mass_to_charge),
    })
}
