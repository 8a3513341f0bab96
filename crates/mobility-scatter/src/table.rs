use std::io::Write;

use indexmap::{IndexMap, IndexSet};
use mobility_core::errors::MobilityError;
use mobility_core::UNDEFINED;
use serde::{Deserialize, Serialize};

/// Column label of the Matthiessen aggregate.
pub const TOTAL_COLUMN: &str = "TOT";

/// Mobility contributions at one composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobilityRecord {
    /// Mole fraction of the first binary.
    pub composition: f64,
    /// Carrier density used at this composition (nm⁻²).
    pub carrier_density: f64,
    /// Mobility per column label (cm² V⁻¹ s⁻¹); undefined values are NaN.
    pub mobility: IndexMap<String, f64>,
    /// Inverse relaxation time per column label (s⁻¹), when requested.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub scattering_rates: IndexMap<String, f64>,
    /// m*·m0/e used for the conversion, when rates are requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_to_charge: Option<f64>,
}

impl MobilityRecord {
    /// Mobility stored under `label`.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.mobility.get(label).copied()
    }

    /// Aggregate mobility, when the record carries one.
    pub fn total(&self) -> Option<f64> {
        self.get(TOTAL_COLUMN)
    }

    /// Inverse relaxation time stored under `label`.
    pub fn rate(&self, label: &str) -> Option<f64> {
        self.scattering_rates.get(label).copied()
    }
}

/// Composition-ordered mobility results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MobilityTable {
    /// One record per composition, in composition-set order.
    pub records: Vec<MobilityRecord>,
}

impl MobilityTable {
    /// Wraps records that are already in composition order.
    pub fn new(records: Vec<MobilityRecord>) -> Self {
        Self { records }
    }

    /// Number of compositions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compositions in table order.
    pub fn compositions(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.composition).collect()
    }

    /// Carrier densities in table order.
    pub fn carrier_densities(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|record| record.carrier_density)
            .collect()
    }

    /// Mobility labels in first-seen order.
    pub fn column_labels(&self) -> Vec<String> {
        let mut labels = IndexSet::new();
        for record in &self.records {
            labels.extend(record.mobility.keys().cloned());
        }
        labels.into_iter().collect()
    }

    fn rate_labels(&self) -> Vec<String> {
        let mut labels = IndexSet::new();
        for record in &self.records {
            labels.extend(record.scattering_rates.keys().cloned());
        }
        labels.into_iter().collect()
    }

    /// Per-composition series for `label`; `None` when no record carries the column.
    pub fn column(&self, label: &str) -> Option<Vec<f64>> {
        if !self.records.iter().any(|record| record.mobility.contains_key(label)) {
            return None;
        }
        Some(
            self.records
                .iter()
                .map(|record| record.get(label).unwrap_or(UNDEFINED))
                .collect(),
        )
    }

    /// Writes the table as CSV: one row per composition, rate columns suffixed `_sc`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), MobilityError> {
        let labels = self.column_labels();
        let rate_labels = self.rate_labels();
        let with_mass = self.records.iter().any(|record| record.mass_to_charge.is_some());
        let mut out = csv::Writer::from_writer(writer);

        let mut header = vec!["composition".to_string(), "carrier_density".to_string()];
        header.extend(labels.iter().cloned());
        header.extend(rate_labels.iter().map(|label| format!("{label}_sc")));
        if with_mass {
            header.push("m0_by_e".to_string());
        }
        out.write_record(&header)
            .map_err(|err| MobilityError::serde("csv_write", err))?;

        for record in &self.records {
            let mut row = vec![
                record.composition.to_string(),
                record.carrier_density.to_string(),
            ];
            row.extend(labels.iter().map(|label| format_cell(record.get(label))));
            row.extend(rate_labels.iter().map(|label| format_cell(record.rate(label))));
            if with_mass {
                row.push(format_cell(record.mass_to_charge));
            }
            out.write_record(&row)
                .map_err(|err| MobilityError::serde("csv_write", err))?;
        }
        out.flush()
            .map_err(|err| MobilityError::serde("csv_flush", err))?;
        Ok(())
    }

    /// CSV rendering of [`write_csv`](Self::write_csv) as a string.
    pub fn to_csv_string(&self) -> Result<String, MobilityError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|err| MobilityError::serde("csv_utf8", err))
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}
