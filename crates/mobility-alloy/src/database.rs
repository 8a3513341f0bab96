use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use mobility_core::errors::{ErrorInfo, MobilityError};
use serde::{Deserialize, Serialize};

use crate::parameter::{CompoundRecord, MaterialParameter};

use MaterialParameter::*;

fn builtin_gan() -> CompoundRecord {
    CompoundRecord::from_pairs([
        (MassDensity, 6150.0),
        (LatticeA0, 3.189),
        (LatticeC0, 5.185),
        (Bandgap, 3.43),
        (BandgapAlpha, 0.909e-3),
        (BandgapBeta, 830.0),
        (EffectiveMass, 0.20),
        (AlloyScatteringPotential, 1.8),
        (StaticDielectricConstant, 8.90),
        (HighFrequencyDielectricConstant, 5.35),
        (LaPhononVelocity, 6560.0),
        (TaPhononVelocity, 2680.0),
        (DeformationPotential, 8.3),
        (PoPhononEnergy, 91.2e-3),
        (ElectromechanicalCoupling, 0.045),
    ])
}

fn builtin_aln() -> CompoundRecord {
    CompoundRecord::from_pairs([
        (MassDensity, 3230.0),
        (LatticeA0, 3.112),
        (LatticeC0, 4.982),
        (Bandgap, 6.20),
        (BandgapAlpha, 1.799e-3),
        (BandgapBeta, 1462.0),
        (EffectiveMass, 0.40),
        (AlloyScatteringPotential, 1.8),
        (StaticDielectricConstant, 8.50),
        (HighFrequencyDielectricConstant, 4.60),
        (LaPhononVelocity, 9060.0),
        (TaPhononVelocity, 3700.0),
        (DeformationPotential, 9.5),
        (PoPhononEnergy, 99.0e-3),
        (ElectromechanicalCoupling, 0.106),
    ])
}

// Bowing record: only the bandgap bows, every other key interpolates linearly.
fn builtin_algan() -> CompoundRecord {
    CompoundRecord::from_pairs(
        MaterialParameter::ALL
            .iter()
            .map(|&param| (param, if param == Bandgap { 0.7 } else { 0.0 })),
    )
}

/// Read-only mapping from compound name to its physical constants.
///
/// Names are case sensitive. Alloy entries hold bowing parameters using the
/// same schema as binaries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialDatabase {
    records: IndexMap<String, CompoundRecord>,
}

impl MaterialDatabase {
    /// Database shipped with the crate: GaN, AlN and the AlGaN bowing record.
    pub fn builtin() -> Self {
        let mut records = IndexMap::new();
        records.insert("GaN".to_string(), builtin_gan());
        records.insert("AlN".to_string(), builtin_aln());
        records.insert("AlGaN".to_string(), builtin_algan());
        Self { records }
    }

    /// Creates a database from explicit records.
    pub fn from_records(records: impl IntoIterator<Item = (String, CompoundRecord)>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Parses a YAML document mapping compound names to parameter maps.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, MobilityError> {
        serde_yaml::from_slice(data).map_err(|err| MobilityError::serde("yaml_deserialize", err))
    }

    /// Parses a JSON document mapping compound names to parameter maps.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, MobilityError> {
        mobility_core::serde::from_json_slice(data)
    }

    /// Loads a database file; `.json` files are parsed as JSON, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, MobilityError> {
        let bytes = fs::read(path).map_err(|err| {
            MobilityError::Serde(
                ErrorInfo::new("database_read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let database = if is_json {
            Self::from_json_slice(&bytes)?
        } else {
            Self::from_yaml_slice(&bytes)?
        };
        tracing::debug!(path = %path.display(), compounds = database.len(), "loaded material database");
        Ok(database)
    }

    /// Overlays `other` onto this database; records with the same name are replaced.
    pub fn merge(mut self, other: MaterialDatabase) -> Self {
        for (name, record) in other.records {
            self.records.insert(name, record);
        }
        self
    }

    /// Looks up a compound or alloy record by its case-sensitive name.
    pub fn get(&self, name: &str) -> Result<&CompoundRecord, MobilityError> {
        self.records.get(name).ok_or_else(|| {
            let known = self.names().collect::<Vec<_>>().join(", ");
            MobilityError::Database(
                ErrorInfo::new("unknown-compound", "compound not present in the database")
                    .with_context("compound", name)
                    .with_hint(format!("known compounds: {known}")),
            )
        })
    }

    /// Whether a record with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Iterates over the record names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the database is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
