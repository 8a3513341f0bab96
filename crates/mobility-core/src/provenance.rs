//! Provenance and schema descriptors attached to run artefacts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Layout version of the JSON artefacts (`mobility_table.json`,
/// `derived_quantities.json`, `run_manifest.json`).
///
/// Bump `major` when a column or field is renamed or removed, `minor` when one
/// is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Incompatible layout changes.
    pub major: u32,
    /// Added fields or columns.
    pub minor: u32,
    /// Fixes that leave the layout unchanged.
    pub patch: u32,
}

/// Layout written by this release.
pub const ARTEFACT_SCHEMA: SchemaVersion = SchemaVersion {
    major: 1,
    minor: 0,
    patch: 0,
};

impl SchemaVersion {
    /// Whether artefacts written under `self` can be read by a release writing `current`.
    pub fn is_readable_by(&self, current: &SchemaVersion) -> bool {
        self.major == current.major && self.minor <= current.minor
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        ARTEFACT_SCHEMA
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Provenance flattened into `run_manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Schema of the emitted artefacts.
    pub schema_version: SchemaVersion,
    /// Hash of the run configuration that produced the data.
    pub config_hash: String,
    /// Hash of the material database records the run consumed.
    pub database_hash: String,
    /// Hash of the resulting mobility table.
    pub table_hash: String,
    /// ISO-8601 timestamp recording when the artefact was generated.
    pub created_at: String,
    /// Crate version and mobility model that produced the table.
    pub tool_versions: BTreeMap<String, String>,
}
