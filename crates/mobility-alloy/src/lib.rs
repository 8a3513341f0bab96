#![deny(missing_docs)]
#![doc = "Material database and alloy parameter interpolation for ternary III-V / III-N alloys."]

/// Bowing-corrected interpolation of binary parameters.
pub mod alloy;
/// Composition sets indexing every downstream table.
pub mod composition;
/// Built-in and file backed compound records.
pub mod database;
/// Parameter keys, compound records and per-composition material points.
pub mod parameter;

pub use alloy::{derive, AlloyParameterTable, AlloySystem};
pub use composition::{CompositionSet, CompositionSpec};
pub use database::MaterialDatabase;
pub use parameter::{CompoundRecord, MaterialParameter, MaterialPoint};
