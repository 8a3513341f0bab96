#![deny(missing_docs)]
#![doc = "Shared building blocks for the 2D carrier-gas mobility engine: errors, constants, provenance and canonical hashing."]

pub mod constants;
pub mod errors;
pub mod hash;
pub mod provenance;
pub mod serde;

pub use errors::{ErrorInfo, MobilityError};
pub use provenance::{RunProvenance, SchemaVersion, ARTEFACT_SCHEMA};

/// Sentinel returned for numerically meaningful "not applicable" outcomes.
///
/// A zero aggregate scattering rate, a vanishing carrier density or a pure
/// binary composition for alloy disorder all resolve to this value. It
/// propagates through derived quantities instead of raising an error.
pub const UNDEFINED: f64 = f64::NAN;

/// Returns true when the value is the [`UNDEFINED`] sentinel.
pub fn is_undefined(value: f64) -> bool {
    value.is_nan()
}
