//! Canonical JSON helpers used for artefacts and hashing.

use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::MobilityError;

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into JSON bytes with sorted object keys.
///
/// Non-finite floats become `null`, which is how undefined mobilities appear in artefacts.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, MobilityError> {
    let value =
        serde_json::to_value(value).map_err(|err| MobilityError::serde("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical)
        .map_err(|err| MobilityError::serde("json_write", err))?;
    Ok(bytes)
}

/// Serializes a value into indented JSON while keeping the object key order of the value.
pub fn to_pretty_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, MobilityError> {
    serde_json::to_vec_pretty(value).map_err(|err| MobilityError::serde("json_serialize", err))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, MobilityError> {
    serde_json::from_slice(data).map_err(|err| MobilityError::serde("json_deserialize", err))
}
