//! Content hashes recorded in run manifests.
//!
//! A run records three digests: the parsed run configuration, the merged
//! material database and the mobility table. Each digest is taken over the
//! canonical JSON rendering, so key order in YAML inputs or `HashMap`
//! iteration never changes it, and undefined mobilities hash as `null`.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::MobilityError;
use crate::serde::to_canonical_json_bytes;

/// Lower-case hex SHA-256 digest (64 characters) of `value`'s canonical JSON.
pub fn content_hash<T: Serialize>(value: &T) -> Result<String, MobilityError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
