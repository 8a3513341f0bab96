use std::collections::HashMap;

use mobility_core::hash::content_hash;
use mobility_core::serde::{from_json_slice, to_canonical_json_bytes};
use mobility_core::{is_undefined, RunProvenance, SchemaVersion, ARTEFACT_SCHEMA, UNDEFINED};

#[test]
fn canonical_bytes_sort_keys() {
    let mut map = HashMap::new();
    map.insert("TOT", 1.0);
    map.insert("AD", 2.0);
    let bytes = to_canonical_json_bytes(&map).expect("bytes");
    assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"AD":2.0,"TOT":1.0}"#);
}

#[test]
fn hash_is_insensitive_to_key_order() {
    let mut first = HashMap::new();
    first.insert("a", 1);
    first.insert("b", 2);
    let mut second = HashMap::new();
    second.insert("b", 2);
    second.insert("a", 1);
    assert_eq!(
        content_hash(&first).unwrap(),
        content_hash(&second).unwrap()
    );
}

#[test]
fn undefined_values_serialize_as_null() {
    let bytes = to_canonical_json_bytes(&vec![1.0, UNDEFINED]).expect("bytes");
    assert_eq!(String::from_utf8(bytes).unwrap(), "[1.0,null]");
    assert!(is_undefined(UNDEFINED));
    assert!(!is_undefined(0.0));
}

#[test]
fn provenance_roundtrip() {
    let provenance = RunProvenance {
        config_hash: "abc".into(),
        created_at: "2024-01-01T00:00:00Z".into(),
        ..RunProvenance::default()
    };
    let bytes = to_canonical_json_bytes(&provenance).expect("bytes");
    let restored: RunProvenance = from_json_slice(&bytes).expect("restore");
    assert_eq!(restored, provenance);
}

#[test]
fn hash_is_lowercase_sha256_hex() {
    let digest = content_hash(&vec![0.1, UNDEFINED]).unwrap();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    // NaN and null render identically, so they hash identically.
    assert_eq!(digest, content_hash(&serde_json::json!([0.1, null])).unwrap());
}

#[test]
fn artefact_schema_compatibility() {
    assert_eq!(ARTEFACT_SCHEMA.to_string(), "1.0.0");
    assert_eq!(RunProvenance::default().schema_version, ARTEFACT_SCHEMA);
    let older_minor = SchemaVersion { major: 1, minor: 0, patch: 3 };
    assert!(older_minor.is_readable_by(&ARTEFACT_SCHEMA));
    let newer_minor = SchemaVersion { major: 1, minor: 2, patch: 0 };
    assert!(!newer_minor.is_readable_by(&ARTEFACT_SCHEMA));
    let next_major = SchemaVersion { major: 2, minor: 0, patch: 0 };
    assert!(!next_major.is_readable_by(&ARTEFACT_SCHEMA));
}
