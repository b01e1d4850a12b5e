//! Deterministic contract hashing.

use serde_json::Value;
use sha2::{Digest, Sha256};

use super::types::Contract;

/// SHA-256 (hex) of the contract's canonical JSON form.
///
/// Object keys are sorted at every depth, so the hash does not depend on
/// the field order of the source document.
///
/// # Errors
///
/// Returns an error if the contract cannot be represented as JSON.
pub fn contract_hash(contract: &Contract) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(contract)?;
    Ok(hash_value(&value))
}

/// SHA-256 (hex) of any JSON value's canonical form.
#[must_use]
pub fn hash_value(value: &Value) -> String {
    let canonical = canonical_json(value);
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Serializes a value with object keys sorted lexicographically at every depth.
#[must_use]
pub fn canonical_json(value: &Value) -> String {
    sorted(value).to_string()
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::with_capacity(map.len());
            for key in keys {
                out.insert(key.clone(), sorted(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
