//! Contract loading from YAML documents.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::checks::document_violations;
use super::types::Contract;
use crate::errors::ContractError;

/// Reads and parses the contract at `path`.
///
/// # Errors
///
/// Returns [`ContractError::Io`] when the file cannot be read,
/// [`ContractError::Parse`] when it is not well-formed YAML and
/// [`ContractError::SchemaInvalid`] when required fields are missing.
pub fn load_contract(path: impl AsRef<Path>) -> Result<Contract, ContractError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading contract");
    let text = fs::read_to_string(path).map_err(|source| ContractError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_contract(&text)
}

/// Parses contract YAML text.
///
/// # Errors
///
/// Same as [`load_contract`], minus the IO case.
pub fn parse_contract(text: &str) -> Result<Contract, ContractError> {
    let document = parse_document(text)?;

    let violations = document_violations(&document);
    if !violations.is_empty() {
        return Err(ContractError::SchemaInvalid { violations });
    }

    serde_json::from_value(document).map_err(|err| ContractError::SchemaInvalid {
        violations: vec![err.to_string()],
    })
}

/// Parses YAML text into a JSON value without checking its shape.
pub(crate) fn parse_document(text: &str) -> Result<Value, ContractError> {
    serde_yaml::from_str(text).map_err(|err| ContractError::Parse(err.to_string()))
}
