//! The `{ ok, data | errors }` response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ErrorEntry, GenerationError, GenerationFailure};

use super::orchestrator::Generator;
use super::request::{GenerationRequest, Operation};
use super::result::GenerationResult;

/// A generation outcome with an explicit success discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeamResponse {
    /// True when `data` is present.
    pub ok: bool,
    /// The result, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GenerationResult>,
    /// Failure records, on failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorEntry>,
}

impl SeamResponse {
    /// A successful response.
    #[must_use]
    pub fn success(data: GenerationResult) -> Self {
        Self {
            ok: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed response.
    #[must_use]
    pub fn failure(failure: GenerationFailure) -> Self {
        Self {
            ok: false,
            data: None,
            errors: failure.errors,
        }
    }
}

impl From<Result<GenerationResult, GenerationFailure>> for SeamResponse {
    fn from(outcome: Result<GenerationResult, GenerationFailure>) -> Self {
        match outcome {
            Ok(data) => Self::success(data),
            Err(failure) => Self::failure(failure),
        }
    }
}

impl Generator {
    /// Parses a raw JSON request and runs it.
    ///
    /// Never fails: malformed requests come back as an `INPUT_INVALID`
    /// response.
    #[must_use]
    pub fn process_value(&self, request: Value) -> SeamResponse {
        match parse_request(request) {
            Ok(request) => self.process(&request).into(),
            Err(err) => SeamResponse::failure(err.into()),
        }
    }
}

/// Parses a raw JSON generation request.
///
/// # Errors
///
/// Returns [`GenerationError::InputInvalid`] for a missing or unknown
/// operation and for any other shape error.
pub fn parse_request(request: Value) -> Result<GenerationRequest, GenerationError> {
    match request.get("operation") {
        Some(Value::String(op)) => {
            op.parse::<Operation>()?;
        }
        Some(_) => {
            return Err(GenerationError::InputInvalid(
                "'operation' must be a string".to_string(),
            ))
        }
        None => {
            return Err(GenerationError::InputInvalid(
                "Missing 'operation' field".to_string(),
            ))
        }
    }
    serde_json::from_value(request).map_err(|e| GenerationError::InputInvalid(e.to_string()))
}
