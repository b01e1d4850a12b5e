//! Error types for seamgen.
//!
//! Library failures are `thiserror` enums. Anything that crosses the
//! generation boundary is flattened into [`ErrorEntry`] values so callers can
//! branch on an explicit success/failure discriminant instead of matching on
//! internal error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes surfaced in [`ErrorEntry::code`].
pub mod codes {
    /// Malformed or unrecognized generation request.
    pub const INPUT_INVALID: &str = "INPUT_INVALID";
    /// The resolved template file does not exist.
    pub const TEMPLATE_NOT_FOUND: &str = "TEMPLATE_NOT_FOUND";
    /// Any other failure while generating.
    pub const GENERATION_FAILED: &str = "GENERATION_FAILED";
    /// Contract document is not well-formed YAML.
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    /// Contract document is missing required fields.
    pub const SCHEMA_INVALID: &str = "SCHEMA_INVALID";
}

/// A single `{code, message, details}` failure record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Stable error code (see [`codes`]).
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details about the underlying cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEntry {
    /// Creates a new error entry.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Errors raised while loading a contract document.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The contract file could not be read.
    #[error("Failed to read contract {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed YAML.
    #[error("Contract parse error: {0}")]
    Parse(String),

    /// Required fields are missing or have the wrong shape.
    #[error("Contract schema invalid: {}", .violations.join("; "))]
    SchemaInvalid {
        /// Every violation found in the document.
        violations: Vec<String>,
    },
}

impl ContractError {
    /// Returns the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => codes::GENERATION_FAILED,
            Self::Parse(_) => codes::PARSE_ERROR,
            Self::SchemaInvalid { .. } => codes::SCHEMA_INVALID,
        }
    }

    /// Converts to a failure record.
    #[must_use]
    pub fn to_entry(&self) -> ErrorEntry {
        let entry = ErrorEntry::new(self.code(), self.to_string());
        match self {
            Self::SchemaInvalid { violations } => {
                entry.with_details(serde_json::json!({ "violations": violations }))
            }
            Self::Io { path, .. } => entry.with_details(serde_json::json!({ "path": path })),
            Self::Parse(_) => entry,
        }
    }
}

/// Errors raised by a template store.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template exists at the resolved path.
    #[error("Template not found: {path}")]
    NotFound {
        /// Resolved template path.
        path: String,
    },

    /// The template exists but could not be read.
    #[error("Failed to read template {path}: {source}")]
    Io {
        /// Resolved template path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the generation orchestrator.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request is malformed or names an unknown operation.
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    /// The resolved template file does not exist.
    #[error("Template not found: {path}")]
    TemplateNotFound {
        /// Resolved template path.
        path: String,
    },

    /// Any other processing failure.
    #[error("{message}")]
    GenerationFailed {
        /// Summary of the failure.
        message: String,
        /// String form of the underlying cause.
        cause: Option<String>,
    },
}

impl GenerationError {
    /// Creates a generation failure wrapping an underlying cause.
    #[must_use]
    pub fn failed(message: impl Into<String>, cause: &dyn std::error::Error) -> Self {
        Self::GenerationFailed {
            message: message.into(),
            cause: Some(cause.to_string()),
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InputInvalid(_) => codes::INPUT_INVALID,
            Self::TemplateNotFound { .. } => codes::TEMPLATE_NOT_FOUND,
            Self::GenerationFailed { .. } => codes::GENERATION_FAILED,
        }
    }

    /// Converts to a failure record.
    #[must_use]
    pub fn to_entry(&self) -> ErrorEntry {
        let entry = ErrorEntry::new(self.code(), self.to_string());
        match self {
            Self::InputInvalid(_) => entry,
            Self::TemplateNotFound { path } => {
                entry.with_details(serde_json::json!({ "path": path }))
            }
            Self::GenerationFailed { cause, .. } => match cause {
                Some(cause) => entry.with_details(serde_json::json!({ "error": cause })),
                None => entry,
            },
        }
    }
}

impl From<TemplateError> for GenerationError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound { path } => Self::TemplateNotFound { path },
            other @ TemplateError::Io { .. } => Self::failed("Unable to read template", &other),
        }
    }
}

impl From<ContractError> for GenerationError {
    fn from(err: ContractError) -> Self {
        Self::InputInvalid(err.to_string())
    }
}

/// Typed failure value returned by [`Generator::process`](crate::generation::Generator::process).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationFailure {
    /// One or more failure records.
    pub errors: Vec<ErrorEntry>,
}

impl GenerationFailure {
    /// Returns the code of the first failure record.
    #[must_use]
    pub fn primary_code(&self) -> Option<&str> {
        self.errors.first().map(|e| e.code.as_str())
    }
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "generation failed")?;
        for (idx, entry) in self.errors.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{sep}[{}] {}", entry.code, entry.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for GenerationFailure {}

impl From<GenerationError> for GenerationFailure {
    fn from(err: GenerationError) -> Self {
        Self {
            errors: vec![err.to_entry()],
        }
    }
}

/// Errors raised while loading generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`GeneratorConfig`](crate::config::GeneratorConfig).
    #[error("Invalid config: {0}")]
    Parse(String),
}
