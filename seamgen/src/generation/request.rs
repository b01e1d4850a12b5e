//! Generation requests.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contracts::Contract;
use crate::errors::GenerationError;

/// Template type used when a request does not select one.
pub const DEFAULT_TEMPLATE_TYPE: &str = "typescript";

/// What a request asks the generator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Render the TypeScript stub.
    GenerateStub,
    /// Render the Markdown blueprint.
    GenerateBlueprint,
    /// Render the test scaffold.
    GenerateTest,
    /// Stub, blueprint and test, in that order.
    GenerateAll,
    /// Check that the stub template exists.
    ValidateTemplate,
    /// Render the stub under a `[PREVIEW] ` path.
    Preview,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::GenerateStub,
        Self::GenerateBlueprint,
        Self::GenerateTest,
        Self::GenerateAll,
        Self::ValidateTemplate,
        Self::Preview,
    ];

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateStub => "generate_stub",
            Self::GenerateBlueprint => "generate_blueprint",
            Self::GenerateTest => "generate_test",
            Self::GenerateAll => "generate_all",
            Self::ValidateTemplate => "validate_template",
            Self::Preview => "preview",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| GenerationError::InputInvalid(format!("Unsupported operation: {s}")))
    }
}

/// Recognized generation options. Unset flags default to `true`; unset
/// strings fall back to the generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Emit doc comments in generated code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_comments: Option<bool>,
    /// Emit the first contract example in generated files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_examples: Option<bool>,
    /// Map untyped schema properties to `unknown` instead of `any`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_types: Option<bool>,
    /// Author stamped into generated files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// License stamped into generated files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Generator version stamped into generated files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_version: Option<String>,
}

impl GenerationOptions {
    /// Creates options with every key unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether comments are emitted.
    #[must_use]
    pub fn include_comments(&self) -> bool {
        self.include_comments.unwrap_or(true)
    }

    /// Whether examples are emitted.
    #[must_use]
    pub fn include_examples(&self) -> bool {
        self.include_examples.unwrap_or(true)
    }

    /// Whether strict types are emitted.
    #[must_use]
    pub fn strict_types(&self) -> bool {
        self.strict_types.unwrap_or(true)
    }

    /// Sets `includeComments`.
    #[must_use]
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.include_comments = Some(enabled);
        self
    }

    /// Sets `includeExamples`.
    #[must_use]
    pub fn with_examples(mut self, enabled: bool) -> Self {
        self.include_examples = Some(enabled);
        self
    }

    /// Sets `strictTypes`.
    #[must_use]
    pub fn with_strict_types(mut self, enabled: bool) -> Self {
        self.strict_types = Some(enabled);
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the license.
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }
}

/// A single call to [`Generator::process`](super::Generator::process).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Requested operation.
    pub operation: Operation,
    /// Contract to render.
    pub contract: Contract,
    /// Stub template selector, e.g. `typescript`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
    /// Recognized options.
    #[serde(default)]
    pub options: GenerationOptions,
    /// Extra template variables, merged last.
    #[serde(default, alias = "templateData", skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_variables: BTreeMap<String, Value>,
}

impl GenerationRequest {
    /// Creates a request with default options.
    #[must_use]
    pub fn new(operation: Operation, contract: Contract) -> Self {
        Self {
            operation,
            contract,
            template_type: None,
            options: GenerationOptions::default(),
            custom_variables: BTreeMap::new(),
        }
    }

    /// Selects the stub template type.
    #[must_use]
    pub fn with_template_type(mut self, template_type: impl Into<String>) -> Self {
        self.template_type = Some(template_type.into());
        self
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a custom template variable.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_variables.insert(key.into(), value.into());
        self
    }

    /// Returns the stub template type, defaulting to `typescript`.
    #[must_use]
    pub fn template_type(&self) -> &str {
        self.template_type.as_deref().unwrap_or(DEFAULT_TEMPLATE_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::SeamCategory;
    use serde_json::json;

    #[test]
    fn test_operation_round_trips_wire_names() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
            assert_eq!(serde_json::to_value(op).unwrap(), json!(op.as_str()));
        }
    }

    #[test]
    fn test_unknown_operation_is_input_invalid() {
        let err = "deploy".parse::<Operation>().unwrap_err();
        assert_eq!(err.code(), crate::errors::codes::INPUT_INVALID);
        assert!(err.to_string().contains("Unsupported operation: deploy"));
    }

    #[test]
    fn test_option_defaults_are_true() {
        let options = GenerationOptions::new();
        assert!(options.include_comments());
        assert!(options.include_examples());
        assert!(options.strict_types());

        let options = options.with_comments(false);
        assert!(!options.include_comments());
    }

    #[test]
    fn test_request_deserializes_from_camel_case() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "operation": "generate_stub",
            "contract": {
                "name": "UserSeam",
                "version": "v1",
                "category": "api",
                "description": "Users"
            },
            "templateType": "typescript",
            "options": {"includeComments": false, "author": "Ada"},
            "customVariables": {"team": "core"}
        }))
        .unwrap();

        assert_eq!(request.operation, Operation::GenerateStub);
        assert_eq!(request.contract.category, SeamCategory::Api);
        assert_eq!(request.options.include_comments, Some(false));
        assert_eq!(request.options.author.as_deref(), Some("Ada"));
        assert_eq!(request.custom_variables["team"], json!("core"));
    }

    #[test]
    fn test_template_data_alias() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "operation": "preview",
            "contract": {"name": "A", "version": 2, "category": "ui"},
            "templateData": {"x": 1}
        }))
        .unwrap();
        assert_eq!(request.contract.version, "2");
        assert_eq!(request.custom_variables["x"], json!(1));
        assert_eq!(request.template_type(), "typescript");
    }
}
