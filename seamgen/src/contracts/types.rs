//! Contract data model.

use serde::{Deserialize, Deserializer, Serialize};

/// Category of a seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeamCategory {
    /// Request/response API boundary.
    Api,
    /// Storage boundary.
    Persistence,
    /// Pure computation.
    Computation,
    /// Third-party integration.
    Integration,
    /// User interface boundary.
    Ui,
}

impl SeamCategory {
    /// Returns the wire name of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Persistence => "persistence",
            Self::Computation => "computation",
            Self::Integration => "integration",
            Self::Ui => "ui",
        }
    }
}

impl std::fmt::Display for SeamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured description of a seam's inputs, outputs, errors and examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Unique seam name.
    pub name: String,
    /// Version tag, e.g. `v1`.
    #[serde(deserialize_with = "string_or_number")]
    pub version: String,
    /// Date the version was cut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_date: Option<String>,
    /// Seam category.
    pub category: SeamCategory,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Input schema (`request` is the conventional entry).
    #[serde(default = "empty_object")]
    pub inputs: serde_json::Value,
    /// Output schema (`success` is the conventional entry).
    #[serde(default = "empty_object")]
    pub outputs: serde_json::Value,
    /// Declared errors, in order.
    #[serde(default)]
    pub errors: Vec<ErrorDescriptor>,
    /// Example input/output pairs, in order.
    #[serde(default)]
    pub examples: Vec<ContractExample>,
    /// Example failure cases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_examples: Vec<ErrorExample>,
    /// Other seams this one depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
    /// Authoring metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ContractMetadata>,
}

impl Contract {
    /// Creates a contract with empty schemas and no errors or examples.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        category: SeamCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            version_date: None,
            category,
            description: description.into(),
            inputs: empty_object(),
            outputs: empty_object(),
            errors: Vec::new(),
            examples: Vec::new(),
            error_examples: Vec::new(),
            dependencies: Vec::new(),
            metadata: None,
        }
    }

    /// Sets the input schema.
    #[must_use]
    pub fn with_inputs(mut self, inputs: serde_json::Value) -> Self {
        self.inputs = inputs;
        self
    }

    /// Sets the output schema.
    #[must_use]
    pub fn with_outputs(mut self, outputs: serde_json::Value) -> Self {
        self.outputs = outputs;
        self
    }

    /// Appends an error descriptor.
    #[must_use]
    pub fn with_error(mut self, error: ErrorDescriptor) -> Self {
        self.errors.push(error);
        self
    }

    /// Appends an example.
    #[must_use]
    pub fn with_example(mut self, example: ContractExample) -> Self {
        self.examples.push(example);
        self
    }

    /// Appends a dependency.
    #[must_use]
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Conventional file name: `<name>.contract.<version>.yml`.
    #[must_use]
    pub fn file_name(&self) -> String {
        contract_file_name(&self.name, &self.version)
    }

    /// The first example, used as the canonical success case.
    #[must_use]
    pub fn first_example(&self) -> Option<&ContractExample> {
        self.examples.first()
    }
}

/// Builds the conventional contract file name for a name/version pair.
#[must_use]
pub fn contract_file_name(name: &str, version: &str) -> String {
    format!("{name}.contract.{version}.yml")
}

/// A declared error of a seam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    /// Machine code, e.g. `USER_NOT_FOUND`.
    pub code: String,
    /// Type name, e.g. `UserNotFoundError`.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether callers may retry.
    #[serde(default)]
    pub retryable: bool,
    /// HTTP status the error maps to, when the seam is exposed over HTTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
}

impl ErrorDescriptor {
    /// Creates a non-retryable error descriptor.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: description.into(),
            retryable: false,
            http_status: None,
        }
    }

    /// Marks the error as retryable.
    #[must_use]
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

/// An example input and its expected output.
///
/// The legacy `in`/`out` keys are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractExample {
    /// Example name.
    #[serde(default)]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input object.
    #[serde(alias = "in", default = "empty_object")]
    pub input: serde_json::Value,
    /// Expected output object.
    #[serde(alias = "out", default = "empty_object")]
    pub output: serde_json::Value,
}

impl ContractExample {
    /// Creates an example.
    #[must_use]
    pub fn new(name: impl Into<String>, input: serde_json::Value, output: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            input,
            output,
        }
    }
}

/// An example failure case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorExample {
    /// Example name.
    #[serde(default)]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input object.
    #[serde(default = "empty_object")]
    pub input: serde_json::Value,
    /// Failure output, conventionally `{ ok: false, errors: [...] }`.
    #[serde(default = "empty_object")]
    pub output: serde_json::Value,
}

impl ErrorExample {
    /// Error codes listed in the example output.
    #[must_use]
    pub fn error_codes(&self) -> Vec<&str> {
        self.output
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("code").and_then(serde_json::Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// How strongly a seam depends on another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Must be present at runtime.
    #[default]
    Required,
    /// Used when available.
    Optional,
    /// Development-time only.
    Dev,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Optional => write!(f, "optional"),
            Self::Dev => write!(f, "dev"),
        }
    }
}

/// A dependency on another seam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name of the seam depended on.
    pub seam: String,
    /// Required version tag.
    #[serde(deserialize_with = "string_or_number")]
    pub version: String,
    /// Dependency kind.
    #[serde(rename = "type", default)]
    pub kind: DependencyKind,
}

impl Dependency {
    /// Creates a required dependency.
    #[must_use]
    pub fn new(seam: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            seam: seam.into(),
            version: version.into(),
            kind: DependencyKind::Required,
        }
    }
}

/// Stability of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// May change without notice.
    Experimental,
    /// Changes follow versioning rules.
    Stable,
    /// Scheduled for removal.
    Deprecated,
}

/// Authoring metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMetadata {
    /// Tool or person that produced the contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Stability level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

// YAML authors write `version: 1` as often as `version: v1`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contract_minimal_json() {
        let contract: Contract = serde_json::from_value(serde_json::json!({
            "name": "UserSeam",
            "version": "v1",
            "category": "api",
            "description": "User management seam"
        }))
        .unwrap();
        assert_eq!(contract.name, "UserSeam");
        assert_eq!(contract.category, SeamCategory::Api);
        assert!(contract.examples.is_empty());
        assert_eq!(contract.inputs, serde_json::json!({}));
        assert!(contract.dependencies.is_empty());
    }

    #[test]
    fn test_numeric_version_accepted() {
        let contract: Contract = serde_json::from_value(serde_json::json!({
            "name": "Calc",
            "version": 2,
            "category": "computation"
        }))
        .unwrap();
        assert_eq!(contract.version, "2");
        assert_eq!(contract.file_name(), "Calc.contract.2.yml");
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result: Result<Contract, _> = serde_json::from_value(serde_json::json!({
            "name": "X",
            "version": "v1",
            "category": "spaceship"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_example_legacy_aliases() {
        let example: ContractExample = serde_json::from_value(serde_json::json!({
            "name": "legacy",
            "in": {"a": 1},
            "out": {"ok": true}
        }))
        .unwrap();
        assert_eq!(example.input, serde_json::json!({"a": 1}));
        assert_eq!(example.output, serde_json::json!({"ok": true}));
    }

    #[test]
    fn test_dependency_kind_defaults_to_required() {
        let dep: Dependency =
            serde_json::from_value(serde_json::json!({"seam": "AuthSeam", "version": "v2"})).unwrap();
        assert_eq!(dep.kind, DependencyKind::Required);
        assert_eq!(dep.kind.to_string(), "required");
    }

    #[test]
    fn test_error_example_codes() {
        let example = ErrorExample {
            name: "missing".into(),
            description: None,
            input: serde_json::json!({}),
            output: serde_json::json!({"ok": false, "errors": [{"code": "A"}, {"code": "B"}]}),
        };
        assert_eq!(example.error_codes(), vec!["A", "B"]);
    }

    #[test]
    fn test_optional_sections_skipped_when_serializing() {
        let contract = Contract::new("S", "v1", SeamCategory::Ui, "d");
        let json = serde_json::to_value(&contract).unwrap();
        assert!(json.get("errorExamples").is_none());
        assert!(json.get("dependencies").is_none());
        assert!(json.get("metadata").is_none());
        assert_eq!(json["category"], "ui");
    }
}
