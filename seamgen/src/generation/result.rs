//! Generation results.

use std::collections::BTreeMap;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use super::request::Operation;

/// Kind of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// TypeScript source.
    Typescript,
    /// Markdown documentation.
    Markdown,
    /// Test scaffold.
    Test,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl FileType {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typescript => "typescript",
            Self::Markdown => "markdown",
            Self::Test => "test",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered file. The caller decides whether to persist it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Proposed output path.
    pub path: String,
    /// File content.
    pub content: String,
    /// File kind.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Content length in bytes.
    pub size: usize,
    /// Number of `\n`-separated segments.
    pub lines: usize,
    /// Hex MD5 of the content.
    pub checksum: String,
}

impl GeneratedFile {
    /// Creates a file, deriving size, line count and checksum from `content`.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>, file_type: FileType) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            size: content.len(),
            lines: content.split('\n').count(),
            checksum: checksum(&content),
            content,
            file_type,
        }
    }

    /// Returns the file with `prefix` prepended to its path.
    #[must_use]
    pub fn with_path_prefix(mut self, prefix: &str) -> Self {
        self.path = format!("{prefix}{}", self.path);
        self
    }
}

/// Hex MD5 digest of `content`.
#[must_use]
pub fn checksum(content: &str) -> String {
    hex::encode(Md5::digest(content.as_bytes()))
}

/// A non-fatal problem noticed while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationWarning {
    /// Warning category, e.g. `unresolved_placeholder`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Line the warning refers to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl GenerationWarning {
    /// Creates a warning without a line number.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            line: None,
        }
    }
}

/// Metadata about how a result was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    /// Template path, or `multiple` for `generate_all`.
    pub template_used: String,
    /// ISO timestamp of completion.
    pub generated_at: String,
    /// Wall-clock duration in milliseconds.
    pub duration: u64,
    /// SHA-256 of the contract's canonical JSON.
    pub contract_hash: String,
    /// Generator version from configuration.
    pub generator_version: String,
    /// Non-fatal problems.
    pub warnings: Vec<GenerationWarning>,
}

/// A TypeScript compile diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileDiagnostic {
    /// File the diagnostic refers to.
    pub file: String,
    /// Line number.
    pub line: usize,
    /// Diagnostic text.
    pub message: String,
}

/// A lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity, e.g. `warning`.
    pub severity: String,
    /// Rule identifier.
    pub rule: String,
    /// Finding text.
    pub message: String,
}

/// TypeScript compile status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypescriptCheck {
    /// Whether the output compiles.
    pub compiles: bool,
    /// Compile diagnostics.
    pub errors: Vec<CompileDiagnostic>,
}

/// Lint status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintCheck {
    /// Score out of 100.
    pub score: f64,
    /// Findings.
    pub issues: Vec<LintIssue>,
}

/// Validation summary attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// TypeScript compile status.
    pub typescript: TypescriptCheck,
    /// Lint status.
    pub linting: LintCheck,
}

/// Fixed lint score reported for every result.
pub const LINT_SCORE: f64 = 100.0;

impl ValidationSummary {
    /// The summary attached to every result.
    ///
    /// Generated output is not compiled or linted: this always reports
    /// `compiles = true` and a score of [`LINT_SCORE`] with no findings.
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            typescript: TypescriptCheck {
                compiles: true,
                errors: Vec::new(),
            },
            linting: LintCheck {
                score: LINT_SCORE,
                issues: Vec::new(),
            },
        }
    }
}

impl Default for ValidationSummary {
    fn default() -> Self {
        Self::unchecked()
    }
}

/// Complexity score for an operation.
///
/// A fixed value per operation, not an analysis of the output: `1.0` for
/// single-file operations, `2.0` for `generate_all`, `0.0` for
/// `validate_template`.
#[must_use]
pub fn complexity_score(operation: Operation) -> f64 {
    match operation {
        Operation::GenerateAll => 2.0,
        Operation::ValidateTemplate => 0.0,
        Operation::GenerateStub
        | Operation::GenerateBlueprint
        | Operation::GenerateTest
        | Operation::Preview => 1.0,
    }
}

/// Aggregate counts over a result's files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatistics {
    /// Number of files.
    pub total_files: usize,
    /// Sum of line counts.
    pub total_lines: usize,
    /// Sum of sizes in bytes.
    pub total_size: usize,
    /// File count per type.
    pub files_by_type: BTreeMap<FileType, usize>,
    /// See [`complexity_score`].
    pub complexity_score: f64,
}

impl GenerationStatistics {
    /// Computes statistics for `files` produced by `operation`.
    #[must_use]
    pub fn from_files(files: &[GeneratedFile], operation: Operation) -> Self {
        let mut files_by_type = BTreeMap::new();
        for file in files {
            *files_by_type.entry(file.file_type).or_insert(0) += 1;
        }
        Self {
            total_files: files.len(),
            total_lines: files.iter().map(|f| f.lines).sum(),
            total_size: files.iter().map(|f| f.size).sum(),
            files_by_type,
            complexity_score: complexity_score(operation),
        }
    }
}

/// Successful output of [`Generator::process`](super::Generator::process).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Generated files, in order.
    pub files: Vec<GeneratedFile>,
    /// How the result was produced.
    pub generation: GenerationMetadata,
    /// Validation summary.
    pub validation: ValidationSummary,
    /// Aggregate counts.
    pub statistics: GenerationStatistics,
}
