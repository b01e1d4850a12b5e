//! Directory-wide contract validation.
//!
//! Every contract file in a directory is checked and all violations are
//! aggregated into a single report, so one run surfaces every problem.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::checks::document_violations;
use super::loader::parse_document;
use crate::errors::ContractError;

/// Outcome of validating a contracts directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no violations were found.
    pub pass: bool,
    /// `<file>: <violation>` messages, grouped by file in name order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// A passing report with no errors.
    #[must_use]
    pub fn passing() -> Self {
        Self {
            pass: true,
            errors: Vec::new(),
        }
    }

    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            pass: errors.is_empty(),
            errors,
        }
    }
}

/// Validates every `*.yml`/`*.yaml` contract in `dir`.
///
/// A missing or empty directory passes.
pub fn validate_contracts(dir: impl AsRef<Path>) -> ValidationReport {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "No contracts directory; nothing to validate");
            return ValidationReport::passing();
        }
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "Unable to read contracts directory");
            return ValidationReport::from_errors(vec![format!(
                "{}: Unable to read directory - {err}",
                dir.display()
            )]);
        }
    };

    let mut files: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_contract_file(path))
        .collect();
    files.sort();

    let mut errors = Vec::new();
    for path in &files {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        for violation in file_violations(path) {
            errors.push(format!("{file}: {violation}"));
        }
    }

    info!(
        dir = %dir.display(),
        files = files.len(),
        violations = errors.len(),
        "Validated contracts"
    );
    ValidationReport::from_errors(errors)
}

fn is_contract_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml" | "yaml")
    )
}

fn file_violations(path: &Path) -> Vec<String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return vec![format!("Read error - {err}")],
    };
    match parse_document(&text) {
        Ok(document) => document_violations(&document),
        Err(ContractError::Parse(message)) => vec![format!("YAML parse error - {message}")],
        Err(other) => vec![other.to_string()],
    }
}
