//! Generator configuration.
//!
//! A [`GeneratorConfig`] is built once by the caller and handed to
//! [`Generator::new`](crate::generation::Generator::new). Every field has a
//! default so a partial YAML file is enough.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::template::UnknownPlaceholder;

/// Directories, defaults and rendering policy for a [`Generator`](crate::generation::Generator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding template files.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    /// Directory generated stubs are proposed under.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Directory generated blueprints are proposed under.
    #[serde(default = "default_blueprints_dir")]
    pub blueprints_dir: String,
    /// Directory generated tests are proposed under.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: String,
    /// Directory contract files live in.
    #[serde(default = "default_contracts_dir")]
    pub contracts_dir: String,
    /// Version stamped into generated files and result metadata.
    #[serde(default = "default_generator_version")]
    pub generator_version: String,
    /// Author used when a request does not set one.
    #[serde(default = "default_author")]
    pub default_author: String,
    /// License used when a request does not set one.
    #[serde(default = "default_license")]
    pub default_license: String,
    /// What to emit for placeholders with no value.
    #[serde(default)]
    pub unknown_placeholder: UnknownPlaceholder,
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_output_dir() -> String {
    "src/generated".to_string()
}

fn default_blueprints_dir() -> String {
    "blueprints".to_string()
}

fn default_tests_dir() -> String {
    "tests".to_string()
}

fn default_contracts_dir() -> String {
    "contracts".to_string()
}

fn default_generator_version() -> String {
    "1.0.0".to_string()
}

fn default_author() -> String {
    "SDD Generator".to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            blueprints_dir: default_blueprints_dir(),
            tests_dir: default_tests_dir(),
            contracts_dir: default_contracts_dir(),
            generator_version: default_generator_version(),
            default_author: default_author(),
            default_license: default_license(),
            unknown_placeholder: UnknownPlaceholder::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid config document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config document.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Sets the templates directory.
    #[must_use]
    pub fn with_templates_dir(mut self, dir: impl Into<String>) -> Self {
        self.templates_dir = dir.into();
        self
    }

    /// Sets the stub output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the blueprint directory.
    #[must_use]
    pub fn with_blueprints_dir(mut self, dir: impl Into<String>) -> Self {
        self.blueprints_dir = dir.into();
        self
    }

    /// Sets the test directory.
    #[must_use]
    pub fn with_tests_dir(mut self, dir: impl Into<String>) -> Self {
        self.tests_dir = dir.into();
        self
    }

    /// Sets the contracts directory.
    #[must_use]
    pub fn with_contracts_dir(mut self, dir: impl Into<String>) -> Self {
        self.contracts_dir = dir.into();
        self
    }

    /// Sets the generator version.
    #[must_use]
    pub fn with_generator_version(mut self, version: impl Into<String>) -> Self {
        self.generator_version = version.into();
        self
    }

    /// Sets the unknown-placeholder policy.
    #[must_use]
    pub fn with_unknown_placeholder(mut self, policy: UnknownPlaceholder) -> Self {
        self.unknown_placeholder = policy;
        self
    }

    /// Path a contract with this file name is expected at.
    #[must_use]
    pub fn contract_path(&self, file_name: &str) -> String {
        join(&self.contracts_dir, file_name)
    }

    /// Proposed path of a generated stub.
    #[must_use]
    pub fn stub_path(&self, seam_name: &str) -> String {
        join(&self.output_dir, &format!("{seam_name}.ts"))
    }

    /// Proposed path of a generated blueprint.
    #[must_use]
    pub fn blueprint_path(&self, seam_name: &str) -> String {
        join(&self.blueprints_dir, &format!("{seam_name}.md"))
    }

    /// Proposed path of a generated test scaffold.
    #[must_use]
    pub fn test_path(&self, seam_name: &str) -> String {
        join(&self.tests_dir, &format!("{seam_name}.spec.ts"))
    }
}

fn join(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}
