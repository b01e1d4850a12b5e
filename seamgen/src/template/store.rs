//! Template storage.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::TemplateError;

/// File name of the TypeScript stub template for a template type.
#[must_use]
pub fn stub_template_name(template_type: &str) -> String {
    format!("{template_type}_stub.ts.template")
}

/// File name of the blueprint template.
pub const BLUEPRINT_TEMPLATE: &str = "blueprint.md.template";

/// File name of the test scaffold template.
pub const TEST_TEMPLATE: &str = "test.spec.ts.template";

/// A loaded template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Resolved path the template was read from.
    pub path: String,
    /// Template text.
    pub source: String,
}

/// Read-only source of templates, addressed by file name.
pub trait TemplateStore: Send + Sync {
    /// Resolves a template name to the path reported in results.
    fn resolve(&self, name: &str) -> String;

    /// True when the named template exists.
    fn exists(&self, name: &str) -> bool;

    /// Reads the named template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] when it does not exist and
    /// [`TemplateError::Io`] when it cannot be read.
    fn load(&self, name: &str) -> Result<Template, TemplateError>;
}

/// Templates stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct FsTemplateStore {
    root: PathBuf,
}

impl FsTemplateStore {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for FsTemplateStore {
    fn resolve(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }

    fn exists(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        let path = self.resolve(name);
        debug!(template = %path, "Reading template");
        match fs::read_to_string(self.root.join(name)) {
            Ok(source) => Ok(Template { path, source }),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(TemplateError::NotFound { path }),
            Err(source) => Err(TemplateError::Io { path, source }),
        }
    }
}

/// Templates held in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    prefix: String,
    templates: HashMap<String, String>,
}

impl MemoryTemplateStore {
    /// Creates an empty store whose resolved paths are `templates/<name>`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix("templates")
    }

    /// Creates an empty store with a custom path prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            templates: HashMap::new(),
        }
    }

    /// Creates a store holding the templates bundled with this crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with_template(
                stub_template_name("typescript"),
                include_str!("../../templates/typescript_stub.ts.template"),
            )
            .with_template(
                BLUEPRINT_TEMPLATE,
                include_str!("../../templates/blueprint.md.template"),
            )
            .with_template(
                TEST_TEMPLATE,
                include_str!("../../templates/test.spec.ts.template"),
            )
    }

    /// Adds or replaces a template.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }

    /// Template names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn resolve(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{name}", self.prefix)
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        let path = self.resolve(name);
        match self.templates.get(name) {
            Some(source) => Ok(Template {
                path,
                source: source.clone(),
            }),
            None => Err(TemplateError::NotFound { path }),
        }
    }
}
