//! Mock template stores for testing.

use std::collections::HashMap;
use std::io;

use parking_lot::Mutex;

use crate::errors::TemplateError;
use crate::template::{Template, TemplateStore};

/// A store that delegates to an inner store and records every load.
pub struct RecordingTemplateStore<S> {
    inner: S,
    loads: Mutex<HashMap<String, usize>>,
}

impl<S: TemplateStore> RecordingTemplateStore<S> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            loads: Mutex::new(HashMap::new()),
        }
    }

    /// Number of times `name` was loaded.
    #[must_use]
    pub fn load_count(&self, name: &str) -> usize {
        self.loads.lock().get(name).copied().unwrap_or(0)
    }

    /// Total number of loads.
    #[must_use]
    pub fn total_loads(&self) -> usize {
        self.loads.lock().values().sum()
    }

    /// Resets load tracking.
    pub fn reset(&self) {
        self.loads.lock().clear();
    }
}

impl<S: TemplateStore> TemplateStore for RecordingTemplateStore<S> {
    fn resolve(&self, name: &str) -> String {
        self.inner.resolve(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.inner.exists(name)
    }

    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        *self.loads.lock().entry(name.to_string()).or_insert(0) += 1;
        self.inner.load(name)
    }
}

/// A store whose templates all exist but can never be read.
#[derive(Debug, Clone, Default)]
pub struct FailingTemplateStore {
    message: String,
}

impl FailingTemplateStore {
    /// Creates a store failing with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TemplateStore for FailingTemplateStore {
    fn resolve(&self, name: &str) -> String {
        format!("failing/{name}")
    }

    fn exists(&self, _name: &str) -> bool {
        true
    }

    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        Err(TemplateError::Io {
            path: self.resolve(name),
            source: io::Error::new(io::ErrorKind::PermissionDenied, self.message.clone()),
        })
    }
}
