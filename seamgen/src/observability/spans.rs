//! Tracing integration for generation requests.
//!
//! Each request runs inside an `info` span carrying the operation and the
//! seam it targets, so subscriber output can be filtered per seam.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::Span;

/// Span attributes for one generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSpanAttributes {
    /// Requested operation.
    pub operation: String,
    /// Seam name from the contract.
    pub seam_name: Option<String>,
    /// Seam version from the contract.
    pub seam_version: Option<String>,
    /// Stub template type.
    pub template_type: Option<String>,
}

impl GenerationSpanAttributes {
    /// Creates attributes for an operation.
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Default::default()
        }
    }

    /// Sets the seam name and version.
    #[must_use]
    pub fn with_seam(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.seam_name = Some(name.into());
        self.seam_version = Some(version.into());
        self
    }

    /// Sets the template type.
    #[must_use]
    pub fn with_template_type(mut self, template_type: impl Into<String>) -> Self {
        self.template_type = Some(template_type.into());
        self
    }

    /// Converts to flat `key -> value` attributes.
    #[must_use]
    pub fn to_otel_attributes(&self) -> HashMap<String, String> {
        let mut attrs = HashMap::new();

        attrs.insert("generation.operation".to_string(), self.operation.clone());

        if let Some(ref v) = self.seam_name {
            attrs.insert("seam.name".to_string(), v.clone());
        }
        if let Some(ref v) = self.seam_version {
            attrs.insert("seam.version".to_string(), v.clone());
        }
        if let Some(ref v) = self.template_type {
            attrs.insert("generation.template_type".to_string(), v.clone());
        }

        attrs
    }

    /// Opens an `info` span carrying these attributes.
    #[must_use]
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "seam_generation",
            operation = %self.operation,
            seam = self.seam_name.as_deref().unwrap_or(""),
            version = self.seam_version.as_deref().unwrap_or(""),
            template_type = self.template_type.as_deref().unwrap_or(""),
        )
    }
}

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
    name: String,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finishes the span and returns the duration in whole milliseconds.
    #[must_use]
    pub fn finish(self) -> u64 {
        self.start.elapsed().as_millis().try_into().unwrap_or(u64::MAX)
    }
}
