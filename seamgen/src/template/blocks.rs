//! Registry of block renderers.
//!
//! A block `{{#name}}...{{/name}}` whose name is registered is replaced by
//! the output of its renderer. New block kinds are added by registration.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::data::TemplateData;
use super::typescript;

/// Renders a block from template data.
pub type BlockRenderer = Arc<dyn Fn(&TemplateData) -> String + Send + Sync>;

/// Name of the block that renders the input interface.
pub const INPUT_PROPERTIES: &str = "inputProperties";
/// Name of the block that renders the output interface.
pub const OUTPUT_PROPERTIES: &str = "outputProperties";
/// Name of the block that renders error classes.
pub const ERROR_TYPES: &str = "errorTypes";
/// Name of the block that renders dependency comments.
pub const DEPENDENCIES: &str = "dependencies";

/// Registry mapping block names to renderers.
#[derive(Default)]
pub struct BlockRegistry {
    renderers: RwLock<HashMap<String, BlockRenderer>>,
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("blocks", &self.names())
            .finish()
    }
}

impl BlockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in TypeScript blocks.
    #[must_use]
    pub fn builtin() -> Self {
        let registry = Self::new();
        registry.register(INPUT_PROPERTIES, typescript::render_input_properties);
        registry.register(OUTPUT_PROPERTIES, typescript::render_output_properties);
        registry.register(ERROR_TYPES, typescript::render_error_types);
        registry.register(DEPENDENCIES, typescript::render_dependencies);
        registry
    }

    /// Registers (or replaces) the renderer for `name`.
    pub fn register<F>(&self, name: impl Into<String>, renderer: F)
    where
        F: Fn(&TemplateData) -> String + Send + Sync + 'static,
    {
        self.renderers.write().insert(name.into(), Arc::new(renderer));
    }

    /// Removes the renderer for `name`, returning whether one existed.
    pub fn unregister(&self, name: &str) -> bool {
        self.renderers.write().remove(name).is_some()
    }

    /// True when `name` has a renderer.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.read().contains_key(name)
    }

    /// Renders `name`, or returns `None` when it is not registered.
    #[must_use]
    pub fn render(&self, name: &str, data: &TemplateData) -> Option<String> {
        // Clone the handle so the lock is not held while rendering.
        let renderer = self.renderers.read().get(name).cloned()?;
        Some(renderer(data))
    }

    /// Registered block names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.renderers.read().keys().cloned().collect();
        names.sort();
        names
    }
}
