//! Templates and rendering.
//!
//! This module provides:
//! - Template storage (filesystem and in-memory)
//! - Template syntax parsing
//! - The block renderer registry and built-in TypeScript blocks
//! - The single-pass template renderer

pub mod blocks;
mod data;
mod renderer;
mod store;
pub mod syntax;
mod typescript;

pub use blocks::{BlockRegistry, BlockRenderer};
pub use data::{display_value, TemplateData};
pub use renderer::{RenderOutput, TemplateRenderer, UnknownPlaceholder};
pub use store::{
    stub_template_name, FsTemplateStore, MemoryTemplateStore, Template, TemplateStore,
    BLUEPRINT_TEMPLATE, TEST_TEMPLATE,
};
pub use typescript::typescript_type;
