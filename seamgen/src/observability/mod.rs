//! Observability utilities.

mod spans;

pub use spans::{GenerationSpanAttributes, SpanTimer};
