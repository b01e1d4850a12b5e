//! Template rendering.

use serde::{Deserialize, Serialize};

use super::blocks::BlockRegistry;
use super::data::{display_value, TemplateData};
use super::syntax::{parse, Segment};

/// What to emit for a scalar placeholder with no value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPlaceholder {
    /// Replace with the empty string.
    #[default]
    Empty,
    /// Leave the `{{key}}` marker visible.
    Keep,
}

/// Rendered text plus what the renderer could not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Final text.
    pub content: String,
    /// Scalar placeholders with no value, deduplicated, in order of first use.
    pub unresolved: Vec<String>,
    /// Blocks that were dropped because nothing rendered them.
    pub removed_blocks: Vec<String>,
}

/// Substitutes template data into templates.
///
/// Rendering is a single pass over the parsed template: registered blocks
/// are replaced by their renderer's output, other blocks are kept (body
/// rendered) only when the data holds `true` under their name and removed
/// otherwise, and scalars are replaced by the string form of their value.
/// Substituted text is never re-scanned for markers.
#[derive(Debug)]
pub struct TemplateRenderer {
    blocks: BlockRegistry,
    unknown: UnknownPlaceholder,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(BlockRegistry::builtin(), UnknownPlaceholder::default())
    }
}

impl TemplateRenderer {
    /// Creates a renderer with the given blocks and unknown-placeholder policy.
    #[must_use]
    pub fn new(blocks: BlockRegistry, unknown: UnknownPlaceholder) -> Self {
        Self { blocks, unknown }
    }

    /// Returns the block registry.
    #[must_use]
    pub fn blocks(&self) -> &BlockRegistry {
        &self.blocks
    }

    /// Returns the unknown-placeholder policy.
    #[must_use]
    pub fn unknown_placeholder(&self) -> UnknownPlaceholder {
        self.unknown
    }

    /// Renders `source` against `data`.
    #[must_use]
    pub fn render(&self, source: &str, data: &TemplateData) -> RenderOutput {
        let segments = parse(source);
        let mut output = RenderOutput::default();
        self.render_segments(&segments, data, &mut output);
        output
    }

    fn render_segments(&self, segments: &[Segment], data: &TemplateData, out: &mut RenderOutput) {
        for segment in segments {
            match segment {
                Segment::Text(text) => out.content.push_str(text),
                Segment::Scalar(key) => match data.lookup(key) {
                    Some(value) => out.content.push_str(&display_value(value)),
                    None => {
                        if !out.unresolved.iter().any(|k| k == key) {
                            out.unresolved.push(key.clone());
                        }
                        if self.unknown == UnknownPlaceholder::Keep {
                            out.content.push_str("{{");
                            out.content.push_str(key);
                            out.content.push_str("}}");
                        }
                    }
                },
                Segment::Block { name, body } => {
                    if let Some(rendered) = self.blocks.render(name, data) {
                        out.content.push_str(&rendered);
                    } else if data.is_enabled(name) {
                        self.render_segments(body, data, out);
                    } else if !out.removed_blocks.iter().any(|b| b == name) {
                        out.removed_blocks.push(name.clone());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::default()
    }

    #[test]
    fn test_scalar_substitution() {
        let data = TemplateData::new().with("seamName", "UserSeam").with("count", 3);
        let out = renderer().render("// {{seamName}} has {{count}} examples", &data);
        assert_eq!(out.content, "// UserSeam has 3 examples");
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn test_unknown_placeholder_defaults_to_empty() {
        let out = renderer().render("[{{missing}}][{{missing}}]", &TemplateData::new());
        assert_eq!(out.content, "[][]");
        assert_eq!(out.unresolved, vec!["missing"]);
    }

    #[test]
    fn test_unknown_placeholder_can_stay_visible() {
        let renderer = TemplateRenderer::new(BlockRegistry::new(), UnknownPlaceholder::Keep);
        let out = renderer.render("a {{ missing }} b", &TemplateData::new());
        assert_eq!(out.content, "a {{missing}} b");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let data = TemplateData::new()
            .with("description", "uses {{secret}} and {{#inputProperties}}x{{/inputProperties}}")
            .with("secret", "LEAKED");
        let out = renderer().render("{{description}}", &data);
        assert_eq!(
            out.content,
            "uses {{secret}} and {{#inputProperties}}x{{/inputProperties}}"
        );
    }

    #[test]
    fn test_self_referencing_value_terminates() {
        let data = TemplateData::new().with("loop", "{{loop}}{{loop}}");
        assert_eq!(renderer().render("{{loop}}", &data).content, "{{loop}}{{loop}}");
    }

    #[test]
    fn test_unsupported_block_is_removed() {
        let out = renderer().render(
            "a{{#imports}}import x from 'y';{{/imports}}b",
            &TemplateData::new(),
        );
        assert_eq!(out.content, "ab");
        assert_eq!(out.removed_blocks, vec!["imports"]);
    }

    #[test]
    fn test_enabled_section_renders_body() {
        let data = TemplateData::new()
            .with("includeComments", true)
            .with("includeExamples", false)
            .with("name", "X");
        let out = renderer().render(
            "{{#includeComments}}// {{name}}\n{{/includeComments}}{{#includeExamples}}ex{{/includeExamples}}code",
            &data,
        );
        assert_eq!(out.content, "// X\ncode");
        assert_eq!(out.removed_blocks, vec!["includeExamples"]);
    }

    #[test]
    fn test_registered_block_replaces_span() {
        let data = TemplateData::new().with("seamName", "S");
        let out = renderer().render("x{{#inputProperties}}ignored {{y}}{{/inputProperties}}z", &data);
        assert_eq!(
            out.content,
            "x\nexport type SInput = Record<string, unknown>;\nz"
        );
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn test_registered_block_output_is_not_rescanned() {
        let data = TemplateData::new()
            .with("seamName", "S")
            .with("inputs", json!({"request": {"properties": {"a": {"type": "string", "description": "see {{seamName}}"}}}}))
            .with("includeComments", true);
        let out = renderer().render("{{#inputProperties}}{{/inputProperties}}", &data);
        assert!(out.content.contains("/** see {{seamName}} */"));
    }

    #[test]
    fn test_custom_block_registration() {
        let renderer = renderer();
        renderer
            .blocks()
            .register("banner", |data: &TemplateData| format!("== {} ==", data.get_str("seamName").unwrap_or_default()));
        let data = TemplateData::new().with("seamName", "S");
        assert_eq!(renderer.render("{{#banner}}{{/banner}}", &data).content, "== S ==");
    }
}
