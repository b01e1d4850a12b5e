//! Template data assembly.
//!
//! Layers are merged in a fixed order, later keys winning: defaults, then
//! contract-derived values, then options the request set explicitly, then
//! custom variables. Comment-safe copies of free text are derived from the
//! merged result.

use serde_json::{json, Value};

use crate::config::GeneratorConfig;
use crate::template::TemplateData;

use super::request::GenerationRequest;

/// Builds the data a request's templates are rendered against.
///
/// `timestamp` is the ISO time shared by every file of the request.
///
/// # Errors
///
/// Returns an error if a contract field cannot be converted to JSON.
pub fn build_template_data(
    request: &GenerationRequest,
    config: &GeneratorConfig,
    timestamp: &str,
) -> Result<TemplateData, serde_json::Error> {
    let mut data = defaults(config);
    data.merge(contract_layer(request, config, timestamp)?);
    data.merge(option_layer(request));
    data.merge(request.custom_variables.clone());
    let comments = comment_layer(&data);
    data.merge(comments);
    Ok(data)
}

/// Keys whose values are also offered as `<key>Comment`, safe inside `/* */`.
pub const COMMENT_SAFE_KEYS: [&str; 3] =
    ["description", "successExampleInput", "successExampleOutput"];

/// Escapes `*/` so `text` cannot close a block comment.
#[must_use]
pub fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

fn comment_layer(data: &TemplateData) -> Vec<(String, Value)> {
    COMMENT_SAFE_KEYS
        .iter()
        .filter_map(|key| {
            let text = data.get_str(key)?;
            Some((format!("{key}Comment"), json!(comment_safe(text))))
        })
        .collect()
}

fn defaults(config: &GeneratorConfig) -> TemplateData {
    TemplateData::new()
        .with("generatorVersion", config.generator_version.as_str())
        .with("author", config.default_author.as_str())
        .with("license", config.default_license.as_str())
        .with("includeComments", true)
        .with("includeExamples", true)
        .with("strictTypes", true)
        .with("dependencies", json!([]))
}

fn contract_layer(
    request: &GenerationRequest,
    config: &GeneratorConfig,
    timestamp: &str,
) -> Result<Vec<(&'static str, Value)>, serde_json::Error> {
    let contract = &request.contract;
    // Without an example the example sections are switched off, and the
    // placeholders still hold valid JSON if an option switches them back on.
    let (example_input, example_output) = match contract.first_example() {
        Some(example) if request.options.include_examples() => (
            serde_json::to_string_pretty(&example.input)?,
            serde_json::to_string_pretty(&example.output)?,
        ),
        Some(_) => (String::new(), String::new()),
        None => ("{}".to_string(), "{}".to_string()),
    };

    let mut layer = vec![
        ("seamName", json!(contract.name)),
        ("version", json!(contract.version)),
        ("category", json!(contract.category.as_str())),
        ("description", json!(contract.description)),
        ("timestamp", json!(timestamp)),
        ("contractFile", json!(config.contract_path(&contract.file_name()))),
        ("inputs", contract.inputs.clone()),
        ("outputs", contract.outputs.clone()),
        ("errors", serde_json::to_value(&contract.errors)?),
        ("examples", serde_json::to_value(&contract.examples)?),
        ("errorExamples", serde_json::to_value(&contract.error_examples)?),
        ("dependencies", serde_json::to_value(&contract.dependencies)?),
        ("successExampleInput", json!(example_input)),
        ("successExampleOutput", json!(example_output)),
    ];
    if contract.first_example().is_none() {
        layer.push(("includeExamples", json!(false)));
    }
    Ok(layer)
}

fn option_layer(request: &GenerationRequest) -> Vec<(&'static str, Value)> {
    let options = &request.options;
    let mut layer = Vec::new();
    if let Some(v) = options.include_comments {
        layer.push(("includeComments", json!(v)));
    }
    if let Some(v) = options.include_examples {
        layer.push(("includeExamples", json!(v)));
    }
    if let Some(v) = options.strict_types {
        layer.push(("strictTypes", json!(v)));
    }
    if let Some(ref v) = options.author {
        layer.push(("author", json!(v)));
    }
    if let Some(ref v) = options.license {
        layer.push(("license", json!(v)));
    }
    if let Some(ref v) = options.generator_version {
        layer.push(("generatorVersion", json!(v)));
    }
    layer
}
