//! Built-in block renderers that emit TypeScript declarations.
//!
//! Each renderer reads only from [`TemplateData`]: `seamName`, `inputs`,
//! `outputs`, `errors`, `dependencies`, `includeComments` and `strictTypes`.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde_json::Value;

use super::data::TemplateData;

/// Maps a schema property to a TypeScript type expression.
///
/// Unknown or missing types map to `unknown`, or `any` when `strict` is off.
#[must_use]
pub fn typescript_type(property: &Value, strict: bool) -> String {
    let declared = property.get("type").and_then(Value::as_str);
    match declared {
        Some("object") => return "Record<string, unknown>".to_string(),
        Some("array") => return "unknown[]".to_string(),
        _ => {}
    }
    if let Some(variants) = property.get("enum").and_then(Value::as_array) {
        if !variants.is_empty() {
            return variants
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(" | ");
        }
    }
    match declared {
        Some("string") => "string".to_string(),
        Some("number" | "integer") => "number".to_string(),
        Some("boolean") => "boolean".to_string(),
        _ if strict => "unknown".to_string(),
        _ => "any".to_string(),
    }
}

/// `export interface <Seam>Input` from `inputs.request`.
#[must_use]
pub fn render_input_properties(data: &TemplateData) -> String {
    let schema = data.lookup("inputs.request");
    render_interface(&format!("{}Input", seam_name(data)), schema, true, data)
}

/// `export interface <Seam>Output` from `outputs.success`.
///
/// Prefers the `data` envelope property when the success schema has one.
/// Every output property is optional.
#[must_use]
pub fn render_output_properties(data: &TemplateData) -> String {
    let success = data.lookup("outputs.success");
    let schema = success
        .and_then(|s| s.get("properties"))
        .and_then(|p| p.get("data"))
        .filter(|d| d.get("properties").is_some())
        .or(success);
    render_interface(&format!("{}Output", seam_name(data)), schema, false, data)
}

/// One `Error` subclass per declared contract error.
#[must_use]
pub fn render_error_types(data: &TemplateData) -> String {
    let Some(errors) = data.lookup("errors").and_then(Value::as_array) else {
        return String::new();
    };
    let comments = data.flag("includeComments", true);

    let mut out = String::new();
    for error in errors {
        let Some(code) = error.get("code").and_then(Value::as_str) else {
            continue;
        };
        let class = error_class_name(error.get("name").and_then(Value::as_str).unwrap_or(code));
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let retryable = error
            .get("retryable")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        out.push('\n');
        if comments && !description.is_empty() {
            let _ = writeln!(out, "/** {} */", comment_text(description));
        }
        let _ = writeln!(out, "export class {class} extends Error {{");
        let _ = writeln!(out, "  readonly code = {};", Value::from(code));
        let _ = writeln!(out, "  readonly retryable = {retryable};");
        out.push('\n');
        let _ = writeln!(
            out,
            "  constructor(message = {}) {{",
            Value::from(description)
        );
        out.push_str("    super(message);\n");
        let _ = writeln!(out, "    this.name = {};", Value::from(class.as_str()));
        out.push_str("  }\n}\n");
    }
    out
}

/// A comment line per declared dependency.
#[must_use]
pub fn render_dependencies(data: &TemplateData) -> String {
    let Some(dependencies) = data.lookup("dependencies").and_then(Value::as_array) else {
        return String::new();
    };

    let mut out = String::new();
    for dep in dependencies {
        let Some(seam) = dep.get("seam").and_then(Value::as_str) else {
            continue;
        };
        let version = dep.get("version").map(super::data::display_value).unwrap_or_default();
        let kind = dep.get("type").and_then(Value::as_str).unwrap_or("required");
        let _ = writeln!(out, "// depends on {seam}@{version} ({kind})");
    }
    out
}

fn render_interface(
    type_name: &str,
    schema: Option<&Value>,
    honor_required: bool,
    data: &TemplateData,
) -> String {
    let Some(properties) = schema
        .and_then(|s| s.get("properties"))
        .and_then(Value::as_object)
    else {
        return format!("\nexport type {type_name} = Record<string, unknown>;\n");
    };

    let required: HashSet<&str> = schema
        .and_then(|s| s.get("required"))
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let comments = data.flag("includeComments", true);
    let strict = data.flag("strictTypes", true);

    let mut out = format!("\nexport interface {type_name} {{\n");
    for (name, property) in properties {
        if comments {
            if let Some(description) = property.get("description").and_then(Value::as_str) {
                let _ = writeln!(out, "  /** {} */", comment_text(description));
            }
        }
        let optional = !honor_required || !required.contains(name.as_str());
        let _ = writeln!(
            out,
            "  {}{}: {};",
            property_key(name),
            if optional { "?" } else { "" },
            typescript_type(property, strict)
        );
    }
    out.push_str("}\n");
    out
}

fn seam_name(data: &TemplateData) -> &str {
    data.get_str("seamName").unwrap_or("Seam")
}

fn error_class_name(name: &str) -> String {
    if name.ends_with("Error") {
        name.to_string()
    } else {
        format!("{name}Error")
    }
}

fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        name.to_string()
    } else {
        Value::from(name).to_string()
    }
}

fn comment_text(text: &str) -> String {
    text.replace("*/", "* /").replace('\n', " ")
}
