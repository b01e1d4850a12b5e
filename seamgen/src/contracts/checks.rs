//! Structural checks shared by the loader and the validator.

use serde_json::Value;

/// Returns every required-field violation found in a parsed contract document.
///
/// Messages carry no file prefix; the validator adds one.
pub(crate) fn document_violations(document: &Value) -> Vec<String> {
    let Some(map) = document.as_object() else {
        return vec!["Contract document must be a mapping".to_string()];
    };

    let mut violations = Vec::new();
    if !is_present(map.get("name")) {
        violations.push("Missing 'name' field".to_string());
    }
    if !is_present(map.get("version")) {
        violations.push("Missing 'version' field".to_string());
    }

    match map.get("examples").and_then(Value::as_array) {
        None => violations.push("Missing 'examples' array".to_string()),
        Some(examples) if examples.is_empty() => {
            violations.push("Must have at least one example".to_string());
        }
        Some(examples) => {
            for (idx, example) in examples.iter().enumerate() {
                let number = idx + 1;
                if !has_object(example, "input", "in") {
                    violations.push(format!("Example {number} missing 'input' object"));
                }
                if !has_object(example, "output", "out") {
                    violations.push(format!("Example {number} missing 'output' object"));
                }
            }
        }
    }

    violations
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn has_object(example: &Value, key: &str, legacy_key: &str) -> bool {
    example
        .get(key)
        .or_else(|| example.get(legacy_key))
        .is_some_and(Value::is_object)
}
