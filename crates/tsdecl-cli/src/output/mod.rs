use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Tree => Ok(render_tree(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Indented outline. Declaration trees print one line per declaration;
/// anything else prints as nested `key: value` lines.
fn render_tree(value: &Value) -> String {
    let mut lines = Vec::new();
    match value.as_object() {
        Some(map) if is_declaration(map) => {
            lines.push(declaration_heading(None, map));
            declaration_lines(map, 1, &mut lines);
        }
        _ => value_lines(value, 0, &mut lines),
    }
    if lines.is_empty() {
        return String::from("(empty)");
    }
    lines.join("\n")
}

fn is_declaration(map: &Map<String, Value>) -> bool {
    map.get("kind").is_some_and(Value::is_string) && map.contains_key("children")
}

fn declaration_heading(key: Option<&str>, map: &Map<String, Value>) -> String {
    let kind = map.get("kind").and_then(Value::as_str).unwrap_or("?");
    let name = map.get("name").and_then(Value::as_str);
    let mut heading = match (key, name) {
        (Some(key), _) => format!("{key} [{kind}]"),
        (None, Some(name)) => format!("{name} [{kind}]"),
        (None, None) => format!("[{kind}]"),
    };
    if let Some(syntax) = map.get("syntax").and_then(Value::as_str) {
        heading.push(' ');
        heading.push_str(syntax);
    }
    heading
}

fn declaration_lines(map: &Map<String, Value>, depth: usize, lines: &mut Vec<String>) {
    let Some(children) = map.get("children").and_then(Value::as_object) else {
        return;
    };
    let indent = "  ".repeat(depth);
    for (key, child) in children {
        let Some(child) = child.as_object() else {
            continue;
        };
        lines.push(format!("{indent}{}", declaration_heading(Some(key), child)));
        declaration_lines(child, depth + 1, lines);
    }
}

fn value_lines(value: &Value, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, entry) in map {
                if is_scalar(entry) {
                    lines.push(format!("{indent}{key}: {}", scalar_text(entry)));
                } else {
                    lines.push(format!("{indent}{key}:"));
                    value_lines(entry, depth + 1, lines);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_scalar(item) {
                    lines.push(format!("{indent}- {}", scalar_text(item)));
                } else {
                    lines.push(format!("{indent}-"));
                    value_lines(item, depth + 1, lines);
                }
            }
        }
        scalar => lines.push(format!("{indent}{}", scalar_text(scalar))),
    }
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}
