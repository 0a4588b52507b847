//! Shared utility functions for HCL generation.

use serde_json::Value;

/// Escape a string for use inside an HCL quoted string literal.
///
/// Backslashes, double quotes and control characters are escaped, and the
/// template introducers `${` and `%{` are doubled so the value is taken
/// literally.
pub fn hcl_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape and wrap a string in double quotes (e.g., `a"b` -> `"a\"b"`)
pub fn hcl_quote(s: &str) -> String {
    format!("\"{}\"", hcl_escape(s))
}

/// Convert a JSON state value to the unquoted text used in a generated attribute.
///
/// Strings are taken as-is, numbers and booleans use their JSON text, `null`
/// becomes the empty string, and lists or objects fall back to compact JSON.
pub fn json_value_to_hcl(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Short name of a provider source (e.g., "registry.terraform.io/hashicorp/aws" -> "aws")
pub fn provider_short_name(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}
