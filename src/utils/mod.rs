//! Project-specific utilities live here.

use serde_json::Value;

/// Flatten a `[format, style, ...args]` prefix into a plain text line.
///
/// The `%c` marker and the style argument only mean something to a styling
/// console, so they are dropped; strings are written unquoted.
pub fn plain_line(parts: &[Value]) -> String {
    let mut iter = parts.iter();
    let mut words = Vec::with_capacity(parts.len());

    if let Some(head) = iter.next() {
        match head.as_str().and_then(|format| format.strip_prefix("%c")) {
            Some(label) => {
                words.push(format!("[{label}]"));
                // The style argument belongs to the marker.
                iter.next();
            }
            None => words.push(text(head)),
        }
    }

    words.extend(iter.map(text));
    words.join(" ")
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
