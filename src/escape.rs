//! Escaping helpers for rendered string arguments.

/// Escape the five HTML special characters.
///
/// Input is always valid UTF-8; invalid byte sequences were already replaced
/// with U+FFFD when the value was flattened.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Backslash-escape single quotes for plain-text quoting.
pub fn escape_quotes(text: &str) -> String {
    text.replace('\'', "\\'")
}
