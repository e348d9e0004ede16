//! Default values for formatter options.

/// String arguments are never truncated by default.
pub fn argument_max_length() -> usize {
    0
}

/// Name of the renderer used when none is configured.
pub fn renderer() -> String {
    "html".to_string()
}
