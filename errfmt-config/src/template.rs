//! Placeholder templates.
//!
//! A template is a plain string containing `{name}` placeholders, for example
//! `<abbr title="{class}">{classShort}</abbr>`. Rendering substitutes every
//! placeholder in a single pass: a substituted value that itself contains
//! `{item}` is copied verbatim and never expanded again. Placeholders with no
//! matching variable are left untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Placeholder pattern that matches `{name}` tokens
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Failed to compile placeholder regex")
    })
}

/// A string template with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    source: String,
}

impl Template {
    /// Create a template from its source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `vars` into the template.
    ///
    /// # Arguments
    /// * `vars` - `(placeholder, value)` pairs; the first pair with a matching
    ///   name wins
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        placeholder_regex()
            .replace_all(&self.source, |caps: &regex::Captures| {
                let name = &caps[1];
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value).to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Check if the template references the given placeholder.
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().iter().any(|p| p == name)
    }

    /// Extract all placeholder names, in order of appearance.
    pub fn placeholders(&self) -> Vec<String> {
        placeholder_regex()
            .captures_iter(&self.source)
            .map(|cap| cap[1].to_string())
            .collect()
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
