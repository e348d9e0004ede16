//! Formatter configuration loaded from YAML.

use crate::error::{ConfigError, Result};
use crate::options::FormatterOptions;
use crate::templates::TemplateMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Built-in renderer implementations selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    /// Markup output for HTML error pages
    Html,
    /// Plain text output for logs and terminals
    Text,
}

impl RendererKind {
    /// Get all renderer kinds with their names.
    pub fn all() -> &'static [(RendererKind, &'static str)] {
        &[(Self::Html, "html"), (Self::Text, "text")]
    }

    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "text",
        }
    }
}

impl FromStr for RendererKind {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self> {
        Self::all()
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(kind, _)| *kind)
            .ok_or_else(|| ConfigError::InvalidRenderer {
                name: name.to_string(),
                supported: Self::all()
                    .iter()
                    .map(|(_, n)| *n)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Complete formatter configuration.
///
/// ```yaml
/// base_directory: /srv/app
/// argument_max_length: 80
/// renderer: text
/// templates:
///   class: "{classShort}"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Shared formatting options
    #[serde(flatten)]
    pub options: FormatterOptions,

    /// Name of the built-in renderer to use (`html` or `text`)
    #[serde(default = "crate::defaults::renderer")]
    pub renderer: String,

    /// Template overrides merged over the renderer's defaults
    #[serde(default, skip_serializing_if = "TemplateMap::is_empty")]
    pub templates: TemplateMap,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            options: FormatterOptions::default(),
            renderer: crate::defaults::renderer(),
            templates: TemplateMap::new(),
        }
    }
}

impl FormatterConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        log::debug!(
            "Parsed formatter config: renderer={}, {} template override(s)",
            config.renderer,
            config.templates.len()
        );
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading formatter config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serialize the configuration back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Resolve the configured renderer name.
    pub fn renderer_kind(&self) -> Result<RendererKind> {
        self.renderer.parse()
    }
}
