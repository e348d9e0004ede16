//! Plain-text renderer.

use super::{RenderSettings, TemplateRenderer};
use crate::escape::escape_quotes;
use errfmt_config::{FormatterOptions, TemplateMap, TemplateSet, defaults, merge_templates};

/// Renders snapshots as plain text, one trace entry per line.
#[derive(Debug)]
pub struct TextRenderer {
    templates: TemplateSet,
    settings: RenderSettings,
}

impl TextRenderer {
    pub const NAME: &'static str = "text";

    /// Build the renderer with `overrides` merged over the text defaults.
    pub fn new(options: &FormatterOptions, overrides: TemplateMap) -> errfmt_config::Result<Self> {
        let templates = TemplateSet::from_map(merge_templates(defaults::text_templates(), overrides))?;
        let settings = RenderSettings::from_options(options)?;
        log::debug!(
            "Created text renderer (argument_max_length={})",
            settings.argument_max_length()
        );
        Ok(Self::from_parts(templates, settings))
    }

    /// Build the renderer from an already validated template set.
    pub fn from_parts(templates: TemplateSet, settings: RenderSettings) -> Self {
        Self {
            templates,
            settings,
        }
    }
}

impl TemplateRenderer for TextRenderer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn escape(&self, text: &str) -> String {
        escape_quotes(text)
    }
}
