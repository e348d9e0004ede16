//! Markup renderer.

use super::{RenderSettings, TemplateRenderer};
use crate::escape::escape_html;
use errfmt_config::{FormatterOptions, TemplateMap, TemplateSet, defaults, merge_templates};

/// Renders snapshots as HTML fragments.
///
/// String arguments are HTML-escaped before they are quoted.
#[derive(Debug)]
pub struct HtmlRenderer {
    templates: TemplateSet,
    settings: RenderSettings,
}

impl HtmlRenderer {
    pub const NAME: &'static str = "html";

    /// Build the renderer with `overrides` merged over the HTML defaults.
    ///
    /// Fails when the base directory does not resolve or the merged template
    /// set is incomplete.
    pub fn new(options: &FormatterOptions, overrides: TemplateMap) -> errfmt_config::Result<Self> {
        let templates = TemplateSet::from_map(merge_templates(defaults::html_templates(), overrides))?;
        let settings = RenderSettings::from_options(options)?;
        log::debug!(
            "Created HTML renderer (argument_max_length={})",
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

impl TemplateRenderer for HtmlRenderer {
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
        escape_html(text)
    }
}
