//! The formatting facade.
//!
//! `ExceptionFormatter` is the entry point most callers need: it flattens a
//! raised error and binds the snapshot to the active renderer in one call.
//!
//! # Example
//!
//! ```rust
//! use errfmt::{ErrorRecord, ExceptionFormatter, FormatterOptions, StackFrame, TemplateMap, Value};
//!
//! let formatter = ExceptionFormatter::new(FormatterOptions::default(), TemplateMap::new()).unwrap();
//! let error = ErrorRecord::new("app::Error", "boom")
//!     .at("src/main.rs", 12)
//!     .with_frame(StackFrame::new("run").with_arguments([Value::Int(1)]));
//!
//! let formatted = formatter.format(&error);
//! assert!(formatted.trace_text().contains("<b>run</b>"));
//! ```

use crate::error::Result;
use crate::formatted::FormattedSnapshot;
use crate::renderer::{HtmlRenderer, TemplateRenderer, TextRenderer};
use errfmt_config::{ConfigError, FormatterConfig, FormatterOptions, RendererKind, TemplateMap};
use errfmt_snapshot::{ErrorSnapshot, RaisedError, TraceFlattener};
use std::sync::Arc;

/// Flattens raised errors and renders them with one renderer.
#[derive(Clone)]
pub struct ExceptionFormatter {
    renderer: Arc<dyn TemplateRenderer>,
    flattener: TraceFlattener,
}

impl ExceptionFormatter {
    /// Build a formatter around the HTML renderer.
    ///
    /// `templates` is merged over the built-in HTML templates; pass an empty
    /// map to use the defaults unchanged.
    pub fn new(options: FormatterOptions, templates: TemplateMap) -> Result<Self> {
        let renderer = HtmlRenderer::new(&options, templates)?;
        Self::with_renderer(Arc::new(renderer))
    }

    /// Build a formatter around any renderer.
    ///
    /// Fails with `ConfigError::NonConformingRenderer` when the renderer
    /// cannot produce a trace.
    pub fn with_renderer(renderer: Arc<dyn TemplateRenderer>) -> Result<Self> {
        validate_renderer(renderer.as_ref())?;
        log::debug!("Exception formatter using {} renderer", renderer.name());
        Ok(Self {
            renderer,
            flattener: TraceFlattener::default(),
        })
    }

    /// Build a formatter from a loaded configuration.
    pub fn from_config(config: &FormatterConfig) -> Result<Self> {
        let templates = config.templates.clone();
        let renderer: Arc<dyn TemplateRenderer> = match config.renderer_kind()? {
            RendererKind::Html => Arc::new(HtmlRenderer::new(&config.options, templates)?),
            RendererKind::Text => Arc::new(TextRenderer::new(&config.options, templates)?),
        };
        Self::with_renderer(renderer)
    }

    /// Replace the flattener, e.g. to change the cause depth limit.
    pub fn with_flattener(mut self, flattener: TraceFlattener) -> Self {
        self.flattener = flattener;
        self
    }

    pub fn renderer(&self) -> &Arc<dyn TemplateRenderer> {
        &self.renderer
    }

    /// Change the string argument limit of the active renderer. 0 disables
    /// truncation.
    ///
    /// Labels already cached by earlier snapshots are not recomputed.
    pub fn set_argument_max_length(&self, max: usize) {
        log::debug!("Argument max length set to {}", max);
        self.renderer.set_argument_max_length(max);
    }

    /// Flatten `error` without binding it to the renderer.
    pub fn flatten(&self, error: &dyn RaisedError) -> ErrorSnapshot {
        self.flattener.flatten(error)
    }

    /// Flatten `error` and bind the snapshot to the active renderer.
    pub fn format(&self, error: &dyn RaisedError) -> FormattedSnapshot {
        self.attach(self.flatten(error))
    }

    /// Bind an existing snapshot to the active renderer.
    pub fn attach(&self, snapshot: ErrorSnapshot) -> FormattedSnapshot {
        FormattedSnapshot::new(snapshot, Arc::clone(&self.renderer))
    }

    /// Restore a snapshot saved as JSON and bind it to the active renderer.
    pub fn restore(&self, json: &str) -> Result<FormattedSnapshot> {
        FormattedSnapshot::restore(json, Arc::clone(&self.renderer))
    }
}

impl std::fmt::Debug for ExceptionFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionFormatter")
            .field("renderer", &self.renderer.name())
            .field("flattener", &self.flattener)
            .finish()
    }
}

/// Check that `renderer` can produce a trace at all.
///
/// Its template set is complete by construction; this checks the name and
/// that the trace templates keep their item placeholders.
pub fn validate_renderer(renderer: &dyn TemplateRenderer) -> errfmt_config::Result<()> {
    let name = renderer.name();
    let templates = renderer.templates();

    let reason = if name.trim().is_empty() {
        Some("renderer name is empty".to_string())
    } else if !templates.trace.has_placeholder("items") {
        Some("\"trace\" template has no {items} placeholder".to_string())
    } else if !templates.trace_item.has_placeholder("item") {
        Some("\"trace_item\" template has no {item} placeholder".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => {
            log::warn!("Rejecting renderer {:?}: {}", name, reason);
            Err(ConfigError::NonConformingRenderer {
                name: name.to_string(),
                reason,
            })
        }
        None => Ok(()),
    }
}
