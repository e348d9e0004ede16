//! Snapshots bound to a renderer.
//!
//! A `FormattedSnapshot` wraps an `ErrorSnapshot` together with the renderer
//! that produced it and exposes the rendered labels. Each derived field is
//! computed on first access and then cached for the lifetime of the value.
//!
//! # Serialization compatibility
//!
//! Serializing a `FormattedSnapshot` writes the plain `ErrorSnapshot`. The
//! renderer and the cached labels are never written out; `restore` attaches
//! a renderer again and the labels are recomputed on demand.

use crate::error::Result;
use crate::renderer::TemplateRenderer;
use errfmt_snapshot::{ErrorSnapshot, TraceFrame};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// An error snapshot with renderer-derived labels.
pub struct FormattedSnapshot {
    /// Snapshot without its cause; the cause lives in `cause`
    snapshot: ErrorSnapshot,
    cause: Option<Box<FormattedSnapshot>>,
    renderer: Arc<dyn TemplateRenderer>,
    file: OnceLock<String>,
    type_label: OnceLock<String>,
    location_label: OnceLock<String>,
    trace_text: OnceLock<String>,
}

impl FormattedSnapshot {
    /// Bind `snapshot` and every snapshot in its cause chain to `renderer`.
    pub fn new(mut snapshot: ErrorSnapshot, renderer: Arc<dyn TemplateRenderer>) -> Self {
        // Iterative so long chains do not grow the stack.
        let mut causes = Vec::new();
        let mut next = snapshot.take_cause();
        while let Some(mut cause) = next {
            next = cause.take_cause();
            causes.push(cause);
        }

        let cause = causes.into_iter().rev().fold(None, |inner, cause| {
            Some(Box::new(Self::bind(cause, inner, &renderer)))
        });
        Self::bind(snapshot, cause, &renderer)
    }

    fn bind(
        snapshot: ErrorSnapshot,
        cause: Option<Box<Self>>,
        renderer: &Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            snapshot,
            cause,
            renderer: Arc::clone(renderer),
            file: OnceLock::new(),
            type_label: OnceLock::new(),
            location_label: OnceLock::new(),
            trace_text: OnceLock::new(),
        }
    }

    /// Rebuild from JSON written by `save` (or `ErrorSnapshot::save`).
    pub fn restore(json: &str, renderer: Arc<dyn TemplateRenderer>) -> Result<Self> {
        Ok(Self::new(ErrorSnapshot::restore(json)?, renderer))
    }

    pub fn type_name(&self) -> &str {
        self.snapshot.type_name()
    }

    pub fn message(&self) -> &str {
        self.snapshot.message()
    }

    pub fn code(&self) -> i64 {
        self.snapshot.code()
    }

    /// File where the error was raised, with the base directory stripped.
    pub fn file(&self) -> &str {
        self.file
            .get_or_init(|| self.renderer.shorten_filename(self.snapshot.file()).to_string())
    }

    /// File where the error was raised, as recorded.
    pub fn original_file(&self) -> &str {
        self.snapshot.file()
    }

    pub fn line(&self) -> u32 {
        self.snapshot.line()
    }

    pub fn trace(&self) -> &[TraceFrame] {
        self.snapshot.trace()
    }

    pub fn cause(&self) -> Option<&FormattedSnapshot> {
        self.cause.as_deref()
    }

    /// Iterate over this snapshot followed by every cause, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &FormattedSnapshot> {
        std::iter::successors(Some(self), |snapshot| snapshot.cause())
    }

    pub fn renderer(&self) -> &Arc<dyn TemplateRenderer> {
        &self.renderer
    }

    /// Error type rendered through the `class` template.
    pub fn formatted_type_label(&self) -> &str {
        self.type_label
            .get_or_init(|| self.renderer.format_class(self.snapshot.type_name()))
    }

    /// Raise location rendered through the `file_line` template.
    pub fn formatted_location_label(&self) -> &str {
        self.location_label.get_or_init(|| {
            self.renderer
                .format_file_line(self.snapshot.file(), self.snapshot.line())
        })
    }

    /// Whole trace rendered through the `trace` template.
    pub fn trace_text(&self) -> &str {
        self.trace_text
            .get_or_init(|| self.renderer.format_trace(self.snapshot.trace()))
    }

    /// Unformatted trace text, independent of the renderer.
    pub fn plain_trace_text(&self) -> &str {
        self.snapshot.trace_text()
    }

    /// Rebuild the plain snapshot, cause chain included.
    pub fn to_snapshot(&self) -> ErrorSnapshot {
        let causes: Vec<&FormattedSnapshot> = self.chain().collect();
        causes
            .into_iter()
            .rev()
            .fold(None, |cause, formatted| {
                Some(formatted.snapshot.clone().with_cause(cause))
            })
            .unwrap_or_else(|| self.snapshot.clone())
    }

    /// Serialize the plain snapshot to JSON.
    pub fn save(&self) -> Result<String> {
        Ok(self.to_snapshot().save()?)
    }
}

impl Serialize for FormattedSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_snapshot().serialize(serializer)
    }
}

impl fmt::Debug for FormattedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedSnapshot")
            .field("type_name", &self.snapshot.type_name())
            .field("message", &self.snapshot.message())
            .field("file", &self.snapshot.file())
            .field("line", &self.snapshot.line())
            .field("frames", &self.snapshot.trace().len())
            .field("renderer", &self.renderer.name())
            .field("cause", &self.cause)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextRenderer;
    use errfmt_config::{FormatterOptions, TemplateMap};

    fn renderer() -> Arc<dyn TemplateRenderer> {
        Arc::new(TextRenderer::new(&FormatterOptions::default(), TemplateMap::new()).unwrap())
    }

    fn snapshot(name: &str) -> ErrorSnapshot {
        ErrorSnapshot::new(
            name,
            "failed",
            0,
            "src/lib.rs",
            3,
            vec![TraceFrame::origin("src/lib.rs", 3)],
        )
    }

    #[test]
    fn test_cause_chain_is_bound() {
        let chained = snapshot("Outer").with_cause(Some(snapshot("Inner")));
        let formatted = FormattedSnapshot::new(chained.clone(), renderer());

        let names: Vec<&str> = formatted.chain().map(|s| s.type_name()).collect();
        assert_eq!(names, vec!["Outer", "Inner"]);
        assert_eq!(formatted.to_snapshot(), chained);
    }

    #[test]
    fn test_labels_are_cached() {
        let formatted = FormattedSnapshot::new(snapshot("E"), renderer());
        let first = formatted.trace_text() as *const str;
        let second = formatted.trace_text() as *const str;
        assert_eq!(first, second);
        assert_eq!(formatted.formatted_type_label(), "E");
    }

    #[test]
    fn test_debug_skips_renderer_internals() {
        let formatted = FormattedSnapshot::new(snapshot("E"), renderer());
        let debug = format!("{:?}", formatted);
        assert!(debug.contains("renderer: \"text\""));
    }
}
