//! Template renderers.
//!
//! A `TemplateRenderer` turns the pieces of an `ErrorSnapshot` into text
//! using a validated `TemplateSet`. Implementors only supply their template
//! set, their settings and a string escaping policy; every formatting
//! operation has a default implementation built on top of those.
//!
//! Two renderers ship with the crate:
//! - `HtmlRenderer` - markup output, HTML-escaped strings
//! - `TextRenderer` - plain text for logs and terminals

mod html;
mod text;

pub use html::HtmlRenderer;
pub use text::TextRenderer;

use errfmt_config::{BaseDirectory, FormatterOptions, TemplateSet};
use errfmt_snapshot::{ArgumentKey, ArrayPayload, TraceFrame, ValueDescriptor, float_label};
use std::borrow::Cow;
use std::path::MAIN_SEPARATOR;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Separator tried when a path contains no `MAIN_SEPARATOR`.
pub const ALT_SEPARATOR: char = if MAIN_SEPARATOR == '/' { '\\' } else { '/' };

/// Suffix appended to truncated string arguments.
pub const ELLIPSIS: &str = "...";

// ============================================================================
// Settings
// ============================================================================

/// Runtime options shared by every renderer.
#[derive(Debug, Default)]
pub struct RenderSettings {
    base_directory: Option<BaseDirectory>,
    /// 0 means unlimited
    argument_max_length: AtomicUsize,
}

impl RenderSettings {
    pub fn new(base_directory: Option<BaseDirectory>, argument_max_length: usize) -> Self {
        Self {
            base_directory,
            argument_max_length: AtomicUsize::new(argument_max_length),
        }
    }

    /// Build settings from options, canonicalizing the base directory.
    pub fn from_options(options: &FormatterOptions) -> errfmt_config::Result<Self> {
        Ok(Self::new(
            options.resolve_base_directory()?,
            options.argument_max_length,
        ))
    }

    pub fn base_directory(&self) -> Option<&BaseDirectory> {
        self.base_directory.as_ref()
    }

    pub fn argument_max_length(&self) -> usize {
        self.argument_max_length.load(Ordering::Relaxed)
    }

    pub fn set_argument_max_length(&self, max: usize) {
        self.argument_max_length.store(max, Ordering::Relaxed);
    }
}

// ============================================================================
// Renderer trait
// ============================================================================

/// A pluggable formatting strategy for error snapshots.
///
/// Renderers are shared behind `Arc` between a formatter and every snapshot
/// it produced, so they must be `Send + Sync`.
pub trait TemplateRenderer: Send + Sync {
    /// Short identifier, e.g. `"html"`.
    fn name(&self) -> &str;

    fn templates(&self) -> &TemplateSet;

    fn settings(&self) -> &RenderSettings;

    /// Escape a string argument for this renderer's output format.
    ///
    /// Backslashes are already escaped when this is called.
    fn escape(&self, text: &str) -> String;

    fn argument_max_length(&self) -> usize {
        self.settings().argument_max_length()
    }

    fn set_argument_max_length(&self, max: usize) {
        self.settings().set_argument_max_length(max);
    }

    /// Strip the configured base directory from `file`.
    fn shorten_filename<'a>(&self, file: &'a str) -> &'a str {
        match self.settings().base_directory() {
            Some(base) => base.shorten(file),
            None => file,
        }
    }

    /// Render the `class` template.
    fn format_class(&self, class: &str) -> String {
        self.templates().class.render(&[
            ("class", class),
            ("classShort", short_class_name(class)),
        ])
    }

    /// Render the `file_line` template for a shortened `file`.
    fn format_file_line(&self, file: &str, line: u32) -> String {
        let (path, base_name) = split_path(self.shorten_filename(file));
        let line = line.to_string();
        self.templates().file_line.render(&[
            ("path", path),
            ("baseName", base_name),
            ("line", line.as_str()),
        ])
    }

    /// Render a whole trace, numbering frames from 1.
    fn format_trace(&self, trace: &[TraceFrame]) -> String {
        let items: String = trace
            .iter()
            .enumerate()
            .map(|(i, frame)| {
                let number = (i + 1).to_string();
                let item = self.format_trace_item(frame);
                self.templates()
                    .trace_item
                    .render(&[("number", number.as_str()), ("item", item.as_str())])
            })
            .collect();

        self.templates().trace.render(&[("items", items.as_str())])
    }

    /// Render the body of one trace entry: the call, then its location.
    fn format_trace_item(&self, frame: &TraceFrame) -> String {
        let mut item = String::new();
        if frame.has_function() {
            let function = frame.function.as_deref().unwrap_or_default();
            item.push_str(&self.format_function(frame, function));
        }
        if frame.has_file() {
            let file = frame.file.as_deref().unwrap_or_default();
            item.push_str(&self.format_file_line(file, frame.line.unwrap_or_default()));
        }
        item
    }

    /// Render the `function` template for a frame.
    fn format_function(&self, frame: &TraceFrame, function: &str) -> String {
        let class = frame
            .declaring_type
            .as_deref()
            .map(|class| self.format_class(class))
            .unwrap_or_default();
        let call_type = frame.call_type.map(|c| c.marker()).unwrap_or_default();
        let arguments = self.format_arguments(&frame.arguments);

        self.templates().function.render(&[
            ("class", class.as_str()),
            ("type", call_type),
            ("function", function),
            ("arguments", arguments.as_str()),
        ])
    }

    /// Render an argument list, joined with `", "`.
    ///
    /// Entries with a string key go through the `array_item` template.
    fn format_arguments(&self, arguments: &[(ArgumentKey, ValueDescriptor)]) -> String {
        arguments
            .iter()
            .map(|(key, value)| {
                let value = self.format_argument(value);
                if key.is_index() {
                    return value;
                }
                let key = self.escape(&key.to_string());
                self.templates()
                    .arguments
                    .array_item()
                    .render(&[("key", key.as_str()), ("value", value.as_str())])
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render one value, wrapped in its kind's template when there is one.
    fn format_argument(&self, value: &ValueDescriptor) -> String {
        let formatted = self.format_value(value);
        match self.templates().arguments.for_kind(value.kind().as_str()) {
            Some(template) => template.render(&[("value", formatted.as_str())]),
            None => formatted,
        }
    }

    /// Render one value without its kind template.
    fn format_value(&self, value: &ValueDescriptor) -> String {
        match value {
            ValueDescriptor::Object(class) => self.format_class(class),
            ValueDescriptor::Array(ArrayPayload::Entries(entries)) => self.format_arguments(entries),
            ValueDescriptor::Array(ArrayPayload::Marker(marker)) => marker.clone(),
            ValueDescriptor::Boolean(b) => b.to_string(),
            ValueDescriptor::Integer(i) => i.to_string(),
            ValueDescriptor::Float(f) => match float_label(*f) {
                Some(label) => label.to_string(),
                None => f.to_string(),
            },
            ValueDescriptor::String(s) => self.export_string(s),
            ValueDescriptor::Resource(label) | ValueDescriptor::IncompleteObject(label) => {
                label.clone()
            }
            ValueDescriptor::Null | ValueDescriptor::Unknown => String::new(),
        }
    }

    /// Render a string argument as a single-quoted literal.
    ///
    /// The value is truncated first, then escaped, then stripped of
    /// newlines.
    fn export_string(&self, value: &str) -> String {
        let truncated = truncate(value, self.argument_max_length());
        let escaped = self.escape(&truncated.replace('\\', "\\\\"));
        format!("'{}'", escaped.replace('\n', ""))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Last path segment of a type name, ignoring generic parameters.
///
/// Segments are separated by `::` or `\`.
pub fn short_class_name(class: &str) -> &str {
    let base = class.split('<').next().unwrap_or(class);
    let base = base.rsplit("::").next().unwrap_or(base);
    base.rsplit('\\').next().unwrap_or(base)
}

/// Split `file` into its directory part (with the trailing separator) and
/// its base name.
pub fn split_path(file: &str) -> (&str, &str) {
    match file
        .rfind(MAIN_SEPARATOR)
        .or_else(|| file.rfind(ALT_SEPARATOR))
    {
        Some(index) => file.split_at(index + 1),
        None => ("", file),
    }
}

/// Cut `value` to `max` characters and append `ELLIPSIS`. 0 disables.
pub fn truncate(value: &str, max: usize) -> Cow<'_, str> {
    if max == 0 {
        return Cow::Borrowed(value);
    }
    match value.char_indices().nth(max) {
        Some((index, _)) => Cow::Owned(format!("{}{}", &value[..index], ELLIPSIS)),
        None => Cow::Borrowed(value),
    }
}
