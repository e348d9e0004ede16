//! errfmt - error flattening and templated rendering.
//!
//! A raised error is turned into a serializable `ErrorSnapshot` (see the
//! `errfmt-snapshot` crate) and then rendered through a pluggable
//! `TemplateRenderer` configured from the `errfmt-config` crate.
//!
//! This crate ties both halves together:
//! - `ExceptionFormatter` - the facade: flatten, format, restore
//! - `FormattedSnapshot` - a snapshot with cached, rendered labels
//! - `HtmlRenderer` and `TextRenderer` - the built-in renderers

pub mod error;
pub mod escape;
pub mod formatted;
pub mod formatter;
pub mod renderer;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use formatted::FormattedSnapshot;
pub use formatter::{ExceptionFormatter, validate_renderer};
pub use renderer::{HtmlRenderer, RenderSettings, TemplateRenderer, TextRenderer};

pub use errfmt_config::{
    BaseDirectory, ConfigError, FormatterConfig, FormatterOptions, RendererKind, Template,
    TemplateEntry, TemplateMap, TemplateSet,
};
pub use errfmt_snapshot::{
    ArgumentKey, ArrayRef, CallType, ErrorRecord, ErrorSnapshot, ObjectRef, RaisedError,
    ResourceRef, SnapshotError, StackFrame, TraceFlattener, TraceFrame, Value, ValueDescriptor,
};
