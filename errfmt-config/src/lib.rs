//! Configuration system for errfmt.
//!
//! This crate provides the configuration side of error formatting:
//!
//! - Formatter options (base directory, argument truncation)
//! - Placeholder templates and validated template sets
//! - Built-in HTML and plain-text template defaults
//! - YAML configuration loading
//! - Typed configuration errors

pub mod config;
pub mod defaults;
pub mod error;
pub mod options;
pub mod template;
pub mod templates;

// Re-export main types for convenience
pub use config::{FormatterConfig, RendererKind};
pub use error::{ConfigError, Result};
pub use options::{BaseDirectory, FormatterOptions};
pub use template::Template;
pub use templates::{
    ARRAY_ITEM_KEY, ArgumentTemplates, REQUIRED_TEMPLATE_KEYS, TemplateEntry, TemplateMap,
    TemplateSet, merge_templates,
};
