//! Shared integration test helpers for errfmt.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#![allow(dead_code)]` attribute suppresses warnings when a file only
//! uses some of the helpers.

#![allow(dead_code)]

use errfmt::{
    ErrorRecord, ExceptionFormatter, FormatterConfig, FormatterOptions, ResourceRef, StackFrame,
    TemplateMap, Value,
};
use std::path::{MAIN_SEPARATOR, PathBuf};
use tempfile::TempDir;

/// Formatter with the default HTML templates and no options.
pub fn html_formatter() -> ExceptionFormatter {
    ExceptionFormatter::new(FormatterOptions::default(), TemplateMap::new())
        .expect("default HTML formatter")
}

/// Formatter with the built-in text renderer and no options.
pub fn text_formatter() -> ExceptionFormatter {
    let config = FormatterConfig {
        renderer: "text".to_string(),
        ..FormatterConfig::default()
    };
    ExceptionFormatter::from_config(&config).expect("default text formatter")
}

/// The error raised by `doWork(42, "x", null, true)`.
pub fn do_work_error() -> ErrorRecord {
    ErrorRecord::new("app::WorkError", "boom")
        .with_code(2)
        .at("src/work.rs", 17)
        .with_frame(
            StackFrame::new("doWork")
                .at("src/main.rs", 4)
                .with_arguments([42_i64.into(), "x".into(), Value::Null, true.into()]),
        )
}

/// An error whose only frame takes one argument of every scalar kind.
pub fn mixed_arguments_error() -> ErrorRecord {
    ErrorRecord::new("app::Error", "mixed").at("src/lib.rs", 1).with_frame(
        StackFrame::new("createException").with_arguments([
            "Lorem ipsum".into(),
            Value::Null,
            false.into(),
            Value::Resource(ResourceRef::new("stream")),
            12_i64.into(),
            2.35_f64.into(),
        ]),
    )
}

/// An error with a single string argument.
pub fn string_argument_error(value: &str) -> ErrorRecord {
    ErrorRecord::new("app::Error", "long")
        .at("src/lib.rs", 1)
        .with_frame(StackFrame::new("log").with_arguments([value.into()]))
}

/// Creates a temporary directory and returns it with its canonical path
/// followed by a trailing separator.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn temp_base_directory() -> (TempDir, String) {
    let temp_dir = TempDir::new().expect("temp dir");
    let canonical: PathBuf = temp_dir.path().canonicalize().expect("canonical temp dir");
    let prefix = format!("{}{}", canonical.display(), MAIN_SEPARATOR);
    (temp_dir, prefix)
}
