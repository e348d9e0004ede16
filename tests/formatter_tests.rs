//! Integration tests for the formatting facade.
//!
//! These tests verify the end-to-end behavior of:
//! - Flattening and rendering with the default HTML templates
//! - Argument truncation and path shortening
//! - Construction failures
//! - Restoring saved snapshots

mod common;

use common::{
    do_work_error, html_formatter, mixed_arguments_error, string_argument_error,
    temp_base_directory, text_formatter,
};
use errfmt::{
    ConfigError, Error, ErrorRecord, ExceptionFormatter, FormatterConfig, FormatterOptions,
    StackFrame, TemplateMap, TraceFlattener, Value,
};
use std::path::MAIN_SEPARATOR;

// ----------------------------------------------------------------------------
// End to end
// ----------------------------------------------------------------------------

#[test]
fn test_format_do_work() {
    let formatted = html_formatter().format(&do_work_error());

    assert_eq!(formatted.message(), "boom");
    assert_eq!(formatted.code(), 2);
    assert!(formatted.cause().is_none());

    let trace = formatted.trace_text();
    assert!(trace.contains("doWork"));
    assert!(trace.contains("42, 'x', <em>null</em>, <em>true</em>"));
    assert!(trace.starts_with(r#"<ol class="exception-trace"><li>"#));
    assert!(trace.ends_with("</li></ol>"));
}

#[test]
fn test_format_mixed_argument_kinds() {
    let trace = html_formatter().format(&mixed_arguments_error()).trace_text().to_string();
    assert!(trace.contains("'Lorem ipsum', <em>null</em>, <em>false</em>, <em>stream</em>, 12, 2.35"));
}

#[test]
fn test_type_and_location_labels() {
    let formatted = html_formatter().format(&do_work_error());

    assert_eq!(
        formatted.formatted_type_label(),
        r#"<abbr title="app::WorkError">WorkError</abbr>"#
    );
    let location = formatted.formatted_location_label();
    assert!(location.contains("<b>work.rs</b>"));
    assert!(location.contains("(line 17)"));
}

#[test]
fn test_origin_frame_is_numbered_first() {
    let trace = text_formatter().format(&do_work_error()).trace_text().to_string();
    let lines: Vec<&str> = trace.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "#1  at src/work.rs:17");
    assert_eq!(lines[1], "#2 doWork(42, 'x', null, true) at src/main.rs:4");
}

#[test]
fn test_cause_is_formatted_too() {
    let error = do_work_error().with_cause(ErrorRecord::new("std::io::Error", "denied").at("src/fs.rs", 9));
    let formatted = html_formatter().format(&error);

    let cause = formatted.cause().expect("cause");
    assert_eq!(cause.message(), "denied");
    assert_eq!(
        cause.formatted_type_label(),
        r#"<abbr title="std::io::Error">Error</abbr>"#
    );
    assert!(cause.formatted_location_label().contains("<b>fs.rs</b>"));
    assert_eq!(formatted.chain().count(), 2);
}

#[test]
fn test_flattener_can_be_replaced() {
    let error = (0..10).fold(ErrorRecord::new("E0", "root"), |cause, i| {
        ErrorRecord::new(format!("E{}", i + 1), "wrapped").with_cause(cause)
    });
    let formatter = html_formatter().with_flattener(TraceFlattener::new().with_max_cause_depth(3));
    assert_eq!(formatter.format(&error).chain().count(), 3);
}

// ----------------------------------------------------------------------------
// Truncation
// ----------------------------------------------------------------------------

#[test]
fn test_argument_truncation() {
    let long: String = "0123456789".repeat(20);
    let formatter = ExceptionFormatter::new(
        FormatterOptions::new().with_argument_max_length(1000),
        TemplateMap::new(),
    )
    .unwrap();
    formatter.set_argument_max_length(50);

    let trace = formatter.format(&string_argument_error(&long)).trace_text().to_string();
    assert!(trace.contains(&format!("'{}...'", &long[..50])));
    assert!(!trace.contains(&long[..51]));
}

#[test]
fn test_zero_means_unlimited() {
    let long: String = "abc".repeat(100);
    let trace = html_formatter().format(&string_argument_error(&long)).trace_text().to_string();
    assert!(trace.contains(&format!("'{}'", long)));
}

#[test]
fn test_truncation_happens_before_escaping() {
    let formatter = html_formatter();
    formatter.set_argument_max_length(3);
    let trace = formatter.format(&string_argument_error("a<b>c")).trace_text().to_string();
    assert!(trace.contains("'a&lt;b...'"));
}

#[test]
fn test_newlines_are_stripped() {
    let trace = html_formatter()
        .format(&string_argument_error("line one\nline two"))
        .trace_text()
        .to_string();
    assert!(trace.contains("'line oneline two'"));
}

// ----------------------------------------------------------------------------
// Path shortening
// ----------------------------------------------------------------------------

#[test]
fn test_base_directory_is_stripped() {
    let (temp_dir, prefix) = temp_base_directory();
    let file = format!("{}src{}Foo.rs", prefix, MAIN_SEPARATOR);

    let formatter = ExceptionFormatter::new(
        FormatterOptions::new().with_base_directory(temp_dir.path()),
        TemplateMap::new(),
    )
    .unwrap();
    let formatted = formatter.format(&ErrorRecord::new("E", "m").at(file.clone(), 5));

    assert_eq!(formatted.file(), format!("src{}Foo.rs", MAIN_SEPARATOR));
    assert_eq!(formatted.original_file(), file);

    let location = formatted.formatted_location_label();
    assert!(location.contains(&format!("src{}<b>Foo.rs</b>", MAIN_SEPARATOR)));
    assert!(!location.contains(&prefix));
}

#[test]
fn test_file_outside_base_directory_is_kept() {
    let (temp_dir, _prefix) = temp_base_directory();
    let formatter = ExceptionFormatter::new(
        FormatterOptions::new().with_base_directory(temp_dir.path()),
        TemplateMap::new(),
    )
    .unwrap();

    let formatted = formatter.format(&ErrorRecord::new("E", "m").at("elsewhere.rs", 1));
    assert_eq!(formatted.file(), "elsewhere.rs");
}

// ----------------------------------------------------------------------------
// Construction failures
// ----------------------------------------------------------------------------

#[test]
fn test_missing_base_directory() {
    let (temp_dir, _prefix) = temp_base_directory();
    let missing = temp_dir.path().join("does-not-exist");

    let err = ExceptionFormatter::new(
        FormatterOptions::new().with_base_directory(&missing),
        TemplateMap::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::BaseDirectoryNotFound { .. })
    ));
}

#[test]
fn test_unknown_renderer_in_config() {
    let config = FormatterConfig::from_yaml("renderer: pdf\n").unwrap();
    let err = ExceptionFormatter::from_config(&config).unwrap_err();

    match err {
        Error::Config(ConfigError::InvalidRenderer { name, supported }) => {
            assert_eq!(name, "pdf");
            assert!(supported.contains("html"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_config_selects_text_renderer() {
    let config = FormatterConfig::from_yaml("renderer: TEXT\nargument_max_length: 2\n").unwrap();
    let formatter = ExceptionFormatter::from_config(&config).unwrap();
    assert_eq!(formatter.renderer().name(), "text");

    let trace = formatter.format(&string_argument_error("hello")).trace_text().to_string();
    assert!(trace.contains("log('he...')"));
}

#[test]
fn test_config_file_with_overrides() {
    let (temp_dir, _prefix) = temp_base_directory();
    let path = temp_dir.path().join("errfmt.yaml");
    std::fs::write(
        &path,
        "templates:\n  class: \"[{classShort}]\"\n",
    )
    .unwrap();

    let config = FormatterConfig::load(&path).unwrap();
    let formatter = ExceptionFormatter::from_config(&config).unwrap();
    let formatted = formatter.format(&do_work_error());
    assert_eq!(formatted.formatted_type_label(), "[WorkError]");
}

// ----------------------------------------------------------------------------
// Save and restore
// ----------------------------------------------------------------------------

#[test]
fn test_restore_recomputes_labels() {
    let formatted = html_formatter().format(&do_work_error());
    let json = formatted.save().unwrap();

    let restored = html_formatter().restore(&json).unwrap();
    assert_eq!(restored.to_snapshot(), formatted.to_snapshot());
    assert_eq!(restored.trace_text(), formatted.trace_text());
    assert_eq!(restored.formatted_type_label(), formatted.formatted_type_label());
}

#[test]
fn test_restore_with_another_renderer() {
    let json = html_formatter().format(&do_work_error()).save().unwrap();
    let restored = text_formatter().restore(&json).unwrap();

    assert_eq!(restored.formatted_type_label(), "app::WorkError");
    assert!(restored.trace_text().contains("doWork(42, 'x', null, true)"));
}

#[test]
fn test_restore_long_cause_chain() {
    let error = (1..150).fold(ErrorRecord::new("E0", "root").at("src/a.rs", 1), |cause, i| {
        ErrorRecord::new(format!("E{i}"), "wrapped")
            .at("src/a.rs", i)
            .with_cause(cause)
    });
    let formatter = html_formatter();
    let json = formatter.format(&error).save().unwrap();

    let restored = formatter.restore(&json).unwrap();
    assert_eq!(restored.chain().count(), 150);
    assert_eq!(
        restored.chain().last().unwrap().formatted_type_label(),
        r#"<abbr title="E0">E0</abbr>"#
    );
}

#[test]
fn test_restore_nan_argument() {
    let error = ErrorRecord::new("E", "m")
        .with_frame(StackFrame::new("scale").with_arguments([Value::Float(f64::NAN), 1.5_f64.into()]));
    let formatter = html_formatter();
    let json = formatter.format(&error).save().unwrap();

    let restored = formatter.restore(&json).unwrap();
    assert!(restored.trace_text().contains("(NAN, 1.5)"));
}

#[test]
fn test_restore_garbage() {
    let err = html_formatter().restore("{not json").unwrap_err();
    assert!(matches!(err, Error::Snapshot(_)));
}

#[test]
fn test_serialize_matches_save() {
    let error = do_work_error().with_cause(ErrorRecord::new("Inner", "first"));
    let formatted = html_formatter().format(&error);

    let via_serde = serde_json::to_string(&formatted).unwrap();
    assert_eq!(via_serde, formatted.save().unwrap());
    assert!(via_serde.contains("\"Inner\""));
}

// ----------------------------------------------------------------------------
// Caching
// ----------------------------------------------------------------------------

#[test]
fn test_labels_are_computed_once() {
    let formatter = html_formatter();
    let formatted = formatter.format(&string_argument_error("abcdef"));

    let before = formatted.trace_text().to_string();
    formatter.set_argument_max_length(2);
    assert_eq!(formatted.trace_text(), before);

    let fresh = formatter.format(&string_argument_error("abcdef"));
    assert!(fresh.trace_text().contains("'ab...'"));
}

#[test]
fn test_frame_without_file_has_no_location() {
    let error = ErrorRecord::new("E", "m").with_frame(StackFrame::new("main"));
    let trace = text_formatter().format(&error).trace_text().to_string();
    assert!(trace.contains("#2 main()\n"));
}
