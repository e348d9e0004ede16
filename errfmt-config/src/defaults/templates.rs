//! Built-in template sets.

use crate::template::Template;
use crate::templates::{ARRAY_ITEM_KEY, TemplateEntry, TemplateMap};
use std::collections::BTreeMap;

/// Fallback for the `array_item` sub-template when a set does not define one.
pub fn array_item() -> Template {
    Template::new("'{key}' => {value}")
}

fn arguments(entries: &[(&str, &str)]) -> TemplateEntry {
    TemplateEntry::Table(
        entries
            .iter()
            .map(|(kind, source)| (kind.to_string(), Template::new(*source)))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// Templates for HTML error pages.
pub fn html_templates() -> TemplateMap {
    let mut map = TemplateMap::new();
    map.insert(
        "trace".into(),
        r#"<ol class="exception-trace">{items}</ol>"#.into(),
    );
    map.insert("trace_item".into(), "<li>{item}</li>".into());
    map.insert(
        "class".into(),
        r#"<abbr title="{class}">{classShort}</abbr>"#.into(),
    );
    map.insert(
        "function".into(),
        r#"{class}{type}<b>{function}</b><span class="text-muted">({arguments})</span>"#.into(),
    );
    map.insert(
        "arguments".into(),
        arguments(&[
            ("array", "[{value}]"),
            (ARRAY_ITEM_KEY, "'{key}' => {value}"),
            ("null", "<em>null</em>"),
            ("boolean", "<em>{value}</em>"),
            ("resource", "<em>{value}</em>"),
        ]),
    );
    map.insert(
        "file_line".into(),
        r#"<span class="exception-file_line"> in <span class="text-danger">{path}<b>{baseName}</b> (line {line})</span></span>"#
            .into(),
    );
    map
}

/// Templates for plain-text output such as log lines.
pub fn text_templates() -> TemplateMap {
    let mut map = TemplateMap::new();
    map.insert("trace".into(), "{items}".into());
    map.insert("trace_item".into(), "#{number} {item}\n".into());
    map.insert("class".into(), "{class}".into());
    map.insert(
        "function".into(),
        "{class}{type}{function}({arguments})".into(),
    );
    map.insert(
        "arguments".into(),
        arguments(&[
            ("array", "[{value}]"),
            (ARRAY_ITEM_KEY, "'{key}' => {value}"),
            ("null", "null"),
            ("resource", "resource({value})"),
            ("object", "object({value})"),
        ]),
    );
    map.insert("file_line".into(), " at {path}{baseName}:{line}".into());
    map
}
