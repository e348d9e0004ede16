//! Named template sets.
//!
//! This module provides:
//! - `TemplateMap`, the loosely typed key → template mapping that users
//!   inject (from code or from a YAML config file)
//! - `TemplateSet`, the validated form renderers work with
//! - `ArgumentTemplates`, the per-kind sub-templates for trace arguments

use crate::error::{ConfigError, Result};
use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys every template set must provide.
pub const REQUIRED_TEMPLATE_KEYS: [&str; 6] = [
    "class",
    "file_line",
    "trace",
    "trace_item",
    "function",
    "arguments",
];

/// Sub-template key used for array entries with a string key.
pub const ARRAY_ITEM_KEY: &str = "array_item";

/// A single entry of a `TemplateMap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateEntry {
    /// A plain template string
    Text(Template),
    /// A nested table of sub-templates (used by `arguments`)
    Table(BTreeMap<String, Template>),
}

impl From<&str> for TemplateEntry {
    fn from(source: &str) -> Self {
        Self::Text(Template::new(source))
    }
}

/// Loosely typed template mapping as supplied by users.
pub type TemplateMap = BTreeMap<String, TemplateEntry>;

/// Merge `overrides` over `defaults`.
///
/// The merge is shallow: an `arguments` table in `overrides` replaces the
/// whole default table rather than being merged key by key.
pub fn merge_templates(defaults: TemplateMap, overrides: TemplateMap) -> TemplateMap {
    let mut merged = defaults;
    merged.extend(overrides);
    merged
}

/// Per-kind templates for formatting trace arguments.
///
/// Each template receives the already formatted value as `{value}`. The
/// `array_item` template receives `{key}` and `{value}` and is applied to
/// entries whose key is not an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentTemplates {
    kinds: BTreeMap<String, Template>,
    array_item: Template,
}

impl ArgumentTemplates {
    fn from_table(mut table: BTreeMap<String, Template>) -> Self {
        let array_item = table
            .remove(ARRAY_ITEM_KEY)
            .unwrap_or_else(crate::defaults::array_item);
        Self {
            kinds: table,
            array_item,
        }
    }

    /// Template for a value kind (e.g. `"null"`, `"boolean"`, `"array"`).
    pub fn for_kind(&self, kind: &str) -> Option<&Template> {
        self.kinds.get(kind)
    }

    /// Template for string-keyed array entries.
    pub fn array_item(&self) -> &Template {
        &self.array_item
    }
}

/// A validated template set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    /// Exception class label: `{class}`, `{classShort}`
    pub class: Template,
    /// Location label: `{path}`, `{baseName}`, `{line}`
    pub file_line: Template,
    /// Whole trace: `{items}`
    pub trace: Template,
    /// One trace entry: `{number}`, `{item}`
    pub trace_item: Template,
    /// Function call: `{class}`, `{type}`, `{function}`, `{arguments}`
    pub function: Template,
    /// Per-kind argument templates
    pub arguments: ArgumentTemplates,
}

impl TemplateSet {
    /// Validate a template mapping.
    ///
    /// Fails with `ConfigError::MissingTemplateKeys` listing every required
    /// key that is absent, or `ConfigError::InvalidTemplate` when a key holds
    /// the wrong shape. Unrecognized keys are ignored.
    pub fn from_map(mut map: TemplateMap) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_TEMPLATE_KEYS
            .iter()
            .filter(|key| !map.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            log::warn!("Rejecting template set, missing keys: {:?}", missing);
            return Err(ConfigError::MissingTemplateKeys(missing));
        }

        let mut text = |key: &str| -> Result<Template> {
            match map.remove(key) {
                Some(TemplateEntry::Text(template)) => Ok(template),
                _ => Err(ConfigError::InvalidTemplate {
                    key: key.to_string(),
                    expected: "string",
                }),
            }
        };

        let class = text("class")?;
        let file_line = text("file_line")?;
        let trace = text("trace")?;
        let trace_item = text("trace_item")?;
        let function = text("function")?;

        let arguments = match map.remove("arguments") {
            Some(TemplateEntry::Table(table)) => ArgumentTemplates::from_table(table),
            _ => {
                return Err(ConfigError::InvalidTemplate {
                    key: "arguments".to_string(),
                    expected: "table",
                });
            }
        };

        if !map.is_empty() {
            log::debug!(
                "Ignoring unrecognized template keys: {:?}",
                map.keys().collect::<Vec<_>>()
            );
        }

        Ok(Self {
            class,
            file_line,
            trace,
            trace_item,
            function,
            arguments,
        })
    }
}
