//! Default value functions for configuration.
//!
//! Each sub-module groups related free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes and as the
//! built-in template sets of the bundled renderers.

mod misc;
mod templates;

// ── Options ────────────────────────────────────────────────────────────────
pub use misc::{argument_max_length, renderer};

// ── Template sets ──────────────────────────────────────────────────────────
pub use templates::{array_item, html_templates, text_templates};
