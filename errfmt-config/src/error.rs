//! Typed error variants for the errfmt-config crate.
//!
//! Every variant is raised synchronously while a formatter or renderer is
//! being constructed. None of them is recovered internally; callers receive
//! them immediately and construction is aborted.

use thiserror::Error;

/// Errors that can occur while building formatter configuration.
///
/// # Example
///
/// ```rust
/// use errfmt_config::{ConfigError, TemplateMap, TemplateSet};
///
/// match TemplateSet::from_map(TemplateMap::new()) {
///     Err(ConfigError::MissingTemplateKeys(keys)) => assert!(keys.contains(&"trace".to_string())),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    // -----------------------------------------------------------------------
    // Template set validation
    // -----------------------------------------------------------------------
    /// The template set lacks one or more of the required keys.
    ///
    /// The inner list holds every missing key, in the order they are
    /// required.
    #[error("Missing formatter template keys: \"{}\"", .0.join("\", \""))]
    MissingTemplateKeys(Vec<String>),

    /// A template key holds the wrong shape of value (a table where a
    /// string is expected, or the other way around).
    #[error("Template \"{key}\" must be a {expected}")]
    InvalidTemplate {
        /// Offending template key.
        key: String,
        /// Expected shape, `"string"` or `"table"`.
        expected: &'static str,
    },

    // -----------------------------------------------------------------------
    // Options
    // -----------------------------------------------------------------------
    /// The configured base directory could not be resolved to an existing
    /// directory.
    #[error("File base directory \"{path}\" does not exist: {source}")]
    BaseDirectoryNotFound {
        /// The path as it was configured.
        path: String,
        /// Underlying I/O error from canonicalization.
        #[source]
        source: std::io::Error,
    },

    /// The requested renderer is not one this crate knows how to build.
    #[error("Invalid renderer \"{name}\". Supported renderers: {supported}")]
    InvalidRenderer {
        /// Renderer name as configured.
        name: String,
        /// Comma-separated list of supported renderer names.
        supported: String,
    },

    /// A renderer was supplied whose templates cannot produce a trace.
    #[error("Renderer \"{name}\" does not conform: {reason}")]
    NonConformingRenderer {
        /// Renderer name.
        name: String,
        /// What the renderer is missing.
        reason: String,
    },

    // -----------------------------------------------------------------------
    // Configuration files
    // -----------------------------------------------------------------------
    /// An I/O error occurred reading a configuration file.
    #[error("I/O error reading formatter config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration contained invalid YAML.
    #[error("YAML parse error in formatter config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Result alias used throughout errfmt-config.
pub type Result<T> = std::result::Result<T, ConfigError>;
