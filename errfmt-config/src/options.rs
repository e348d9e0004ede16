//! Formatter options and base-directory resolution.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Formatting options shared by every renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterOptions {
    /// Base directory stripped from file paths in traces and location labels.
    ///
    /// Must exist; it is canonicalized when a renderer is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<PathBuf>,

    /// Maximum length, in characters, of string arguments in trace entries.
    /// Longer strings are truncated and suffixed with `...`. 0 means no limit.
    #[serde(default = "crate::defaults::argument_max_length")]
    pub argument_max_length: usize,
}

impl FormatterOptions {
    /// Create options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory used for shortening file paths.
    pub fn with_base_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_directory = Some(dir.into());
        self
    }

    /// Set the maximum string argument length.
    pub fn with_argument_max_length(mut self, max: usize) -> Self {
        self.argument_max_length = max;
        self
    }

    /// Resolve the configured base directory, if any.
    pub fn resolve_base_directory(&self) -> Result<Option<BaseDirectory>> {
        self.base_directory
            .as_deref()
            .map(BaseDirectory::resolve)
            .transpose()
    }
}

/// A canonicalized base directory used as a literal path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectory {
    prefix: String,
}

impl BaseDirectory {
    /// Canonicalize `dir` and build the prefix to strip from file paths.
    ///
    /// Fails with `ConfigError::BaseDirectoryNotFound` when `dir` does not
    /// exist or is not a directory.
    pub fn resolve(dir: &Path) -> Result<Self> {
        let not_found = |source| ConfigError::BaseDirectoryNotFound {
            path: dir.display().to_string(),
            source,
        };

        let canonical = std::fs::canonicalize(dir).map_err(not_found)?;
        if !canonical.is_dir() {
            return Err(not_found(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }

        let canonical = canonical.to_string_lossy();
        let prefix = format!(
            "{}{}",
            canonical.trim_end_matches(['/', '\\']),
            MAIN_SEPARATOR
        );
        log::debug!("Resolved file base directory {:?} to {:?}", dir, prefix);

        Ok(Self { prefix })
    }

    /// The prefix stripped from file paths, always ending with a separator.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strip the base directory from `file` when it starts with it.
    pub fn shorten<'a>(&self, file: &'a str) -> &'a str {
        file.strip_prefix(self.prefix.as_str()).unwrap_or(file)
    }
}
