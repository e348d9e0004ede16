//! Crate-level error type.
//!
//! Wraps the errors of the configuration and snapshot crates so callers of
//! the facade deal with a single type.

use errfmt_config::ConfigError;
use errfmt_snapshot::SnapshotError;
use thiserror::Error;

/// Errors surfaced by `ExceptionFormatter` and `FormattedSnapshot`.
#[derive(Debug, Error)]
pub enum Error {
    /// Formatter or renderer construction failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A snapshot could not be saved or restored.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Result alias used throughout errfmt.
pub type Result<T> = std::result::Result<T, Error>;
