//! Typed errors for snapshot persistence.

use thiserror::Error;

/// Errors raised while saving or restoring an `ErrorSnapshot`.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot could not be encoded or decoded as JSON.
    #[error("Snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout errfmt-snapshot.
pub type Result<T> = std::result::Result<T, SnapshotError>;
