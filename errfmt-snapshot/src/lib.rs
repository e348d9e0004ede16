//! Error flattening for errfmt.
//!
//! This crate turns a live raised error into plain data:
//!
//! - `Value` and friends model the host's live argument values
//! - `RaisedError` is the capability set an input error exposes
//! - `ValueDescriptor` classifies one value with depth and volume bounds
//! - `TraceFlattener` walks frames and the cause chain
//! - `ErrorSnapshot` is the serializable result

pub mod descriptor;
pub mod error;
pub mod flatten;
pub mod frame;
pub mod raised;
pub mod snapshot;
pub mod value;

// Re-export main types for convenience
pub use descriptor::{
    ArrayPayload, Arguments, DEEP_NESTED_MARKER, INF_LABEL, MAX_NESTING_LEVEL,
    MAX_VISITED_ENTRIES, NAN_LABEL, NEG_INF_LABEL, SKIPPED_MARKER, TraversalBudget,
    ValueDescriptor, ValueKind, flatten_arguments, float_label,
};
pub use error::{Result, SnapshotError};
pub use flatten::{MAX_CAUSE_DEPTH, TraceFlattener, flatten};
pub use frame::{CallType, TraceFrame};
pub use raised::{ErrorRecord, RaisedError, SOURCE_TYPE_NAME, StackFrame};
pub use snapshot::ErrorSnapshot;
pub use value::{ArgumentKey, ArrayRef, Entries, ObjectRef, ResourceRef, Value};
