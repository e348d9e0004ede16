//! Trace flattening.
//!
//! Turns a `RaisedError` and its cause chain into an `ErrorSnapshot` that
//! owns all of its data.

use crate::descriptor::flatten_arguments;
use crate::frame::TraceFrame;
use crate::raised::{RaisedError, StackFrame};
use crate::snapshot::ErrorSnapshot;

/// Upper bound on the number of errors flattened from one cause chain.
pub const MAX_CAUSE_DEPTH: usize = 256;

/// Builds `ErrorSnapshot`s from raised errors.
#[derive(Debug, Clone)]
pub struct TraceFlattener {
    max_cause_depth: usize,
}

impl Default for TraceFlattener {
    fn default() -> Self {
        Self {
            max_cause_depth: MAX_CAUSE_DEPTH,
        }
    }
}

impl TraceFlattener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of errors taken from a cause chain (at least 1).
    pub fn with_max_cause_depth(mut self, depth: usize) -> Self {
        self.max_cause_depth = depth.max(1);
        self
    }

    /// Flatten `error` and its whole cause chain.
    pub fn flatten(&self, error: &dyn RaisedError) -> ErrorSnapshot {
        let mut chain: Vec<&dyn RaisedError> = vec![error];
        while let Some(cause) = chain.last().and_then(|e| e.cause()) {
            if chain.len() >= self.max_cause_depth {
                log::warn!(
                    "Cause chain of {} exceeds {} errors, truncating",
                    error.type_name(),
                    self.max_cause_depth
                );
                break;
            }
            chain.push(cause);
        }

        // Build innermost first so each snapshot can take ownership of its cause.
        chain.iter().rev().fold(None, |cause, error| {
            Some(self.flatten_single(*error).with_cause(cause))
        })
        .unwrap_or_else(|| self.flatten_single(error))
    }

    /// Flatten `error` without looking at its cause.
    pub fn flatten_single(&self, error: &dyn RaisedError) -> ErrorSnapshot {
        ErrorSnapshot::new(
            error.type_name(),
            error.message(),
            error.code(),
            error.file(),
            error.line(),
            self.flatten_trace(error),
        )
    }

    /// Flatten the call stack of `error`.
    ///
    /// The first frame is synthetic and carries the error's own location.
    pub fn flatten_trace(&self, error: &dyn RaisedError) -> Vec<TraceFrame> {
        let frames = error.frames();
        let mut trace = Vec::with_capacity(frames.len() + 1);
        trace.push(TraceFrame::origin(error.file(), error.line()));
        trace.extend(frames.iter().map(|frame| self.flatten_frame(frame)));

        log::trace!(
            "Flattened {} frame(s) for {}",
            trace.len(),
            error.type_name()
        );
        trace
    }

    /// Flatten one native frame. Arguments get a fresh traversal budget.
    pub fn flatten_frame(&self, frame: &StackFrame) -> TraceFrame {
        TraceFrame {
            declaring_type: frame.declaring_type.clone(),
            call_type: frame.call_type,
            function: (!frame.function.is_empty()).then(|| frame.function.clone()),
            arguments: frame
                .arguments
                .as_deref()
                .map(flatten_arguments)
                .unwrap_or_default(),
            file: frame.file.clone(),
            line: frame.line,
        }
    }
}

/// Flatten `error` with the default flattener.
pub fn flatten(error: &dyn RaisedError) -> ErrorSnapshot {
    TraceFlattener::default().flatten(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CallType;
    use crate::raised::ErrorRecord;
    use crate::value::Value;

    /// An error that claims to be its own cause.
    struct Ouroboros;

    impl RaisedError for Ouroboros {
        fn type_name(&self) -> &str {
            "Ouroboros"
        }
        fn message(&self) -> &str {
            "again"
        }
        fn file(&self) -> &str {
            "loop.rs"
        }
        fn line(&self) -> u32 {
            1
        }
        fn cause(&self) -> Option<&dyn RaisedError> {
            Some(self)
        }
    }

    #[test]
    fn test_origin_frame_comes_first() {
        let error = ErrorRecord::new("E", "m")
            .at("src/a.rs", 3)
            .with_frame(StackFrame::new("f").at("src/b.rs", 9));

        let trace = TraceFlattener::new().flatten_trace(&error);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].file.as_deref(), Some("src/a.rs"));
        assert_eq!(trace[0].line, Some(3));
        assert!(trace[0].function.is_none());
        assert_eq!(trace[1].function.as_deref(), Some("f"));
    }

    #[test]
    fn test_frame_fields_are_copied() {
        let frame = StackFrame::new("save")
            .with_class("Store", CallType::Static)
            .with_arguments([Value::Int(1)]);

        let flattened = TraceFlattener::new().flatten_frame(&frame);
        assert_eq!(flattened.declaring_type.as_deref(), Some("Store"));
        assert_eq!(flattened.call_type, Some(CallType::Static));
        assert_eq!(flattened.arguments.len(), 1);
        assert!(flattened.file.is_none());
        assert!(flattened.line.is_none());
    }

    #[test]
    fn test_empty_function_name_is_dropped() {
        let frame = StackFrame {
            file: Some("a.rs".to_string()),
            line: Some(3),
            ..StackFrame::default()
        };

        let flattened = TraceFlattener::new().flatten_frame(&frame);
        assert!(flattened.function.is_none());
        assert!(!flattened.has_function());
        assert!(flattened.has_file());
    }

    #[test]
    fn test_missing_arguments_flatten_to_empty() {
        let flattened = TraceFlattener::new().flatten_frame(&StackFrame::new("f"));
        assert!(flattened.arguments.is_empty());
    }

    #[test]
    fn test_self_causing_error_terminates() {
        let snapshot = TraceFlattener::new()
            .with_max_cause_depth(5)
            .flatten(&Ouroboros);
        assert_eq!(snapshot.chain_len(), 5);
    }

    #[test]
    fn test_no_cause() {
        let snapshot = flatten(&ErrorRecord::new("E", "m"));
        assert!(snapshot.cause().is_none());
        assert_eq!(snapshot.chain_len(), 1);
    }
}
