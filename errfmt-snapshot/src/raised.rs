//! The raised-error input model.
//!
//! `RaisedError` is the capability set the flattener reads from. Hosts either
//! implement it for their own error types or build an `ErrorRecord`.

use crate::flatten::MAX_CAUSE_DEPTH;
use crate::frame::CallType;
use crate::value::{ArgumentKey, Entries, Value};
use std::panic::Location;

/// One native stack frame of a raised error.
#[derive(Debug, Clone, Default)]
pub struct StackFrame {
    pub declaring_type: Option<String>,
    pub call_type: Option<CallType>,
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    /// Raw arguments; `None` when the host did not capture them
    pub arguments: Option<Entries>,
}

impl StackFrame {
    /// Create a frame for a free function call.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            ..Self::default()
        }
    }

    /// Set the declaring type and call type.
    pub fn with_class(mut self, declaring_type: impl Into<String>, call_type: CallType) -> Self {
        self.declaring_type = Some(declaring_type.into());
        self.call_type = Some(call_type);
        self
    }

    /// Set the call site.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Set positional arguments keyed 0, 1, 2...
    pub fn with_arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.arguments = Some(
            arguments
                .into_iter()
                .enumerate()
                .map(|(i, value)| (ArgumentKey::Index(i as i64), value))
                .collect(),
        );
        self
    }

    /// Set keyed arguments.
    pub fn with_entries(mut self, entries: Entries) -> Self {
        self.arguments = Some(entries);
        self
    }
}

/// A raised error as seen by the flattener.
pub trait RaisedError {
    /// Fully qualified type name of the error.
    fn type_name(&self) -> &str;

    fn message(&self) -> &str;

    /// Numeric error code; 0 when the error has none.
    fn code(&self) -> i64 {
        0
    }

    /// File where the error was raised.
    fn file(&self) -> &str;

    /// Line where the error was raised.
    fn line(&self) -> u32;

    /// Native call stack, innermost frame first.
    fn frames(&self) -> &[StackFrame] {
        &[]
    }

    /// The error that caused this one, if any.
    fn cause(&self) -> Option<&dyn RaisedError> {
        None
    }
}

/// Type name given to causes captured from `std::error::Error::source`.
pub const SOURCE_TYPE_NAME: &str = "core::error::Error";

/// An owned raised error.
#[derive(Debug, Clone, Default)]
pub struct ErrorRecord {
    pub type_name: String,
    pub message: String,
    pub code: i64,
    pub file: String,
    pub line: u32,
    pub frames: Vec<StackFrame>,
    pub cause: Option<Box<ErrorRecord>>,
}

impl ErrorRecord {
    /// Create a record with the given type name and message.
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Set where the error was raised.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    /// Append a stack frame (innermost first).
    pub fn with_frame(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn with_cause(mut self, cause: ErrorRecord) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Capture a `std::error::Error` at the caller's location.
    ///
    /// The type name comes from `std::any::type_name`, the message from
    /// `Display`, and the cause chain from `source()`. Causes are only known
    /// as trait objects, so they are recorded under `SOURCE_TYPE_NAME` with no
    /// location. At most `MAX_CAUSE_DEPTH` errors are recorded, so a
    /// `source()` chain that loops back on itself still terminates.
    #[track_caller]
    pub fn capture<E>(error: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        let location = Location::caller();
        let mut record = Self::new(std::any::type_name::<E>(), error.to_string())
            .at(location.file(), location.line());

        let mut sources = Vec::new();
        let mut current = error.source();
        while let Some(source) = current {
            if sources.len() + 1 >= MAX_CAUSE_DEPTH {
                log::warn!(
                    "Source chain of {} exceeds {} errors, truncating",
                    record.type_name,
                    MAX_CAUSE_DEPTH
                );
                break;
            }
            sources.push(Self::new(SOURCE_TYPE_NAME, source.to_string()));
            current = source.source();
        }

        record.cause = sources.into_iter().rev().fold(None, |cause, mut source| {
            source.cause = cause.map(Box::new);
            Some(source)
        })
        .map(Box::new);

        record
    }
}

impl RaisedError for ErrorRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> i64 {
        self.code
    }

    fn file(&self) -> &str {
        &self.file
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    fn cause(&self) -> Option<&dyn RaisedError> {
        self.cause.as_deref().map(|c| c as &dyn RaisedError)
    }
}
