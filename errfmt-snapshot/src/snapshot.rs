//! Serializable error snapshots.
//!
//! An `ErrorSnapshot` holds only plain data (strings, integers, sequences
//! and ordered mappings) and can be saved and restored without the error it
//! was built from.
//!
//! # Serialization compatibility
//!
//! The cause chain is written flat: the outermost error's fields at the top
//! level, followed by a `causes` sequence ordered outermost first. Nesting
//! depth of the output therefore does not grow with the chain length.
//!
//! The memoized trace text is never written out; it is derived from `trace`
//! again after a restore.

use crate::error::Result;
use crate::frame::TraceFrame;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Write as _;
use std::sync::OnceLock;

/// Flattened record of a raised error and its cause chain.
#[derive(Debug, Clone)]
pub struct ErrorSnapshot {
    type_name: String,
    message: String,
    code: i64,
    file: String,
    line: u32,
    trace: Vec<TraceFrame>,
    cause: Option<Box<ErrorSnapshot>>,
    trace_text: OnceLock<String>,
}

impl ErrorSnapshot {
    /// Create a snapshot with no cause.
    pub fn new(
        type_name: impl Into<String>,
        message: impl Into<String>,
        code: i64,
        file: impl Into<String>,
        line: u32,
        trace: Vec<TraceFrame>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            code,
            file: file.into(),
            line,
            trace,
            cause: None,
            trace_text: OnceLock::new(),
        }
    }

    /// Replace the cause.
    pub fn with_cause(mut self, cause: Option<ErrorSnapshot>) -> Self {
        self.cause = cause.map(Box::new);
        self
    }

    /// Split off the cause, leaving this snapshot without one.
    pub fn take_cause(&mut self) -> Option<ErrorSnapshot> {
        self.cause.take().map(|cause| *cause)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Flattened trace, starting with the synthetic origin frame.
    pub fn trace(&self) -> &[TraceFrame] {
        &self.trace
    }

    pub fn cause(&self) -> Option<&ErrorSnapshot> {
        self.cause.as_deref()
    }

    /// Iterate over this snapshot followed by every cause, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &ErrorSnapshot> {
        std::iter::successors(Some(self), |snapshot| snapshot.cause())
    }

    /// Number of errors in the chain, this one included.
    pub fn chain_len(&self) -> usize {
        self.chain().count()
    }

    /// Plain-text trace, computed on first access.
    ///
    /// ```text
    /// #0 src/store.rs(40): app::Store->save()
    /// #1 [internal function]: run()
    /// #2 {main}
    /// ```
    pub fn trace_text(&self) -> &str {
        self.trace_text.get_or_init(|| plain_trace_text(&self.trace))
    }

    /// Serialize the snapshot to JSON.
    pub fn save(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the snapshot to indented JSON.
    pub fn save_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a snapshot from JSON produced by `save`.
    pub fn restore(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One error of a chain, as written.
#[derive(Serialize)]
struct RecordRef<'a> {
    type_name: &'a str,
    message: &'a str,
    code: i64,
    file: &'a str,
    line: u32,
    trace: &'a [TraceFrame],
}

#[derive(Serialize)]
struct ChainRef<'a> {
    #[serde(flatten)]
    head: RecordRef<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    causes: Vec<RecordRef<'a>>,
}

/// One error of a chain, as read.
#[derive(Deserialize)]
struct Record {
    type_name: String,
    message: String,
    #[serde(default)]
    code: i64,
    file: String,
    line: u32,
    #[serde(default)]
    trace: Vec<TraceFrame>,
}

#[derive(Deserialize)]
struct Chain {
    #[serde(flatten)]
    head: Record,
    #[serde(default)]
    causes: Vec<Record>,
}

impl ErrorSnapshot {
    fn record(&self) -> RecordRef<'_> {
        RecordRef {
            type_name: &self.type_name,
            message: &self.message,
            code: self.code,
            file: &self.file,
            line: self.line,
            trace: &self.trace,
        }
    }
}

impl From<Record> for ErrorSnapshot {
    fn from(record: Record) -> Self {
        Self::new(
            record.type_name,
            record.message,
            record.code,
            record.file,
            record.line,
            record.trace,
        )
    }
}

impl Serialize for ErrorSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ChainRef {
            head: self.record(),
            causes: self.chain().skip(1).map(|cause| cause.record()).collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ErrorSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let Chain { head, causes } = Chain::deserialize(deserializer)?;
        let cause = causes
            .into_iter()
            .rev()
            .fold(None, |inner, record| Some(Self::from(record).with_cause(inner)));
        Ok(Self::from(head).with_cause(cause))
    }
}

impl PartialEq for ErrorSnapshot {
    // The trace text cache is derived and not compared.
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.message == other.message
            && self.code == other.code
            && self.file == other.file
            && self.line == other.line
            && self.trace == other.trace
            && self.cause == other.cause
    }
}

fn plain_trace_text(trace: &[TraceFrame]) -> String {
    let mut text = String::new();
    let calls = trace.iter().skip(1);
    let mut count = 0;

    for (i, frame) in calls.enumerate() {
        count = i + 1;
        let location = match (&frame.file, frame.line) {
            (Some(file), line) if !file.is_empty() => {
                format!("{}({})", file, line.unwrap_or_default())
            }
            _ => "[internal function]".to_string(),
        };
        let _ = writeln!(
            text,
            "#{} {}: {}{}{}()",
            i,
            location,
            frame.declaring_type.as_deref().unwrap_or_default(),
            frame.call_type.map(|c| c.marker()).unwrap_or_default(),
            frame.function.as_deref().unwrap_or_default(),
        );
    }

    let _ = write!(text, "#{} {{main}}", count);
    text
}
