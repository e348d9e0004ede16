//! Flattened stack frames.

use crate::descriptor::Arguments;
use serde::{Deserialize, Serialize};

/// How a function was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    /// Associated function, no receiver
    Static,
    /// Method call on an instance
    Instance,
}

impl CallType {
    /// Separator placed between the declaring type and the function name.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Static => "::",
            Self::Instance => "->",
        }
    }
}

/// One flattened stack frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Type declaring the called function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_type: Option<CallType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Flattened arguments, in call order
    #[serde(default)]
    pub arguments: Arguments,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl TraceFrame {
    /// The synthetic first frame: where the error originated, with no call.
    pub fn origin(file: &str, line: u32) -> Self {
        Self {
            file: (!file.is_empty()).then(|| file.to_string()),
            line: Some(line),
            ..Self::default()
        }
    }

    /// Whether the frame records a function call.
    pub fn has_function(&self) -> bool {
        self.function.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Whether the frame records a source location.
    pub fn has_file(&self) -> bool {
        self.file.as_deref().is_some_and(|f| !f.is_empty())
    }
}
