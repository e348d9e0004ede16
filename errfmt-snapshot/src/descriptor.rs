//! Value classification.
//!
//! A `ValueDescriptor` is an owned, serializable stand-in for one live
//! `Value`. Classification only inspects intrinsic data (variant, class
//! name, resource category) and is bounded in both depth and volume, so it
//! terminates on self-referencing or very large argument graphs.

use crate::value::{ArgumentKey, Value};
use serde::{Deserialize, Serialize};

/// Arrays met at a nesting level above this one are replaced by
/// `DEEP_NESTED_MARKER`. The top-level argument list is level 0.
pub const MAX_NESTING_LEVEL: usize = 10;

/// Maximum number of entries visited while flattening one argument list.
pub const MAX_VISITED_ENTRIES: usize = 10_000;

/// Sentinel substituted for arrays nested deeper than `MAX_NESTING_LEVEL`.
pub const DEEP_NESTED_MARKER: &str = "*DEEP NESTED ARRAY*";

/// Sentinel substituted once `MAX_VISITED_ENTRIES` is exceeded.
pub const SKIPPED_MARKER: &str = "*SKIPPED over 10000 entries*";

/// Label written for a NaN float.
pub const NAN_LABEL: &str = "NAN";

/// Label written for positive infinity.
pub const INF_LABEL: &str = "INF";

/// Label written for negative infinity.
pub const NEG_INF_LABEL: &str = "-INF";

/// Label for a float JSON cannot hold as a number, `None` when finite.
pub fn float_label(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN_LABEL)
    } else if value == f64::INFINITY {
        Some(INF_LABEL)
    } else if value == f64::NEG_INFINITY {
        Some(NEG_INF_LABEL)
    } else {
        None
    }
}

/// Flattened, ordered argument list.
pub type Arguments = Vec<(ArgumentKey, ValueDescriptor)>;

/// Kind tag of a `ValueDescriptor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
    Resource,
    IncompleteObject,
    Unknown,
}

impl ValueKind {
    /// Tag as used in serialized snapshots and argument template keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Resource => "resource",
            Self::IncompleteObject => "incomplete-object",
            Self::Unknown => "unknown",
        }
    }
}

/// Payload of an array descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrayPayload {
    /// Flattened entries
    Entries(Arguments),
    /// Sentinel marker standing in for data past a traversal bound
    Marker(String),
}

/// Owned description of a single runtime value.
///
/// Serialized as `{"kind": "...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum ValueDescriptor {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Non-finite values are written as `NAN_LABEL`, `INF_LABEL` or
    /// `NEG_INF_LABEL`
    Float(#[serde(with = "float_repr")] f64),
    String(String),
    Array(ArrayPayload),
    /// Class name only
    Object(String),
    /// Category label only
    Resource(String),
    /// Class name of an object whose class is unavailable
    IncompleteObject(String),
    /// Any kind tag this version does not recognize
    #[serde(other)]
    Unknown,
}

impl ValueDescriptor {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Resource(_) => ValueKind::Resource,
            Self::IncompleteObject(_) => ValueKind::IncompleteObject,
            Self::Unknown => ValueKind::Unknown,
        }
    }

    fn marker(marker: &str) -> Self {
        Self::Array(ArrayPayload::Marker(marker.to_string()))
    }

    /// Classify `value` found at nesting `level`.
    ///
    /// Checks run in a fixed order: array, incomplete object, object, null,
    /// boolean, integer, float, resource, then string coercion for anything
    /// else.
    pub fn describe(value: &Value, level: usize, budget: &mut TraversalBudget) -> Self {
        match value {
            Value::Array(array) => {
                if level <= MAX_NESTING_LEVEL {
                    array.with_entries(|entries| {
                        Self::Array(ArrayPayload::Entries(flatten_entries(
                            entries,
                            level + 1,
                            budget,
                        )))
                    })
                } else {
                    log::debug!("Array nested past level {}, substituting marker", MAX_NESTING_LEVEL);
                    Self::marker(DEEP_NESTED_MARKER)
                }
            }
            Value::Incomplete { class } => Self::IncompleteObject(class.clone()),
            Value::Object(object) => Self::Object(object.class().to_string()),
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Int(i) => Self::Integer(*i),
            Value::Float(f) => Self::Float(*f),
            Value::Resource(resource) => Self::Resource(resource.category().to_string()),
            Value::Str(s) => Self::String(s.clone()),
            Value::Bytes(bytes) => Self::String(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Float payloads as numbers, or as labels when not finite.
mod float_repr {
    use super::{INF_LABEL, NAN_LABEL, NEG_INF_LABEL, float_label};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        match float_label(*value) {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_f64(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    struct FloatVisitor;

    impl Visitor<'_> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "a number or one of \"{NAN_LABEL}\", \"{INF_LABEL}\", \"{NEG_INF_LABEL}\""
            )
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
            match value {
                NAN_LABEL => Ok(f64::NAN),
                INF_LABEL => Ok(f64::INFINITY),
                NEG_INF_LABEL => Ok(f64::NEG_INFINITY),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }
}

/// Shared visit counter for one argument-list traversal.
///
/// One budget is created per stack frame and threaded by `&mut` through the
/// whole recursive flattening of that frame's arguments.
#[derive(Debug, Default)]
pub struct TraversalBudget {
    visited: usize,
}

impl TraversalBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one visited entry; returns `false` once the budget is exceeded.
    pub fn visit(&mut self) -> bool {
        self.visited += 1;
        self.visited <= MAX_VISITED_ENTRIES
    }

    /// Entries visited so far.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

/// Flatten a top-level argument list with a fresh budget.
pub fn flatten_arguments(arguments: &[(ArgumentKey, Value)]) -> Arguments {
    flatten_entries(arguments, 0, &mut TraversalBudget::new())
}

/// Flatten `entries` found at nesting `level`.
///
/// When the budget runs out the entry being visited is replaced by
/// `SKIPPED_MARKER` and the rest of the list is dropped; enclosing lists stop
/// the same way on their next entry.
pub fn flatten_entries(
    entries: &[(ArgumentKey, Value)],
    level: usize,
    budget: &mut TraversalBudget,
) -> Arguments {
    let mut result = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        if !budget.visit() {
            log::debug!(
                "Argument traversal exceeded {} entries, skipping the rest",
                MAX_VISITED_ENTRIES
            );
            result.push((key.clone(), ValueDescriptor::marker(SKIPPED_MARKER)));
            break;
        }
        result.push((key.clone(), ValueDescriptor::describe(value, level, budget)));
    }

    result
}
