//! Live host values passed as stack-frame arguments.
//!
//! Arrays and objects are shared handles, so argument graphs may alias and
//! even contain themselves. Nothing here calls back into user code: objects
//! expose only their class name and resources only their category label.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Key of an argument list or array entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentKey {
    /// Positional entry
    Index(i64),
    /// Named entry
    Name(String),
}

impl ArgumentKey {
    /// Whether the key is an integer index.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ArgumentKey {
    fn from(i: i64) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for ArgumentKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ArgumentKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Ordered entries of an argument list or array.
pub type Entries = Vec<(ArgumentKey, Value)>;

/// A live runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Byte string that may not be valid UTF-8
    Bytes(Vec<u8>),
    Array(ArrayRef),
    Object(ObjectRef),
    /// An object whose class definition is not available
    Incomplete { class: String },
    Resource(ResourceRef),
}

impl Value {
    /// Build an array value from positional items.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Array(ArrayRef::from_values(items))
    }

    /// Build an object value of the given class.
    pub fn object(class: impl Into<String>) -> Self {
        Self::Object(ObjectRef::new(class))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Shared, mutable array handle.
///
/// Cloning the handle aliases the same storage, which is how cyclic
/// argument graphs are built.
#[derive(Clone, Default)]
pub struct ArrayRef(Arc<RwLock<Entries>>);

impl ArrayRef {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array of positional items keyed 0, 1, 2...
    pub fn from_values<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(i, value)| (ArgumentKey::Index(i as i64), value))
            .collect();
        Self::from_entries(entries)
    }

    /// Create an array from keyed entries.
    pub fn from_entries(entries: Entries) -> Self {
        Self(Arc::new(RwLock::new(entries)))
    }

    /// Append a value under the next free integer key.
    pub fn push(&self, value: impl Into<Value>) {
        let mut entries = self.0.write();
        let next = entries
            .iter()
            .filter_map(|(key, _)| match key {
                ArgumentKey::Index(i) => Some(*i + 1),
                ArgumentKey::Name(_) => None,
            })
            .max()
            .unwrap_or(0);
        entries.push((ArgumentKey::Index(next), value.into()));
    }

    /// Insert or replace the value under `key`.
    pub fn insert(&self, key: impl Into<ArgumentKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.0.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Run `f` over the entries while holding a shared lock.
    ///
    /// Uses a recursive read so an array that contains itself can be visited
    /// while an outer visit still holds the lock.
    pub fn with_entries<R>(&self, f: impl FnOnce(&[(ArgumentKey, Value)]) -> R) -> R {
        let entries = self.0.read_recursive();
        f(&entries)
    }
}

impl fmt::Debug for ArrayRef {
    // Entries are not printed: the array may contain itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRef")
            .field("len", &self.0.read_recursive().len())
            .finish()
    }
}

struct ObjectData {
    class: String,
    properties: RwLock<Vec<(String, Value)>>,
}

/// Shared object handle.
///
/// Properties may be set (and may point back at the object), but are never
/// read while flattening.
#[derive(Clone)]
pub struct ObjectRef(Arc<ObjectData>);

impl ObjectRef {
    /// Create an object of the given class with no properties.
    pub fn new(class: impl Into<String>) -> Self {
        Self(Arc::new(ObjectData {
            class: class.into(),
            properties: RwLock::new(Vec::new()),
        }))
    }

    /// Fully qualified class name.
    pub fn class(&self) -> &str {
        &self.0.class
    }

    /// Set a property.
    pub fn set_property(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        let mut properties = self.0.properties.write();
        match properties.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => properties.push((name, value)),
        }
    }

    /// Number of properties set on the object.
    pub fn property_count(&self) -> usize {
        self.0.properties.read_recursive().len()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("class", &self.0.class)
            .field("properties", &self.property_count())
            .finish()
    }
}

#[derive(Debug)]
struct ResourceData {
    category: String,
    open: AtomicBool,
}

/// Handle to an external resource such as a stream or socket.
#[derive(Debug, Clone)]
pub struct ResourceRef(Arc<ResourceData>);

impl ResourceRef {
    /// Category reported once a resource has been closed.
    pub const CLOSED_CATEGORY: &'static str = "Unknown";

    /// Create an open resource of the given category (e.g. `"stream"`).
    pub fn new(category: impl Into<String>) -> Self {
        Self(Arc::new(ResourceData {
            category: category.into(),
            open: AtomicBool::new(true),
        }))
    }

    /// Category label; closed resources report `"Unknown"`.
    pub fn category(&self) -> &str {
        if self.is_open() {
            &self.0.category
        } else {
            Self::CLOSED_CATEGORY
        }
    }

    pub fn is_open(&self) -> bool {
        self.0.open.load(Ordering::Acquire)
    }

    /// Mark the resource closed.
    pub fn close(&self) {
        self.0.open.store(false, Ordering::Release);
    }
}
