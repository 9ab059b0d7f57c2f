//! Record abstraction consumed by the table and tree widgets.
//!
//! Widgets are generic over [`RecordRow`], so hosts with concrete row types
//! implement the trait directly and get strongly typed callbacks and cell
//! renderers. Hosts working with schemaless data (search results, dynamic
//! entities) use the [`Record`] map type instead.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A row the engine can track.
///
/// Only identity and the optional parent reference are contractual; the rest
/// of the field set belongs to the implementor.
pub trait RecordRow: Clone + 'static {
    /// Stable row identity. Integer and string keys are both common; the
    /// `Ord` bound gives derived views a deterministic order.
    type Key: Clone + Eq + Hash + Ord + fmt::Debug;

    /// Unique identity of this record.
    fn key(&self) -> Self::Key;

    /// Identity of the parent record, if this record has one.
    ///
    /// A key that does not resolve to any record in the same set makes the
    /// record a root, same as returning `None`.
    fn parent_key(&self) -> Option<Self::Key> {
        None
    }

    /// Plain-text value of a named field, used by the default cell renderer
    /// when a column has no custom renderer.
    fn field_text(&self, _field: &str) -> Option<String> {
        None
    }
}

/// Identity of a dynamic [`Record`]: an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A dynamic field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    Text(String),
}

impl Value {
    /// Interpret this value as a record key, if it is key-shaped.
    pub fn as_key(&self) -> Option<Key> {
        match self {
            Self::Int(n) => Some(Key::Int(*n)),
            Self::Text(s) => Some(Key::Text(s.clone())),
            _ => None,
        }
    }

    /// Display form used by the default cell renderer.
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(n) => Self::Int(n),
            Key::Text(s) => Self::Text(s),
        }
    }
}

/// Default name of the field holding the parent reference.
pub const DEFAULT_PARENT_FIELD: &str = "parentId";

/// A dynamic record: identity plus a field-name → [`Value`] map.
///
/// The parent reference is read from a configurable field (`parentId` by
/// default), so heterogeneous backends that link rows through a different
/// field keep working without a bespoke row type.
///
/// # Example
///
/// ```
/// use trellis::record::{Record, RecordRow, Value};
///
/// let record = Record::new(7)
///     .set("name", "Contoso")
///     .set("parentId", Value::Int(1));
///
/// assert_eq!(record.parent_key(), Some(1i64.into()));
/// assert_eq!(record.field_text("name").as_deref(), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    key: Key,
    fields: HashMap<String, Value>,
    parent_field: String,
}

impl Record {
    /// Create a record with the given identity and no fields.
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            fields: HashMap::new(),
            parent_field: DEFAULT_PARENT_FIELD.to_string(),
        }
    }

    /// Use a different field as the parent reference.
    pub fn with_parent_field(mut self, field: impl Into<String>) -> Self {
        self.parent_field = field.into();
        self
    }

    /// Set a field value (builder style).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the record carries the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All field values.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Name of the field holding the parent reference.
    pub fn parent_field(&self) -> &str {
        &self.parent_field
    }
}

impl RecordRow for Record {
    type Key = Key;

    fn key(&self) -> Key {
        self.key.clone()
    }

    fn parent_key(&self) -> Option<Key> {
        self.fields.get(&self.parent_field).and_then(Value::as_key)
    }

    fn field_text(&self, field: &str) -> Option<String> {
        if field == "id" {
            return Some(self.key.to_string());
        }
        match self.fields.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.display_text()),
        }
    }
}
