//! Query input values.
//!
//! Callers describe queries as nested documents: scalars, arrays and
//! key-ordered objects. The order of keys in a [`Document`] is significant,
//! it decides the order of implicit conjunctions and of inserted columns.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// A value in a query document.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Binary buffer.
    Binary(Vec<u8>),
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Key-ordered mapping.
    Object(Document),
}

/// The kind of a [`Value`], as named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Date,
    Buffer,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Buffer => "buffer",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Int(_) | Self::Float(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::Binary(_) => ValueKind::Buffer,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Returns true for null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for numbers, strings, booleans, dates and buffers.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_)
                | Self::Int(_)
                | Self::Float(_)
                | Self::Text(_)
                | Self::Date(_)
                | Self::Binary(_)
        )
    }

    /// Returns the string content, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the document, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Document> {
        match self {
            Self::Object(doc) => Some(doc),
            _ => None,
        }
    }

    /// Returns the value as an integer when it holds an integral number.
    ///
    /// Floats qualify when they have no fractional part and fit in `i64`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Some(*f as i64),
            _ => None,
        }
    }
}

/// An insertion-ordered map of string keys to values.
///
/// Equality is order-sensitive: two documents with the same entries in a
/// different order describe different queries.
#[derive(Debug, Clone, Default)]
pub struct Document {
    entries: IndexMap<String, Value>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Inserts a key, replacing the value in place when it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`Document::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the document has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the only entry when the document has exactly one key.
    #[must_use]
    pub fn single(&self) -> Option<(&str, &Value)> {
        if self.entries.len() == 1 {
            self.entries.first().map(|(k, v)| (k.as_str(), v))
        } else {
            None
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Self::Object(doc)
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

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

/// Converts JSON, keeping object key order.
///
/// Integers outside the `i64` range become floats and may lose precision.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(map.into_iter().collect()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_keeps_key_order() {
        let value = Value::from(json!({"b": 1, "a": 2, "c": 3}));
        let doc = value.as_object().unwrap();
        let keys: Vec<&str> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut doc = Document::new().with("a", 1).with("b", 2);
        doc.insert("a", 3);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("a"), Some(&Value::Int(3)));
        assert_eq!(doc.iter().next().map(|(k, _)| k), Some("a"));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab = Document::new().with("a", 1).with("b", 2);
        let ba = Document::new().with("b", 2).with("a", 1);
        assert_ne!(ab, ba);
        assert_eq!(ab, Document::new().with("a", 1).with("b", 2));
    }

    #[test]
    fn test_large_integer_becomes_float() {
        let value = Value::from(json!(u64::MAX));
        assert_eq!(value.kind(), ValueKind::Number);
        assert!(matches!(value, Value::Float(_)));
    }

    #[test]
    fn test_deserialize() {
        let value: Value = serde_json::from_str(r#"{"b": [1, null], "a": "x"}"#).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Value::Null.kind().as_str(), "null");
        assert_eq!(Value::Float(1.5).kind().as_str(), "number");
        assert_eq!(Value::Binary(vec![1]).kind().as_str(), "buffer");
        assert_eq!(Value::from(vec![Value::Int(1)]).kind().as_str(), "array");
        assert_eq!(Value::from(json!({})).kind().as_str(), "object");
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Value::Int(5).as_integer(), Some(5));
        assert_eq!(Value::Float(5.0).as_integer(), Some(5));
        assert_eq!(Value::Float(5.5).as_integer(), None);
        assert_eq!(Value::from("5").as_integer(), None);
    }

    #[test]
    fn test_single() {
        let doc = Document::new().with("a", 1);
        assert_eq!(doc.single(), Some(("a", &Value::Int(1))));
        assert_eq!(Document::new().single(), None);
    }
}
