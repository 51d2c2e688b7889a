//! JSON document model.
//!
//! A [`Document`] is one composite JSON value: either an object (ordered
//! key/value pairs) or an array (ordered elements). Its kind is chosen at
//! construction and never changes. Leaf values are represented by [`Value`].
//!
//! The model carries no parsing logic; [`crate::JsonReader`] builds documents
//! and [`crate::adapter`] turns values back into text.
//!
//! # Examples
//!
//! ```
//! use robowire::{Document, Value};
//!
//! let mut doc = Document::new_object();
//! doc.add("value", "move").unwrap();
//! doc.add("speed", 3).unwrap();
//! assert_eq!(doc.to_string(), r#"{"value":"move","speed":3}"#);
//! assert!(doc.push(Value::Null).is_err());
//! ```
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use thiserror::Error;

/// The two structural kinds a [`Document`] can take.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Object => f.write_str("object"),
            DocumentKind::Array => f.write_str("array"),
        }
    }
}

/// Using a document in a way its kind does not allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A keyed insert on an array, or a keyless one on an object.
    #[error("cannot {operation} on a JSON {actual}")]
    KindMismatch {
        /// What was attempted, phrased for the error message.
        operation: &'static str,
        /// Kind of the document it was attempted on.
        actual: DocumentKind,
    },
}

/// A value stored inside a [`Document`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// A number without fraction or exponent that fits in `i64`.
    Integer(i64),
    /// Any other number.
    Float(f64),
    /// A string, already unescaped.
    String(String),
    /// A nested object or array.
    Document(Document),
}

impl Value {
    /// Short name of the value's JSON type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Document(doc) => match doc.kind() {
                DocumentKind::Object => "object",
                DocumentKind::Array => "array",
            },
        }
    }

    /// `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string contents, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is one. Floats are not truncated.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value. Integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The nested document, if this is one.
    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Self::Document(v)
    }
}

/// Object pairs in insertion order, plus a key index so inserts and lookups
/// do not scan the pairs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
struct ObjectEntries {
    pairs: Vec<(String, Value)>,
    index: BTreeMap<String, usize>,
}

impl PartialEq for ObjectEntries {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl ObjectEntries {
    fn insert(&mut self, key: String, value: Value) {
        if let Some(&at) = self.index.get(&key) {
            self.pairs[at].1 = value;
        } else {
            self.index.insert(key.clone(), self.pairs.len());
            self.pairs.push((key, value));
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&at| &self.pairs[at].1)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
enum Entries {
    Object(ObjectEntries),
    Array(Vec<Value>),
}

/// A parsed JSON object or array.
///
/// Documents are append-only: object keys can be overwritten (the entry keeps
/// its original position) and array elements can be pushed, but nothing can
/// be removed and the kind is fixed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    entries: Entries,
}

impl Document {
    /// Creates an empty object.
    #[must_use]
    pub fn new_object() -> Self {
        Self {
            entries: Entries::Object(ObjectEntries::default()),
        }
    }

    /// Creates an empty array.
    #[must_use]
    pub fn new_array() -> Self {
        Self {
            entries: Entries::Array(Vec::new()),
        }
    }

    /// Creates an empty document of the given kind.
    #[must_use]
    pub fn with_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Object => Self::new_object(),
            DocumentKind::Array => Self::new_array(),
        }
    }

    /// Object or array, as fixed at construction.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        match self.entries {
            Entries::Object(_) => DocumentKind::Object,
            Entries::Array(_) => DocumentKind::Array,
        }
    }

    /// `true` when [`Self::kind`] is [`DocumentKind::Object`].
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.kind() == DocumentKind::Object
    }

    /// `true` when [`Self::kind`] is [`DocumentKind::Array`].
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.kind() == DocumentKind::Array
    }

    /// Number of entries (object) or elements (array).
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Object(object) => object.pairs.len(),
            Entries::Array(items) => items.len(),
        }
    }

    /// `true` when there are no entries or elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binds `value` to `key`. A repeated key overwrites the earlier value.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::KindMismatch`] on an array document.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), StructureError> {
        let Entries::Object(object) = &mut self.entries else {
            return Err(StructureError::KindMismatch {
                operation: "add a keyed entry",
                actual: DocumentKind::Array,
            });
        };
        object.insert(key.into(), value.into());
        Ok(())
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::KindMismatch`] on an object document.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), StructureError> {
        let Entries::Array(items) = &mut self.entries else {
            return Err(StructureError::KindMismatch {
                operation: "append an element",
                actual: DocumentKind::Object,
            });
        };
        items.push(value.into());
        Ok(())
    }

    /// Looks up an object entry. Always `None` for arrays.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.entries {
            Entries::Object(object) => object.get(key),
            Entries::Array(_) => None,
        }
    }

    /// Looks up an array element. Always `None` for objects.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match &self.entries {
            Entries::Array(items) => items.get(index),
            Entries::Object(_) => None,
        }
    }

    /// The string bound to `key`, if any.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The integer bound to `key`, if any.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// The number bound to `key`, if any. Integers are widened.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// The boolean bound to `key`, if any.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// The nested document bound to `key`, if any.
    #[must_use]
    pub fn get_document(&self, key: &str) -> Option<&Document> {
        self.get(key).and_then(Value::as_document)
    }

    /// Object entries in insertion order; empty for arrays.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        let pairs: &[(String, Value)] = match &self.entries {
            Entries::Object(object) => &object.pairs,
            Entries::Array(_) => &[],
        };
        pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Array elements in order; empty for objects.
    pub fn elements(&self) -> impl Iterator<Item = &Value> {
        let items: &[Value] = match &self.entries {
            Entries::Array(items) => items,
            Entries::Object(_) => &[],
        };
        items.iter()
    }

    /// Object keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(k, _)| k)
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes and control characters are escaped; the Unicode line
/// separators U+2028/U+2029 are written as `\u` escapes for older readers.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Writes a finite float so that it reads back as a float: the output always
/// carries a `.` or an exponent.
pub(crate) fn write_float<W: fmt::Write>(n: f64, f: &mut W) -> fmt::Result {
    write!(f, "{n:?}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => write!(f, "{n}"),
            // Non-finite numbers have no JSON spelling.
            Value::Float(n) if !n.is_finite() => f.write_str("null"),
            Value::Float(n) => write_float(*n, f),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Document(doc) => doc.fmt(f),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entries {
            Entries::Array(items) => {
                f.write_str("[")?;
                let mut first = true;
                for v in items {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Entries::Object(object) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in &object.pairs {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn object_rejects_keyless_add() {
        let mut doc = Document::new_object();
        let err = doc.push(1).unwrap_err();
        assert_eq!(err.to_string(), "cannot append an element on a JSON object");
        assert!(doc.is_empty());
    }

    #[test]
    fn array_rejects_keyed_add() {
        let mut doc = Document::new_array();
        assert!(matches!(
            doc.add("a", 1),
            Err(StructureError::KindMismatch { actual: DocumentKind::Array, .. })
        ));
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut doc = Document::new_object();
        doc.add("a", 1).unwrap();
        doc.add("b", 2).unwrap();
        doc.add("a", "x").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(doc.get_str("a"), Some("x"));
    }

    #[test]
    fn many_keys_with_overwrites() {
        let mut doc = Document::new_object();
        for i in 0..5000 {
            doc.add(alloc::format!("k{i}"), i).unwrap();
        }
        for i in (0..5000).step_by(7) {
            doc.add(alloc::format!("k{i}"), "again").unwrap();
        }
        assert_eq!(doc.len(), 5000);
        assert_eq!(doc.keys().nth(4999), Some("k4999"));
        assert_eq!(doc.get_str("k0"), Some("again"));
        assert_eq!(doc.get_i64("k4998"), Some(4998));
        assert_eq!(doc.get("k5000"), None);
    }

    #[test]
    fn float_rendering_stays_float() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::Float(f64::NAN).to_string(), "null");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
    }

    #[test]
    fn escapes_control_characters() {
        let v = Value::from("a\"b\\c\n\u{1}");
        assert_eq!(v.to_string(), r#""a\"b\\c\n\u0001""#);
    }

    #[test]
    fn typed_getters() {
        let mut inner = Document::new_array();
        inner.push(true).unwrap();
        let mut doc = Document::new_object();
        doc.add("n", 3).unwrap();
        doc.add("f", 1.5).unwrap();
        doc.add("b", false).unwrap();
        doc.add("list", inner).unwrap();
        assert_eq!(doc.get_i64("n"), Some(3));
        assert_eq!(doc.get_f64("n"), Some(3.0));
        assert_eq!(doc.get_f64("f"), Some(1.5));
        assert_eq!(doc.get_bool("b"), Some(false));
        assert_eq!(doc.get_document("list").and_then(|d| d.get_index(0)), Some(&Value::Boolean(true)));
        assert_eq!(doc.get_index(0), None);
    }
}
