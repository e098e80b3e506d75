//! Key-order-preserving JSON document model.
//!
//! PR saves are JSON objects in which most sub-structures are
//! themselves JSON-encoded *strings* ("double encoding"), and list
//! fields are wrapped a second time in a `{"target": [...]}` envelope.
//! The editor touches only a fraction of the fields, so everything it
//! does not understand must survive a parse → mutate → serialize cycle
//! with its key order intact. `serde_json` is built with
//! `preserve_order` and `arbitrary_precision` to guarantee exactly
//! that.

use serde_json::{Map, Value};

/// Field name of the list envelope convention.
pub const TARGET_KEY: &str = "target";

/// Errors from document parsing and field extraction
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root is {actual}, expected object")]
    NotAnObject { actual: &'static str },

    #[error("key {0:?} not found")]
    KeyNotFound(String),

    #[error("field {key:?}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{context}: expected {expected}, got {actual}")]
    ElementMismatch {
        context: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("field {key:?}: no {TARGET_KEY:?} entry in envelope")]
    TargetMissing { key: String },

    #[error("field {key:?}: array has {len} elements, need at least {need}")]
    ShortArray {
        key: String,
        len: usize,
        need: usize,
    },
}

/// Name of a JSON value's runtime type, for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An insertion-ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Document {
            entries: Map::new(),
        }
    }

    /// Parse a document from raw JSON bytes. The root must be an object.
    pub fn parse(bytes: &[u8]) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_root(value)
    }

    /// Parse a document from a JSON string.
    pub fn parse_str(s: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_root(value)
    }

    fn from_root(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(entries) => Ok(Document { entries }),
            other => Err(DocumentError::NotAnObject {
                actual: json_type(&other),
            }),
        }
    }

    /// Normalize a list entry into a document. Entries arrive as raw
    /// JSON strings in most saves, but some variants carry them as
    /// native objects.
    pub fn from_value(value: &Value, context: &str) -> Result<Self, DocumentError> {
        match value {
            Value::String(s) => Self::parse_str(s),
            Value::Object(entries) => Ok(Document {
                entries: entries.clone(),
            }),
            other => Err(DocumentError::ElementMismatch {
                context: context.to_string(),
                expected: "string or object",
                actual: json_type(other),
            }),
        }
    }

    /// Serialize preserving original key order.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(serde_json::to_vec(&self.entries)?)
    }

    /// The document as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn require(&self, key: &str) -> Result<&Value, DocumentError> {
        self.entries
            .get(key)
            .ok_or_else(|| DocumentError::KeyNotFound(key.to_string()))
    }

    /// Parse the JSON string stored under `key` as a nested document.
    ///
    /// This is the single primitive behind the format's double
    /// encoding; every extractor goes through it rather than poking at
    /// escaped strings directly.
    pub fn unwrap(&self, key: &str) -> Result<Document, DocumentError> {
        let value = self.require(key)?;
        let s = value.as_str().ok_or_else(|| DocumentError::TypeMismatch {
            key: key.to_string(),
            expected: "string",
            actual: json_type(value),
        })?;
        Document::parse_str(s)
    }

    /// Unwrap `key` and read the conventional `target` field from the
    /// resulting envelope.
    pub fn unwrap_target(&self, key: &str) -> Result<Value, DocumentError> {
        let envelope = self.unwrap(key)?;
        envelope
            .get(TARGET_KEY)
            .cloned()
            .ok_or_else(|| DocumentError::TargetMissing {
                key: key.to_string(),
            })
    }

    /// Serialize `doc` back into the string field `key`.
    pub fn rewrap(&mut self, key: &str, doc: &Document) -> Result<(), DocumentError> {
        let s = doc.to_json()?;
        self.set(key, Value::String(s));
        Ok(())
    }

    /// Replace only the `target` entry of the envelope stored under
    /// `key`, leaving sibling envelope fields untouched.
    pub fn set_target(&mut self, key: &str, value: Value) -> Result<(), DocumentError> {
        let mut envelope = self.unwrap(key)?;
        envelope.set(TARGET_KEY, value);
        self.rewrap(key, &envelope)
    }
}
