//! Type-coercing field readers.
//!
//! The same logical field shows up as a native integer, a float, or a
//! base-10 numeric string depending on which platform wrote the save.
//! All of that inconsistency is absorbed here so the domain extractors
//! never branch on runtime JSON types themselves.

use serde_json::Value;

use crate::document::{json_type, Document, DocumentError};

fn mismatch(key: &str, expected: &'static str, value: &Value) -> DocumentError {
    DocumentError::TypeMismatch {
        key: key.to_string(),
        expected,
        actual: json_type(value),
    }
}

/// Coerce a bare JSON value to i64: integer, whole float, or numeric
/// string. Floats with a fractional part do not coerce.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            if let Some(u) = n.as_u64() {
                return i64::try_from(u).ok();
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 => Some(f as i64),
                _ => None,
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce a bare JSON value to u64 with the same rules as [`coerce_int`].
pub fn coerce_uint(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(u);
            }
            if let Some(i) = n.as_i64() {
                return u64::try_from(i).ok();
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= 0.0 => Some(f as u64),
                _ => None,
            }
        }
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Coerce a bare JSON value to f64: any number, or a numeric string.
pub fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Coerce an array element to i64, naming the element on failure.
pub fn element_int(value: &Value, context: &str, index: usize) -> Result<i64, DocumentError> {
    coerce_int(value).ok_or_else(|| DocumentError::ElementMismatch {
        context: format!("{context}[{index}]"),
        expected: "integer",
        actual: json_type(value),
    })
}

impl Document {
    pub fn get_str(&self, key: &str) -> Result<&str, DocumentError> {
        let value = self.require(key)?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    pub fn get_string(&self, key: &str) -> Result<String, DocumentError> {
        self.get_str(key).map(str::to_owned)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, DocumentError> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, "bool", value))
    }

    pub fn get_int(&self, key: &str) -> Result<i64, DocumentError> {
        let value = self.require(key)?;
        coerce_int(value).ok_or_else(|| mismatch(key, "integer", value))
    }

    pub fn get_uint(&self, key: &str) -> Result<u64, DocumentError> {
        let value = self.require(key)?;
        coerce_uint(value).ok_or_else(|| mismatch(key, "unsigned integer", value))
    }

    pub fn get_float(&self, key: &str) -> Result<f64, DocumentError> {
        let value = self.require(key)?;
        coerce_float(value).ok_or_else(|| mismatch(key, "number", value))
    }

    /// Loose boolean: a native bool, or any nonzero integer. Saves
    /// store the same flag either way depending on platform.
    pub fn get_flag(&self, key: &str) -> Result<bool, DocumentError> {
        if let Some(Value::Bool(b)) = self.get(key) {
            return Ok(*b);
        }
        Ok(self.get_int(key)? != 0)
    }

    pub fn get_array(&self, key: &str) -> Result<&Vec<Value>, DocumentError> {
        let value = self.require(key)?;
        value.as_array().ok_or_else(|| mismatch(key, "array", value))
    }

    pub fn get_int_array(&self, key: &str) -> Result<Vec<i64>, DocumentError> {
        let values = self.get_array(key)?;
        values
            .iter()
            .enumerate()
            .map(|(i, v)| element_int(v, key, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        Document::parse_str(json).unwrap()
    }

    #[test]
    fn test_get_int_coercions() {
        assert_eq!(doc(r#"{"v": 42}"#).get_int("v").unwrap(), 42);
        assert_eq!(doc(r#"{"v": 42.0}"#).get_int("v").unwrap(), 42);
        assert_eq!(doc(r#"{"v": "42"}"#).get_int("v").unwrap(), 42);
        assert_eq!(doc(r#"{"v": -7}"#).get_int("v").unwrap(), -7);
    }

    #[test]
    fn test_get_int_rejects_fractional_float() {
        let err = doc(r#"{"v": 42.7}"#).get_int("v").unwrap_err();
        assert!(matches!(err, DocumentError::TypeMismatch { .. }));
    }

    #[test]
    fn test_get_int_rejects_non_numeric_string() {
        let err = doc(r#"{"v": "not_a_number"}"#).get_int("v").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"v\""), "error should name the key: {msg}");
        assert!(msg.contains("string"), "error should name the type: {msg}");
    }

    #[test]
    fn test_get_int_missing_key() {
        let err = doc(r#"{"other": 1}"#).get_int("v").unwrap_err();
        assert!(matches!(err, DocumentError::KeyNotFound(_)));
    }

    #[test]
    fn test_get_uint() {
        assert_eq!(
            doc(r#"{"ticks": 638412345678901234}"#)
                .get_uint("ticks")
                .unwrap(),
            638412345678901234
        );
        assert_eq!(doc(r#"{"ticks": "999"}"#).get_uint("ticks").unwrap(), 999);
        assert!(doc(r#"{"ticks": -1}"#).get_uint("ticks").is_err());
    }

    #[test]
    fn test_get_float() {
        assert_eq!(doc(r#"{"v": 42.5}"#).get_float("v").unwrap(), 42.5);
        assert_eq!(doc(r#"{"v": 42}"#).get_float("v").unwrap(), 42.0);
        assert_eq!(doc(r#"{"v": "3.14"}"#).get_float("v").unwrap(), 3.14);
        assert!(doc(r#"{"v": true}"#).get_float("v").is_err());
    }

    #[test]
    fn test_get_flag() {
        assert!(!doc(r#"{"f": 0}"#).get_flag("f").unwrap());
        assert!(doc(r#"{"f": 1}"#).get_flag("f").unwrap());
        assert!(doc(r#"{"f": -3}"#).get_flag("f").unwrap());
        assert!(doc(r#"{"f": "2"}"#).get_flag("f").unwrap());
    }

    #[test]
    fn test_get_flag_accepts_native_bool() {
        assert!(doc(r#"{"f": true}"#).get_flag("f").unwrap());
        assert!(!doc(r#"{"f": false}"#).get_flag("f").unwrap());
    }

    #[test]
    fn test_get_bool_rejects_int() {
        let err = doc(r#"{"b": 1}"#).get_bool("b").unwrap_err();
        assert!(matches!(err, DocumentError::TypeMismatch { .. }));
    }

    #[test]
    fn test_get_int_array() {
        let values = doc(r#"{"a": [1, "2", 3.0]}"#).get_int_array("a").unwrap();
        assert_eq!(values, [1, 2, 3]);

        let err = doc(r#"{"a": [1, true]}"#).get_int_array("a").unwrap_err();
        assert!(err.to_string().contains("a[1]"));
    }
}
