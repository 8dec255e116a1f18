//! Value enum for dynamic field values

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by a [`Record`](crate::Record) field or read from a
/// form control.
///
/// Controls only ever produce `String` (text inputs, textareas, selects) or
/// `Bool` (checkboxes, radios). The other variants come from programmatic
/// record data. An absent record entry is treated like `Null`.
///
/// # Example
///
/// ```
/// use formview::Value;
///
/// let name = Value::from("Ada");
/// let age = Value::from(36);
/// let subscribed = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Length of a string (in characters) or list. Other values have none.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// The text a pattern rule is tested against. Scalars render as their
    /// string form; null and composite values have no text.
    pub fn text(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::String(s) => Some(s.clone()),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Render this value for writing into a form control.
    pub fn to_form_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::List(items) => items
                .iter()
                .map(Value::to_form_string)
                .collect::<Vec<_>>()
                .join(","),
            Value::Map(_) => serde_json::to_string(self).unwrap_or_default(),
            scalar => scalar.text().unwrap_or_default(),
        }
    }

    /// Loose equality as used by the `matches` rule.
    ///
    /// Strings compared with numbers or booleans are converted to numbers,
    /// booleans count as `1`/`0`, and `Null` only equals `Null`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(b), other) | (other, Value::Bool(b)) => {
                Value::Float(if *b { 1.0 } else { 0.0 }).loose_eq(other)
            }
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Map(_), _) | (_, Value::Map(_)) => false,
            (Value::List(_), other) => Value::String(self.to_form_string()).loose_eq(other),
            (_, Value::List(_)) => other.loose_eq(self),
            (a, b) => match (a.to_number(), b.to_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }

    /// Numeric conversion used by loose comparisons. Blank strings count as zero.
    fn to_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse().ok()
                }
            }
            _ => None,
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_eq_same_type() {
        assert!(Value::from("foo").loose_eq(&Value::from("foo")));
        assert!(!Value::from("foo").loose_eq(&Value::from("bar")));
        assert!(Value::Null.loose_eq(&Value::Null));
    }

    #[test]
    fn test_loose_eq_numbers_and_strings() {
        assert!(Value::from(42).loose_eq(&Value::from("42")));
        assert!(Value::from("4.5").loose_eq(&Value::from(4.5)));
        assert!(Value::from(0).loose_eq(&Value::from("")));
        assert!(!Value::from(42).loose_eq(&Value::from("forty-two")));
    }

    #[test]
    fn test_loose_eq_booleans() {
        assert!(Value::from(true).loose_eq(&Value::from(1)));
        assert!(Value::from(false).loose_eq(&Value::from("0")));
        assert!(!Value::from(true).loose_eq(&Value::from("true")));
    }

    #[test]
    fn test_loose_eq_null_only_matches_null() {
        assert!(!Value::Null.loose_eq(&Value::from("")));
        assert!(!Value::from(0).loose_eq(&Value::Null));
    }

    #[test]
    fn test_loose_eq_lists_compare_as_text() {
        let list = Value::from(vec!["a", "b"]);
        assert!(list.loose_eq(&Value::from("a,b")));
        assert!(Value::from("a,b").loose_eq(&list));
        assert!(!list.loose_eq(&Value::from(vec!["b", "a"])));
    }

    #[test]
    fn test_form_string() {
        assert_eq!(Value::Null.to_form_string(), "");
        assert_eq!(Value::from(3.0).to_form_string(), "3");
        assert_eq!(Value::from(2.5).to_form_string(), "2.5");
        assert_eq!(Value::from(vec![1, 2]).to_form_string(), "1,2");
    }
}
