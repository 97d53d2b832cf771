//! Typed option values.

use serde::{Deserialize, Serialize};

/// A single option value.
///
/// Options hold exactly one of three kinds of value. Validation dispatches
/// exhaustively on the kind, so there is no "unknown type" fallthrough.
///
/// The untagged serde representation maps JSON numbers and strings directly:
///
/// ```
/// use optgate_core::OptValue;
///
/// let value: OptValue = serde_json::from_str("10").unwrap();
/// assert_eq!(value, OptValue::Int(10));
///
/// let value: OptValue = serde_json::from_str("\"bob-10\"").unwrap();
/// assert_eq!(value, OptValue::Text("bob-10".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptValue {
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    Text(String),
}

impl OptValue {
    /// Returns true for the "no value provided" forms: `Int(0)`,
    /// `Float(0.0)`, and the empty string.
    ///
    /// The scalar set accessor treats these as "nothing to set" and leaves
    /// the store untouched even when the value would pass validation. See
    /// [`OptionStore::set`](crate::OptionStore::set).
    pub fn is_falsy(&self) -> bool {
        match self {
            OptValue::Int(i) => *i == 0,
            OptValue::Float(f) => *f == 0.0,
            OptValue::Text(s) => s.is_empty(),
        }
    }

    /// Returns the string content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<i64> for OptValue {
    fn from(value: i64) -> Self {
        OptValue::Int(value)
    }
}

impl From<f64> for OptValue {
    fn from(value: f64) -> Self {
        OptValue::Float(value)
    }
}

impl From<&str> for OptValue {
    fn from(value: &str) -> Self {
        OptValue::Text(value.to_string())
    }
}

impl From<String> for OptValue {
    fn from(value: String) -> Self {
        OptValue::Text(value)
    }
}
