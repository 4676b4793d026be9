use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Declared type of a value extracted from program output.
///
/// - `Float`: the rule template is filled with a real-number sub-pattern and
///   the match is parsed as `f64`.
/// - `Int`: the template is filled with an integer sub-pattern and parsed as
///   `i64`.
/// - `None`: untyped; the raw matched text is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    #[serde(alias = "integer")]
    Int,
    None,
}

impl Default for ValueKind {
    fn default() -> Self {
        ValueKind::None
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "float" => Ok(ValueKind::Float),
            "int" | "integer" => Ok(ValueKind::Int),
            "none" | "" => Ok(ValueKind::None),
            other => Err(format!(
                "invalid value type: {other} (expected \"float\", \"int\" or \"none\")"
            )),
        }
    }
}

/// Last value extracted for one key during the current iteration.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Nothing matched yet in this iteration.
    #[default]
    Unset,
    Float(f64),
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn is_set(&self) -> bool {
        !matches!(self, Value::Unset)
    }

    /// Numeric view of the value; integers are widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unset => write!(f, "unset"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}
