use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a column `DEFAULT` clause.
///
/// Serializes as a bare JSON scalar. `Expr` holds text that was captured
/// rather than interpreted: a parenthesized expression, a function call, or a
/// keyword such as `CURRENT_TIMESTAMP`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Expr(String),
}

impl DefaultValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DefaultValue::Null)
    }

    /// Text form for string-like values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DefaultValue::String(s) | DefaultValue::Expr(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DefaultValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Null => write!(f, "NULL"),
            DefaultValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            DefaultValue::Number(n) => write!(f, "{}", n),
            DefaultValue::String(s) => write!(f, "'{}'", s),
            DefaultValue::Expr(e) => write!(f, "{}", e),
        }
    }
}
