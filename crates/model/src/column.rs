use crate::{constraint::Reference, value::DefaultValue};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub constraint: ColumnConstraint,
}

/// Column type as written, uppercased, with up to two numeric arguments.
///
/// Two-word forms are canonicalized: `BIT VARYING` becomes `VARBIT` and
/// `CHARACTER VARYING` becomes `VARCHAR`; any other pair is joined by a space
/// (`DOUBLE PRECISION`). Absent arguments are `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    pub name: String,
    pub digit_n: u32,
    pub digit_m: u32,
}

impl DataType {
    pub fn new(name: &str) -> Self {
        DataType {
            name: name.to_uppercase(),
            digit_n: 0,
            digit_m: 0,
        }
    }

    pub fn with_digits(mut self, digit_n: u32, digit_m: u32) -> Self {
        self.digit_n = digit_n;
        self.digit_m = digit_m;
        self
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.digit_n, self.digit_m) {
            (0, 0) => write!(f, "{}", self.name),
            (n, 0) => write!(f, "{}({})", self.name, n),
            (n, m) => write!(f, "{}({},{})", self.name, n, m),
        }
    }
}

/// Every constraint attached to one column, folded into a single record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnConstraint {
    /// Name given by a `CONSTRAINT <name>` head.
    pub name: Option<String>,
    pub is_primary_key: bool,
    pub is_unique: bool,
    pub is_not_null: bool,
    pub is_autoincrement: bool,
    pub default: Option<DefaultValue>,
    /// Parenthesized `CHECK` body, whitespace removed.
    pub check: Option<String>,
    pub collate: Option<String>,
    pub references: Reference,
}
