use serde::{Deserialize, Serialize};

/// Target of a `REFERENCES` clause.
///
/// A column without a reference carries the default value: an empty table
/// name and no column list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub table_name: String,
    pub column_names: Option<Vec<String>>,
}

impl Reference {
    pub fn is_set(&self) -> bool {
        !self.table_name.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub name: Option<String>,
    pub column_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unique {
    pub name: Option<String>,
    pub column_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub name: Option<String>,
    pub expr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: Option<String>,
    pub column_names: Vec<String>,
    pub references: Reference,
}

/// Table-level constraints in declaration order, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConstraint {
    pub primary_key: Vec<PrimaryKey>,
    pub unique: Vec<Unique>,
    pub check: Vec<Check>,
    pub foreign_key: Vec<ForeignKey>,
}

impl TableConstraint {
    pub fn is_empty(&self) -> bool {
        self.primary_key.is_empty()
            && self.unique.is_empty()
            && self.check.is_empty()
            && self.foreign_key.is_empty()
    }
}
