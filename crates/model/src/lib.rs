//! Typed model of the tables declared by a `CREATE TABLE` script.
//!
//! Values are produced by the `ddl-syntax` converter and serialize with the
//! field names used by downstream JSON consumers.

pub mod column;
pub mod constraint;
pub mod table;
pub mod value;

pub use column::{Column, ColumnConstraint, DataType};
pub use constraint::{Check, ForeignKey, PrimaryKey, Reference, TableConstraint, Unique};
pub use table::Table;
pub use value::DefaultValue;
