//! `CREATE TABLE` parsing for SQLite, PostgreSQL and MySQL.
//!
//! Input goes through three stages: the [`lexer`] produces raw tokens, the
//! [`validator`] proves them well-formed and filters out what the model does
//! not need, and the [`converter`] folds the remaining tokens into [`Table`]s.

pub mod converter;
pub mod dialect;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod validator;

pub use dialect::Dialect;
pub use error::{DdlError, DdlResult, ValidateError, ValidateResult};
pub use lexer::token::{Token, TokenKind};
pub use model::{
    Check, Column, ColumnConstraint, DataType, DefaultValue, ForeignKey, PrimaryKey, Reference,
    Table, TableConstraint, Unique,
};

use lexer::Lexer;

/// Raw token stream of `ddl`, newline markers included.
pub fn tokenize(ddl: &str, dialect: Dialect) -> ValidateResult<Vec<Token>> {
    Lexer::new(dialect).tokenize(ddl)
}

/// Checks `ddl` without building the model.
pub fn validate(ddl: &str, dialect: Dialect) -> ValidateResult<()> {
    let tokens = tokenize(ddl, dialect)?;
    validator::filter(&tokens, dialect)?;
    Ok(())
}

/// Parses every `CREATE TABLE` statement in `ddl`.
pub fn parse(ddl: &str, dialect: Dialect) -> ValidateResult<Vec<Table>> {
    let tokens = tokenize(ddl, dialect)?;
    let kept = validator::filter(&tokens, dialect)?;
    Ok(converter::convert(&kept))
}

/// [`parse`] with the dialect given by name, e.g. `"postgres"`.
pub fn parse_named(ddl: &str, dialect: &str) -> DdlResult<Vec<Table>> {
    let dialect = dialect.parse::<Dialect>()?;
    Ok(parse(ddl, dialect)?)
}
