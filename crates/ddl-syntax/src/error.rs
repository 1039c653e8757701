use std::fmt;
use thiserror::Error;

/// Near-token reported when the input ends before the grammar is satisfied.
pub const EOF_NEAR: &str = "<EOF>";

/// First lexical or syntactic error found in a DDL script.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ValidateError: Syntax error: near '{near}' at line {line}.")]
pub struct ValidateError {
    pub line: usize,
    pub near: String,
}

impl ValidateError {
    pub fn new(line: usize, near: impl fmt::Display) -> Self {
        ValidateError {
            line: line.max(1),
            near: near.to_string(),
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(line, EOF_NEAR)
    }

    pub fn is_eof(&self) -> bool {
        self.near == EOF_NEAR
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DdlError {
    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error("Not yet supported.")]
    UnsupportedDialect(String),
}

pub type ValidateResult<T> = Result<T, ValidateError>;
pub type DdlResult<T> = Result<T, DdlError>;
