use ddl_syntax::{DdlError, ValidateError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the DDL input: {0}")]
    InputRead(#[from] std::io::Error),

    #[error("{0}")]
    Ddl(#[from] DdlError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl From<ValidateError> for CliError {
    fn from(err: ValidateError) -> Self {
        CliError::Ddl(DdlError::Validate(err))
    }
}
