use thiserror::Error;

use crate::common::error::SizerError::GenericError;

#[derive(Debug, Error)]
pub enum SizerError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("{program} failed: {message}")]
    CommandError { program: String, message: String },
    #[error("Invalid value `{value}` in column {column}: {reason}")]
    InvalidField {
        column: &'static str,
        value: String,
        reason: String,
    },
    #[error("Column {0} is missing in squeue output")]
    MissingColumn(&'static str),
    #[error("Error: {0}")]
    GenericError(String),
}

impl From<toml::de::Error> for SizerError {
    fn from(error: toml::de::Error) -> Self {
        Self::DeserializationError(error.to_string())
    }
}

pub fn error<T>(message: String) -> crate::Result<T> {
    Err(GenericError(message))
}
