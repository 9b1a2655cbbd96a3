//! Core error types for the Flowcast engine.
//!
//! This module defines storage-agnostic error types. Collaborator-specific
//! errors (storage, sync, import) are converted to these types at the
//! boundary before they reach the computation core.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::payroll::TaxTableError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the forecasting core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tax table error: {0}")]
    TaxTable(#[from] TaxTableError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Payroll calculation failed: {0}")]
    Payroll(String),

    #[error("Transaction generation failed: {0}")]
    Generation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid month id '{0}', expected YYYY-MM")]
    InvalidMonthId(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
