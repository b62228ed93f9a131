use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoercionError {
    #[error("Coercion error: Missing value")]
    MissingValue,
    #[error("Coercion error: Invalid amount [{0}]")]
    InvalidAmount(String),
    #[error("Coercion error: Invalid date [{0}]")]
    InvalidDate(String),
    #[error("Coercion error: Serial day [{0}] is outside the spreadsheet calendar")]
    SerialOutOfRange(f64)
}
