//! Error types for the decimal-string boundary

use thiserror::Error;

/// Errors raised while converting values to or from decimal strings
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericError {
    /// Value has the wrong shape for a decimal string (malformed text, a binary
    /// float, a boolean, ...)
    #[error("Illegal value '{value}': {reason}")]
    IllegalValue { value: String, reason: String },
}

impl NumericError {
    pub(crate) fn illegal(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IllegalValue {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NumericError>;
