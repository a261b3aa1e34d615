//! Conversion Error Types
//!
//! Errors produced while moving values between the host and the object model.
//! Only construction reports errors; accessor coercions fall back to zero values.

use std::fmt;

use thiserror::Error;

/// Host value that has no object representation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unsupported host value: {0}")]
    Unsupported(String),

    #[error("map key must be a string, got {0}")]
    NonStringKey(String),

    #[error("integer out of range: {0}")]
    IntegerOverflow(String),

    #[error("value nested deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("opaque value cannot be rebuilt from host form: {0}")]
    Opaque(String),
}

impl serde::ser::Error for ConversionError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ConversionError::Unsupported(msg.to_string())
    }
}

/// Error value raised on the script side, handed to the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScriptError {
    message: String,
}

impl ScriptError {
    /// Create an error carrying `message`
    pub fn new(message: impl Into<String>) -> Self {
        ScriptError {
            message: message.into(),
        }
    }

    /// Message as raised by the script
    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ConversionResult<T> = Result<T, ConversionError>;
