//! Client-input validation errors.
//!
//! These are raised before the data-access layer is touched, so a validation
//! failure never leaves a partial write behind.

use thiserror::Error;

use crate::models::Entity;

/// Malformed or missing client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Folder creation without a non-empty name.
    #[error("Name is required")]
    MissingName,

    /// Car creation without all of name, year, engine and hp.
    #[error("Name, year, engine, and hp are required")]
    MissingCarFields { missing: Vec<&'static str> },

    /// A path identifier that is not a well-formed integer.
    #[error("Invalid {entity} ID")]
    InvalidId { entity: Entity, raw: String },

    /// A numeric field that is neither a number nor a numeric string.
    #[error("Field '{field}' must be an integer, got '{raw}'")]
    InvalidNumber { field: &'static str, raw: String },

    /// The request body is not valid JSON.
    #[error("Malformed JSON body: {message}")]
    MalformedBody { message: String },
}

impl ValidationError {
    /// The message returned to API callers. Parser detail stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ValidationError::MalformedBody { .. } => "Malformed JSON body".to_string(),
            other => other.to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "E_VALIDATION_NAME",
            ValidationError::MissingCarFields { .. } => "E_VALIDATION_FIELDS",
            ValidationError::InvalidId { .. } => "E_VALIDATION_ID",
            ValidationError::InvalidNumber { .. } => "E_VALIDATION_NUMBER",
            ValidationError::MalformedBody { .. } => "E_VALIDATION_BODY",
        }
    }
}
