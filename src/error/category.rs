//! Error category classification.
//!
//! The HTTP boundary picks a status from the category: validation is a 400,
//! not-found is a 404 only where the route reports it, everything else is an
//! opaque 500.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or missing client input, detected before any storage call.
    Validation,
    NotFound,
    /// Any failure coming out of the data-access layer. Never retried.
    Storage,
    Configuration,
    /// Sockets, template files.
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
