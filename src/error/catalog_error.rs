//! Unified error type for the catalog.
//!
//! `CatalogError` folds validation, not-found, storage, configuration and I/O
//! failures into one enum so services can return a single `Result` type and
//! the HTTP boundary can classify without downcasting.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::store::StoreError;
use super::validation::ValidationError;
use crate::models::Entity;

/// Unified error type for the catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// Client input rejected before touching storage.
    Validation(ValidationError),

    /// The referenced record does not exist.
    NotFound { entity: Entity, id: i64 },

    /// Any other data-access failure.
    Store(StoreError),

    /// Invalid configuration.
    Config(ConfigError),

    /// OS-level I/O failure.
    Io(std::io::Error),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<CatalogError>,
        context: ErrorContext,
    },
}

impl CatalogError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::Validation(_) => ErrorCategory::Validation,
            CatalogError::NotFound { .. } => ErrorCategory::NotFound,
            CatalogError::Store(_) => ErrorCategory::Storage,
            CatalogError::Config(_) => ErrorCategory::Configuration,
            CatalogError::Io(_) => ErrorCategory::System,
            CatalogError::WithContext { error, .. } => error.category(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Validation(err) => err.error_code(),
            CatalogError::NotFound { .. } => "E_NOT_FOUND",
            CatalogError::Store(err) => err.error_code(),
            CatalogError::Config(err) => err.error_code(),
            CatalogError::Io(_) => "E_IO",
            CatalogError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Get a message that is safe to show to a client.
    ///
    /// Storage and system failures collapse to a generic message; their detail
    /// is for logs only.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Validation(err) => err.client_message(),
            CatalogError::NotFound { entity, .. } => format!("{} not found", entity.title()),
            CatalogError::Store(_) | CatalogError::Io(_) => "Internal server error".to_string(),
            CatalogError::Config(err) => err.to_string(),
            CatalogError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        CatalogError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            CatalogError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &CatalogError {
        match self {
            CatalogError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self.inner() {
            CatalogError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation(err) => write!(f, "{}", err),
            CatalogError::NotFound { entity, id } => write!(f, "{} {} not found", entity, id),
            CatalogError::Store(err) => write!(f, "{}", err),
            CatalogError::Config(err) => write!(f, "{}", err),
            CatalogError::Io(err) => write!(f, "I/O error: {}", err),
            CatalogError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Validation(err) => Some(err),
            CatalogError::NotFound { .. } => None,
            CatalogError::Store(err) => Some(err),
            CatalogError::Config(err) => Some(err),
            CatalogError::Io(err) => Some(err),
            CatalogError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Validation(err)
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => CatalogError::NotFound { entity, id },
            other => CatalogError::Store(other),
        }
    }
}

impl From<ConfigError> for CatalogError {
    fn from(err: ConfigError) -> Self {
        CatalogError::Config(err)
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}
