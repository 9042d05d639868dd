//! Result type alias for catalog operations.

use super::catalog_error::CatalogError;
use super::context::ErrorContext;

/// Type alias for Results using CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> CatalogResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> CatalogResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<CatalogError>,
{
    fn context(self, ctx: ErrorContext) -> CatalogResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> CatalogResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, ValidationError};

    #[test]
    fn test_context_extension() {
        let result: Result<i32, StoreError> = Err(StoreError::Closed);

        let with_ctx = result.context(ErrorContext::new("list_folders"));

        let err = with_ctx.unwrap_err();
        assert_eq!(err.context().unwrap().operation, "list_folders");
    }

    #[test]
    fn test_context_extension_preserves_ok() {
        let result: Result<i32, ValidationError> = Ok(42);
        let with_ctx = result.context(ErrorContext::new("noop"));
        assert_eq!(with_ctx.unwrap(), 42);
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let result: Result<i32, StoreError> = Ok(42);
        let mut called = false;

        let with_ctx = result.with_context(|| {
            called = true;
            ErrorContext::new("test")
        });

        assert!(with_ctx.is_ok());
        assert!(!called);
    }

    #[test]
    fn test_with_context_on_error() {
        let result: Result<i32, ValidationError> = Err(ValidationError::MissingName);
        let mut called = false;

        let with_ctx = result.with_context(|| {
            called = true;
            ErrorContext::new("create_folder")
        });

        assert!(called);
        assert_eq!(
            with_ctx.unwrap_err().context().unwrap().operation,
            "create_folder"
        );
    }
}
