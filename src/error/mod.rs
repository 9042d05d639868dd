//! Unified error handling for the catalog.
//!
//! This module provides:
//!
//! - **Error Categories**: classification that drives the HTTP status and log level
//! - **Domain-specific Errors**: validation, storage and configuration errors
//! - **Unified Error Type**: `CatalogError` consolidates all error types
//! - **Error Context**: operation and record attached for logging
//! - **Result Type Alias**: `CatalogResult<T>` for consistent return types
//!
//! # Error Categories
//!
//! | Category | Description | Status |
//! |----------|-------------|--------|
//! | Validation | Malformed or missing input, no write performed | 400 |
//! | NotFound | Referenced identifier does not exist | 404 (where distinguished) |
//! | Storage | Any data-access failure, opaque to the caller | 500 |
//! | Configuration | Invalid environment settings | 500 |
//! | System | Sockets, template files | 500 |

mod catalog_error;
mod category;
mod config;
mod context;
mod result;
mod store;
mod validation;

pub use catalog_error::CatalogError;
pub use category::ErrorCategory;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use result::{CatalogResult, ResultExt};
pub use store::{StoreError, StoreResult};
pub use validation::ValidationError;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::models::Entity;

    /// Every kind of failure lands in exactly one category with a code.
    #[test]
    fn test_error_unification() {
        let validation: CatalogError = ValidationError::MissingName.into();
        let not_found: CatalogError = StoreError::NotFound {
            entity: Entity::Folder,
            id: 1,
        }
        .into();
        let storage: CatalogError = StoreError::Poisoned.into();
        let config: CatalogError = ConfigError::InvalidPort {
            raw: "x".to_string(),
        }
        .into();

        assert_eq!(validation.category(), ErrorCategory::Validation);
        assert_eq!(not_found.category(), ErrorCategory::NotFound);
        assert_eq!(storage.category(), ErrorCategory::Storage);
        assert_eq!(config.category(), ErrorCategory::Configuration);

        for err in [&validation, &not_found, &storage, &config] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    /// Storage detail never reaches the client-facing message.
    #[test]
    fn test_storage_detail_is_hidden() {
        let err: CatalogError = StoreError::Injected("disk on fire".to_string()).into();
        assert!(err.to_string().contains("disk on fire"));
        assert!(!err.user_message().contains("disk on fire"));
    }
}
