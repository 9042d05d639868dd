//! Data-access layer errors.

use thiserror::Error;

use crate::models::Entity;

/// Failures raised by a [`CatalogStore`](crate::traits::CatalogStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite call failed (including constraint violations).
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No record with the given identifier.
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    /// A JSON column could not be encoded or decoded.
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The blocking worker running the query panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    Task(String),

    /// The connection lock was poisoned by a panicking writer.
    #[error("Storage connection poisoned")]
    Poisoned,

    /// The handle was used after `close()`.
    #[error("Storage handle is closed")]
    Closed,

    /// Failure injected by a test double.
    #[error("Injected failure: {0}")]
    Injected(String),
}

impl StoreError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Database(_) => "E_STORE_DB",
            StoreError::NotFound { .. } => "E_NOT_FOUND",
            StoreError::Encoding(_) => "E_STORE_ENCODING",
            StoreError::Task(_) => "E_STORE_TASK",
            StoreError::Poisoned => "E_STORE_POISONED",
            StoreError::Closed => "E_STORE_CLOSED",
            StoreError::Injected(_) => "E_STORE_INJECTED",
        }
    }

    /// Returns true for the not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Task(err.to_string())
    }
}

/// Result alias for data-access calls.
pub type StoreResult<T> = Result<T, StoreError>;
