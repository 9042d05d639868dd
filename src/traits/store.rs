//! Data-access trait abstraction.
//!
//! The relational store is an external collaborator. Services only see this
//! trait, so a handle is constructed once at startup and injected, and tests
//! swap in the in-memory double.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Car, CarPatch, Folder, NewCar, NewFolder};

/// Typed create/read/update/delete operations over folders and cars.
///
/// Lists are ordered by name ascending. Operations addressing a single record
/// by id (other than `get_car`) fail with `StoreError::NotFound` when the
/// record does not exist.
///
/// # Example
///
/// ```ignore
/// use fibex::traits::CatalogStore;
///
/// async fn busiest<S: CatalogStore>(store: &S) -> StoreResult<Option<Folder>> {
///     let folders = store.list_folders().await?;
///     Ok(folders.into_iter().max_by_key(|f| f.views))
/// }
/// ```
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All folders, ordered by name ascending.
    async fn list_folders(&self) -> StoreResult<Vec<Folder>>;

    /// Insert a folder with zero views and the current timestamp.
    async fn create_folder(&self, folder: NewFolder) -> StoreResult<Folder>;

    /// Atomically add one to the folder's view counter and return the result.
    async fn increment_folder_views(&self, id: i64) -> StoreResult<Folder>;

    /// All cars, ordered by name ascending.
    async fn list_cars(&self) -> StoreResult<Vec<Car>>;

    /// One car, or `None` if the id is unknown.
    async fn get_car(&self, id: i64) -> StoreResult<Option<Car>>;

    /// Insert a car and return it with its generated id.
    async fn create_car(&self, car: NewCar) -> StoreResult<Car>;

    /// Apply a partial update; absent fields keep their stored values.
    async fn update_car(&self, id: i64, patch: CarPatch) -> StoreResult<Car>;

    /// Remove a car.
    async fn delete_car(&self, id: i64) -> StoreResult<()>;

    /// Release the underlying connection. Later calls fail with `Closed`.
    async fn close(&self) -> StoreResult<()>;
}
