//! In-memory catalog store for testing.
//!
//! Mirrors the SQLite store's ordering and not-found behaviour and can be
//! told to fail, so handler error paths are testable without a database.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};
use crate::models::{Car, CarPatch, Entity, Folder, NewCar, NewFolder};
use crate::traits::CatalogStore;

#[derive(Debug, Default)]
struct Tables {
    folders: Vec<Folder>,
    cars: Vec<Car>,
    next_folder_id: i64,
    next_car_id: i64,
    closed: bool,
}

#[derive(Debug, Default)]
struct Failures {
    /// Fail the next N calls.
    next: usize,
    /// Fail every call until cleared.
    all: bool,
}

/// In-memory store for testing.
///
/// # Example
///
/// ```ignore
/// use fibex::adapters::mock::InMemoryStore;
/// use fibex::traits::CatalogStore;
///
/// let store = InMemoryStore::new();
/// store.fail_next(1);
/// assert!(store.list_cars().await.is_err());
/// assert!(store.list_cars().await.is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    failures: Arc<Mutex<Failures>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` calls fail.
    pub fn fail_next(&self, count: usize) {
        self.failures.lock().unwrap().next = count;
    }

    /// Make every call fail (or stop failing).
    pub fn fail_all(&self, fail: bool) {
        self.failures.lock().unwrap().all = fail;
    }

    /// Names of the operations called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.tables.lock().unwrap().closed
    }

    fn enter(&self, operation: &'static str) -> StoreResult<()> {
        self.calls.lock().unwrap().push(operation);

        let mut failures = self.failures.lock().unwrap();
        if failures.all {
            return Err(StoreError::Injected(operation.to_string()));
        }
        if failures.next > 0 {
            failures.next -= 1;
            return Err(StoreError::Injected(operation.to_string()));
        }
        drop(failures);

        if self.tables.lock().unwrap().closed {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_folders(&self) -> StoreResult<Vec<Folder>> {
        self.enter("list_folders")?;
        let mut folders = self.tables.lock().unwrap().folders.clone();
        folders.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(folders)
    }

    async fn create_folder(&self, folder: NewFolder) -> StoreResult<Folder> {
        self.enter("create_folder")?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_folder_id += 1;
        let folder = Folder {
            id: tables.next_folder_id,
            name: folder.name,
            url: folder.url,
            views: 0,
            is_private: folder.is_private,
            created_at: Utc::now().trunc_subsecs(3),
        };
        tables.folders.push(folder.clone());
        Ok(folder)
    }

    async fn increment_folder_views(&self, id: i64) -> StoreResult<Folder> {
        self.enter("increment_folder_views")?;
        let mut tables = self.tables.lock().unwrap();
        let folder = tables
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound {
                entity: Entity::Folder,
                id,
            })?;
        folder.views += 1;
        Ok(folder.clone())
    }

    async fn list_cars(&self) -> StoreResult<Vec<Car>> {
        self.enter("list_cars")?;
        let mut cars = self.tables.lock().unwrap().cars.clone();
        cars.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(cars)
    }

    async fn get_car(&self, id: i64) -> StoreResult<Option<Car>> {
        self.enter("get_car")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.cars.iter().find(|c| c.id == id).cloned())
    }

    async fn create_car(&self, car: NewCar) -> StoreResult<Car> {
        self.enter("create_car")?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_car_id += 1;
        let car = Car {
            id: tables.next_car_id,
            name: car.name,
            year: car.year,
            engine: car.engine,
            hp: car.hp,
            features: car.features,
        };
        tables.cars.push(car.clone());
        Ok(car)
    }

    async fn update_car(&self, id: i64, patch: CarPatch) -> StoreResult<Car> {
        self.enter("update_car")?;
        let mut tables = self.tables.lock().unwrap();
        let car = tables
            .cars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound {
                entity: Entity::Car,
                id,
            })?;
        patch.apply_to(car);
        Ok(car.clone())
    }

    async fn delete_car(&self, id: i64) -> StoreResult<()> {
        self.enter("delete_car")?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.cars.len();
        tables.cars.retain(|c| c.id != id);
        if tables.cars.len() == before {
            return Err(StoreError::NotFound {
                entity: Entity::Car,
                id,
            });
        }
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        self.calls.lock().unwrap().push("close");
        self.tables.lock().unwrap().closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_car(name: &str) -> NewCar {
        NewCar {
            name: name.to_string(),
            year: 2023,
            engine: "Electric".to_string(),
            hp: 1020,
            features: vec![],
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_lists_sorted() {
        let store = InMemoryStore::new();
        let b = store.create_car(new_car("Tesla")).await.unwrap();
        let a = store.create_car(new_car("Porsche")).await.unwrap();
        assert_eq!((b.id, a.id), (1, 2));

        let names: Vec<_> = store
            .list_cars()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Porsche", "Tesla"]);
    }

    #[tokio::test]
    async fn test_fail_next_then_recover() {
        let store = InMemoryStore::new();
        store.fail_next(2);
        assert!(matches!(
            store.list_folders().await,
            Err(StoreError::Injected(_))
        ));
        assert!(store.list_cars().await.is_err());
        assert!(store.list_cars().await.is_ok());
        assert_eq!(store.calls(), vec!["list_folders", "list_cars", "list_cars"]);
    }

    #[tokio::test]
    async fn test_fail_all() {
        let store = InMemoryStore::new();
        store.fail_all(true);
        assert!(store.create_car(new_car("X")).await.is_err());
        store.fail_all(false);
        assert!(store.create_car(new_car("X")).await.is_ok());
    }

    #[tokio::test]
    async fn test_not_found() {
        let store = InMemoryStore::new();
        assert!(store.increment_folder_views(1).await.unwrap_err().is_not_found());
        assert!(store.delete_car(1).await.unwrap_err().is_not_found());
        assert_eq!(store.get_car(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_close() {
        let store = InMemoryStore::new();
        store.close().await.unwrap();
        assert!(store.is_closed());
        assert!(matches!(store.list_cars().await, Err(StoreError::Closed)));
    }
}
