//! Car operations.

use std::sync::Arc;

use tracing::info;

use crate::error::{CatalogError, CatalogResult, ErrorContext, ResultExt};
use crate::models::{parse_id, Car, CarInput, Entity, NewCar};
use crate::traits::CatalogStore;

/// Validates car input and calls the store.
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn CatalogStore>,
}

impl CarService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    fn context(operation: &str, id: Option<i64>) -> ErrorContext {
        let ctx = ErrorContext::new(operation).with_entity(Entity::Car);
        match id {
            Some(id) => ctx.with_record_id(id),
            None => ctx,
        }
    }

    /// All cars, ordered by name.
    pub async fn list(&self) -> CatalogResult<Vec<Car>> {
        self.store
            .list_cars()
            .await
            .context(Self::context("list_cars", None))
    }

    /// One car by its raw path id.
    pub async fn get(&self, raw_id: &str) -> CatalogResult<Car> {
        let id = parse_id(raw_id, Entity::Car)?;
        self.store
            .get_car(id)
            .await
            .context(Self::context("get_car", Some(id)))?
            .ok_or(CatalogError::NotFound {
                entity: Entity::Car,
                id,
            })
    }

    /// Validate and insert a car.
    pub async fn create(&self, input: CarInput) -> CatalogResult<Car> {
        let car = input.into_new_car()?;
        self.insert(car).await
    }

    /// Insert an already validated car.
    pub async fn insert(&self, car: NewCar) -> CatalogResult<Car> {
        let created = self
            .store
            .create_car(car)
            .await
            .context(Self::context("create_car", None))?;
        info!(id = created.id, name = %created.name, "Created car");
        Ok(created)
    }

    /// Apply a partial update to the car with the raw path id.
    pub async fn update(&self, raw_id: &str, input: CarInput) -> CatalogResult<Car> {
        let id = parse_id(raw_id, Entity::Car)?;
        let patch = input.into_patch()?;
        self.store
            .update_car(id, patch)
            .await
            .context(Self::context("update_car", Some(id)))
    }

    /// Delete the car with the raw path id.
    pub async fn delete(&self, raw_id: &str) -> CatalogResult<()> {
        let id = parse_id(raw_id, Entity::Car)?;
        self.store
            .delete_car(id)
            .await
            .context(Self::context("delete_car", Some(id)))?;
        info!(id, "Deleted car");
        Ok(())
    }
}
