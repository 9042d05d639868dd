//! In-process catalog source.

use async_trait::async_trait;

use super::{CarService, FolderService};
use crate::models::{Car, Folder, FolderInput, NewCar};
use crate::traits::{CatalogSource, SourceError};

/// Serves the UI shell straight from the services, without an HTTP hop.
#[derive(Clone)]
pub struct ServiceSource {
    folders: FolderService,
    cars: CarService,
}

impl ServiceSource {
    pub fn new(folders: FolderService, cars: CarService) -> Self {
        Self { folders, cars }
    }
}

#[async_trait]
impl CatalogSource for ServiceSource {
    async fn list_folders(&self) -> Result<Vec<Folder>, SourceError> {
        Ok(self.folders.list().await?)
    }

    async fn list_cars(&self) -> Result<Vec<Car>, SourceError> {
        Ok(self.cars.list().await?)
    }

    async fn create_folder(&self, input: FolderInput) -> Result<Folder, SourceError> {
        Ok(self.folders.create(input).await?)
    }

    async fn create_car(&self, car: NewCar) -> Result<Car, SourceError> {
        Ok(self.cars.insert(car).await?)
    }
}
