//! Catalog source trait abstraction.
//!
//! The UI shell loads folders and cars and creates sample records through a
//! source. In the server the source calls the services directly; the
//! `snapshot` command goes through the HTTP API instead.

use async_trait::async_trait;
use thiserror::Error;

use super::http::HttpError;
use crate::error::CatalogError;
use crate::models::{Car, Folder, FolderInput, NewCar};

/// Why a source call failed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure talking to the API.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The API answered with a non-success status.
    #[error("{status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The in-process service failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read and create catalog records for the UI shell.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_folders(&self) -> Result<Vec<Folder>, SourceError>;

    async fn list_cars(&self) -> Result<Vec<Car>, SourceError>;

    async fn create_folder(&self, input: FolderInput) -> Result<Folder, SourceError>;

    async fn create_car(&self, car: NewCar) -> Result<Car, SourceError>;
}
