//! Catalog services and the shared application state.
//!
//! Services own validation and error context; handlers stay thin and only
//! translate between HTTP and these calls.

mod cars;
mod folders;
mod source;

pub use cars::CarService;
pub use folders::FolderService;
pub use source::ServiceSource;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::render::PageRenderer;
use crate::traits::CatalogStore;

/// Everything a request handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub folders: FolderService,
    pub cars: CarService,
    pub renderer: Arc<PageRenderer>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire services over one store handle.
    pub fn new(store: Arc<dyn CatalogStore>, renderer: PageRenderer, config: ServerConfig) -> Self {
        Self {
            folders: FolderService::new(Arc::clone(&store)),
            cars: CarService::new(store),
            renderer: Arc::new(renderer),
            config: Arc::new(config),
        }
    }

    /// A catalog source reading through these services.
    pub fn source(&self) -> ServiceSource {
        ServiceSource::new(self.folders.clone(), self.cars.clone())
    }
}
