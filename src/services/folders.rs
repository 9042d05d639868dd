//! Folder operations.

use std::sync::Arc;

use tracing::info;

use crate::error::{CatalogResult, ErrorContext, ResultExt};
use crate::models::{parse_id, Entity, Folder, FolderInput};
use crate::traits::CatalogStore;

/// Validates folder input and calls the store.
#[derive(Clone)]
pub struct FolderService {
    store: Arc<dyn CatalogStore>,
}

impl FolderService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All folders, ordered by name.
    pub async fn list(&self) -> CatalogResult<Vec<Folder>> {
        self.store
            .list_folders()
            .await
            .context(ErrorContext::new("list_folders").with_entity(Entity::Folder))
    }

    /// Create a folder. Views always start at 0.
    pub async fn create(&self, input: FolderInput) -> CatalogResult<Folder> {
        let folder = input.validate()?;
        let created = self
            .store
            .create_folder(folder)
            .await
            .context(ErrorContext::new("create_folder").with_entity(Entity::Folder))?;
        info!(id = created.id, name = %created.name, "Created folder");
        Ok(created)
    }

    /// Record one view of the folder identified by the raw path segment.
    pub async fn increment_view(&self, raw_id: &str) -> CatalogResult<Folder> {
        let id = parse_id(raw_id, Entity::Folder)?;
        self.increment_view_by_id(id).await
    }

    pub async fn increment_view_by_id(&self, id: i64) -> CatalogResult<Folder> {
        self.store.increment_folder_views(id).await.with_context(|| {
            ErrorContext::new("increment_folder_views")
                .with_entity(Entity::Folder)
                .with_record_id(id)
        })
    }
}
