//! UI shell state and actions.
//!
//! The shell loads both collections at once and tracks loading and error
//! state per section, so a failure in one never hides the other.

use tracing::warn;

use super::samples::{sample_car, sample_folder};
use crate::models::{Car, Folder};
use crate::traits::{CatalogSource, SourceError};

pub const FOLDERS_ERROR: &str = "Failed to load folders";
pub const CARS_ERROR: &str = "Failed to load cars";

/// One collection on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub items: Vec<T>,
}

impl<T> Section<T> {
    pub fn loading() -> Self {
        Self {
            loading: true,
            error: None,
            items: Vec::new(),
        }
    }

    pub fn loaded(items: Vec<T>) -> Self {
        Self {
            loading: false,
            error: None,
            items,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            loading: false,
            error: Some(message.to_string()),
            items: Vec::new(),
        }
    }

    fn from_result(result: Result<Vec<T>, SourceError>, message: &str, what: &str) -> Self {
        match result {
            Ok(items) => Self::loaded(items),
            Err(err) => {
                warn!(error = %err, "Error fetching {}", what);
                Self::failed(message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellState {
    pub folders: Section<Folder>,
    pub cars: Section<Car>,
}

impl ShellState {
    /// Both sections loading, nothing fetched yet.
    pub fn initial() -> Self {
        Self {
            folders: Section::loading(),
            cars: Section::loading(),
        }
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Shell state bound to the source it loads from.
pub struct Shell<S: CatalogSource> {
    source: S,
    state: ShellState,
}

impl<S: CatalogSource> Shell<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ShellState::initial(),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn into_state(self) -> ShellState {
        self.state
    }

    /// Fetch folders and cars concurrently.
    pub async fn load(&mut self) -> &ShellState {
        let (folders, cars) = tokio::join!(self.source.list_folders(), self.source.list_cars());
        self.state.folders = Section::from_result(folders, FOLDERS_ERROR, "folders");
        self.state.cars = Section::from_result(cars, CARS_ERROR, "cars");
        &self.state
    }

    /// Create "Folder N+1" and show it first.
    pub async fn add_sample_folder(&mut self) -> Result<Folder, SourceError> {
        let input = sample_folder(self.state.folders.items.len());
        match self.source.create_folder(input).await {
            Ok(folder) => {
                self.state.folders.items.insert(0, folder.clone());
                Ok(folder)
            }
            Err(err) => {
                warn!(error = %err, "Error adding folder");
                Err(err)
            }
        }
    }

    /// Create one of the sample cars and show it last.
    pub async fn add_sample_car(&mut self, choice: usize) -> Result<Car, SourceError> {
        match self.source.create_car(sample_car(choice)).await {
            Ok(car) => {
                self.state.cars.items.push(car.clone());
                Ok(car)
            }
            Err(err) => {
                warn!(error = %err, "Error adding car");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryStore;
    use crate::services::{CarService, FolderService, ServiceSource};
    use std::sync::Arc;

    fn shell() -> (Shell<ServiceSource>, InMemoryStore) {
        let store = InMemoryStore::new();
        let shared: Arc<InMemoryStore> = Arc::new(store.clone());
        let source = ServiceSource::new(
            FolderService::new(shared.clone()),
            CarService::new(shared),
        );
        (Shell::new(source), store)
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = ShellState::initial();
        assert!(state.folders.loading);
        assert!(state.cars.loading);
        assert!(state.folders.error.is_none());
    }

    #[tokio::test]
    async fn test_load_success() {
        let (mut shell, _) = shell();
        let state = shell.load().await;
        assert_eq!(state.folders, Section::loaded(vec![]));
        assert_eq!(state.cars, Section::loaded(vec![]));
    }

    #[tokio::test]
    async fn test_folder_failure_does_not_block_cars() {
        let (mut shell, store) = shell();
        shell.add_sample_car(0).await.unwrap();

        // Fail only the first call; the folder list is requested first.
        store.fail_next(1);
        let state = shell.load().await.clone();

        let failed = [&state.folders.error, &state.cars.error]
            .iter()
            .filter(|e| e.is_some())
            .count();
        assert_eq!(failed, 1);
        assert!(!state.folders.loading && !state.cars.loading);
        if let Some(message) = &state.folders.error {
            assert_eq!(message, FOLDERS_ERROR);
            assert_eq!(state.cars.items.len(), 1);
        } else {
            assert_eq!(state.cars.error.as_deref(), Some(CARS_ERROR));
        }
    }

    #[tokio::test]
    async fn test_add_sample_folder_prepends_with_next_number() {
        let (mut shell, _) = shell();
        shell.load().await;
        let first = shell.add_sample_folder().await.unwrap();
        let second = shell.add_sample_folder().await.unwrap();

        assert_eq!(first.name, "Folder 1");
        assert_eq!(second.name, "Folder 2");
        assert_eq!(second.url.as_deref(), Some("https://example.com/folder-2"));
        assert!(!second.is_private);
        assert_eq!(shell.state().folders.items[0], second);
    }

    #[tokio::test]
    async fn test_add_sample_car_appends() {
        let (mut shell, _) = shell();
        shell.load().await;
        shell.add_sample_car(2).await.unwrap();
        shell.add_sample_car(0).await.unwrap();

        let names: Vec<_> = shell
            .state()
            .cars
            .items
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ferrari SF90 Stradale", "Tesla Model S"]);
    }

    #[tokio::test]
    async fn test_failed_add_leaves_state_unchanged() {
        let (mut shell, store) = shell();
        shell.load().await;
        store.fail_next(1);
        assert!(shell.add_sample_folder().await.is_err());
        assert!(shell.state().folders.items.is_empty());
    }
}
