//! SQLite-backed catalog store.
//!
//! One connection guarded by a mutex, shared by clones. Every call runs on
//! the blocking pool so request handlers never block the runtime.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::models::{Car, CarPatch, Entity, Folder, NewCar, NewFolder};
use crate::traits::CatalogStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS folders (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    url         TEXT,
    views       INTEGER NOT NULL DEFAULT 0,
    is_private  INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cars (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL,
    year      INTEGER NOT NULL,
    engine    TEXT NOT NULL,
    hp        INTEGER NOT NULL,
    features  TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_folders_name ON folders(name);
CREATE INDEX IF NOT EXISTS idx_cars_name ON cars(name);
"#;

const FOLDER_COLUMNS: &str = "id, name, url, views, is_private, created_at";
const CAR_COLUMNS: &str = "id, name, year, engine, hp, features";

/// Thread-safe SQLite store.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteStore {
    /// Open (or create) the database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let store = Self::from_connection(Connection::open(path)?)?;
        info!(path = %path.display(), "Opened catalog database");
        Ok(store)
    }

    /// Create an in-memory store for testing.
    pub fn in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn run<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            let conn = guard.as_mut().ok_or(StoreError::Closed)?;
            f(conn)
        })
        .await?
    }
}

fn conversion_error(
    index: usize,
    kind: Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, kind, Box::new(err))
}

fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    let created_at: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| conversion_error(5, Type::Text, e))?
        .with_timezone(&Utc);

    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        views: row.get(3)?,
        is_private: row.get(4)?,
        created_at,
    })
}

fn car_from_row(row: &Row<'_>) -> rusqlite::Result<Car> {
    let features: String = row.get(5)?;
    let features: Vec<String> =
        serde_json::from_str(&features).map_err(|e| conversion_error(5, Type::Text, e))?;

    Ok(Car {
        id: row.get(0)?,
        name: row.get(1)?,
        year: row.get(2)?,
        engine: row.get(3)?,
        hp: row.get(4)?,
        features,
    })
}

fn select_folder(conn: &Connection, id: i64) -> StoreResult<Option<Folder>> {
    let sql = format!("SELECT {} FROM folders WHERE id = ?1", FOLDER_COLUMNS);
    Ok(conn
        .query_row(&sql, params![id], folder_from_row)
        .optional()?)
}

fn select_car(conn: &Connection, id: i64) -> StoreResult<Option<Car>> {
    let sql = format!("SELECT {} FROM cars WHERE id = ?1", CAR_COLUMNS);
    Ok(conn.query_row(&sql, params![id], car_from_row).optional()?)
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn list_folders(&self) -> StoreResult<Vec<Folder>> {
        self.run(|conn| {
            let sql = format!(
                "SELECT {} FROM folders ORDER BY name ASC, id ASC",
                FOLDER_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let folders = stmt
                .query_map([], folder_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(folders)
        })
        .await
    }

    async fn create_folder(&self, folder: NewFolder) -> StoreResult<Folder> {
        self.run(move |conn| {
            let created_at = Utc::now().trunc_subsecs(3);
            conn.execute(
                "INSERT INTO folders (name, url, views, is_private, created_at)
                 VALUES (?1, ?2, 0, ?3, ?4)",
                params![
                    folder.name,
                    folder.url,
                    folder.is_private,
                    created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
                ],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, "Inserted folder");

            Ok(Folder {
                id,
                name: folder.name,
                url: folder.url,
                views: 0,
                is_private: folder.is_private,
                created_at,
            })
        })
        .await
    }

    async fn increment_folder_views(&self, id: i64) -> StoreResult<Folder> {
        self.run(move |conn| {
            let tx = conn.transaction()?;
            let changed = tx.execute(
                "UPDATE folders SET views = views + 1 WHERE id = ?1",
                params![id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    entity: Entity::Folder,
                    id,
                });
            }
            let folder = select_folder(&tx, id)?.ok_or(StoreError::NotFound {
                entity: Entity::Folder,
                id,
            })?;
            tx.commit()?;
            Ok(folder)
        })
        .await
    }

    async fn list_cars(&self) -> StoreResult<Vec<Car>> {
        self.run(|conn| {
            let sql = format!("SELECT {} FROM cars ORDER BY name ASC, id ASC", CAR_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let cars = stmt
                .query_map([], car_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(cars)
        })
        .await
    }

    async fn get_car(&self, id: i64) -> StoreResult<Option<Car>> {
        self.run(move |conn| select_car(conn, id)).await
    }

    async fn create_car(&self, car: NewCar) -> StoreResult<Car> {
        self.run(move |conn| {
            let features = serde_json::to_string(&car.features)?;
            conn.execute(
                "INSERT INTO cars (name, year, engine, hp, features) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![car.name, car.year, car.engine, car.hp, features],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, "Inserted car");

            Ok(Car {
                id,
                name: car.name,
                year: car.year,
                engine: car.engine,
                hp: car.hp,
                features: car.features,
            })
        })
        .await
    }

    async fn update_car(&self, id: i64, patch: CarPatch) -> StoreResult<Car> {
        self.run(move |conn| {
            let tx = conn.transaction()?;
            let mut car = select_car(&tx, id)?.ok_or(StoreError::NotFound {
                entity: Entity::Car,
                id,
            })?;
            patch.apply_to(&mut car);

            let features = serde_json::to_string(&car.features)?;
            tx.execute(
                "UPDATE cars SET name = ?1, year = ?2, engine = ?3, hp = ?4, features = ?5
                 WHERE id = ?6",
                params![car.name, car.year, car.engine, car.hp, features, id],
            )?;
            tx.commit()?;
            Ok(car)
        })
        .await
    }

    async fn delete_car(&self, id: i64) -> StoreResult<()> {
        self.run(move |conn| {
            let changed = conn.execute("DELETE FROM cars WHERE id = ?1", params![id])?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    entity: Entity::Car,
                    id,
                });
            }
            Ok(())
        })
        .await
    }

    async fn close(&self) -> StoreResult<()> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            if let Some(conn) = guard.take() {
                conn.close().map_err(|(_, err)| StoreError::Database(err))?;
                debug!("Closed catalog database");
            }
            Ok(())
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_folder(name: &str) -> NewFolder {
        NewFolder {
            name: name.to_string(),
            url: None,
            is_private: false,
        }
    }

    fn new_car(name: &str, hp: i64) -> NewCar {
        NewCar {
            name: name.to_string(),
            year: 2023,
            engine: "V8".to_string(),
            hp,
            features: vec!["AWD".to_string()],
        }
    }

    #[tokio::test]
    async fn test_folders_start_at_zero_views_and_sort_by_name() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_folder(new_folder("Music")).await.unwrap();
        let docs = store.create_folder(new_folder("Docs")).await.unwrap();
        assert_eq!(docs.views, 0);

        let names: Vec<_> = store
            .list_folders()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Docs", "Music"]);
    }

    #[tokio::test]
    async fn test_created_folder_matches_listed_folder() {
        let store = SqliteStore::in_memory().unwrap();
        let created = store
            .create_folder(NewFolder {
                name: "Docs".to_string(),
                url: Some("https://example.com/folder-1".to_string()),
                is_private: true,
            })
            .await
            .unwrap();

        let listed = store.list_folders().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_increment_views() {
        let store = SqliteStore::in_memory().unwrap();
        let folder = store.create_folder(new_folder("Docs")).await.unwrap();

        assert_eq!(store.increment_folder_views(folder.id).await.unwrap().views, 1);
        assert_eq!(store.increment_folder_views(folder.id).await.unwrap().views, 2);

        let err = store.increment_folder_views(999).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = SqliteStore::in_memory().unwrap();
        let folder = store.create_folder(new_folder("Docs")).await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment_folder_views(folder.id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let folders = store.list_folders().await.unwrap();
        assert_eq!(folders[0].views, 20);
    }

    #[tokio::test]
    async fn test_car_crud() {
        let store = SqliteStore::in_memory().unwrap();
        let car = store.create_car(new_car("Porsche", 640)).await.unwrap();
        assert_eq!(store.get_car(car.id).await.unwrap(), Some(car.clone()));

        let updated = store
            .update_car(
                car.id,
                CarPatch {
                    hp: Some(700),
                    ..CarPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.hp, 700);
        assert_eq!(updated.features, car.features);
        assert_eq!(store.get_car(car.id).await.unwrap(), Some(updated));

        store.delete_car(car.id).await.unwrap();
        assert_eq!(store.get_car(car.id).await.unwrap(), None);
        assert!(store.delete_car(car.id).await.unwrap_err().is_not_found());
        assert!(store
            .update_car(car.id, CarPatch::default())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");

        let store = SqliteStore::open(&path).unwrap();
        store.create_car(new_car("Tesla", 1020)).await.unwrap();
        store.close().await.unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        let cars = reopened.list_cars().await.unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].name, "Tesla");
    }

    #[tokio::test]
    async fn test_closed_store_rejects_calls() {
        let store = SqliteStore::in_memory().unwrap();
        store.close().await.unwrap();
        store.close().await.unwrap();
        assert!(matches!(
            store.list_cars().await,
            Err(StoreError::Closed)
        ));
    }
}
