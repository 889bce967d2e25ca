// SQLite document store
//
// Every collection shares one `documents` table:
// - (collection, id) is the primary key
// - body holds the full JSON document
// - seq orders documents by first insertion; replacing a document keeps it

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::entities::Document;
use crate::error::RepositoryError;
use crate::repository::{Repository, RepositoryResult};

/// Connection shared by every repository in the process
pub type SharedConnection = Arc<Mutex<Connection>>;

pub fn setup_database(conn: &Connection) -> Result<(), RepositoryError> {
    // Enable WAL mode for crash recovery (in-memory databases report "memory")
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            body TEXT NOT NULL,
            UNIQUE (collection, id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq)",
        [],
    )?;

    Ok(())
}

/// Open (or create) the database file and prepare the schema
pub fn open_database(path: &Path) -> anyhow::Result<SharedConnection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    setup_database(&conn).context("Failed to initialize database schema")?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database, mostly for tests and `--in-memory` runs
pub fn open_in_memory() -> Result<SharedConnection, RepositoryError> {
    let conn = Connection::open_in_memory()?;
    setup_database(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

// ============================================================================
// Row-level helpers (synchronous, caller holds the lock)
// ============================================================================

fn upsert_document<T: Document>(conn: &Connection, mut document: T) -> RepositoryResult<T> {
    let id = document.ensure_id().to_string();
    let body = serde_json::to_string(&document)?;

    conn.execute(
        "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
         ON CONFLICT (collection, id)
         DO UPDATE SET body = excluded.body",
        params![T::COLLECTION, id, body],
    )?;

    Ok(document)
}

fn select_all<T: Document>(conn: &Connection) -> RepositoryResult<Vec<T>> {
    let mut stmt =
        conn.prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY seq")?;

    let bodies = stmt
        .query_map(params![T::COLLECTION], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    bodies
        .iter()
        .map(|body| serde_json::from_str(body).map_err(RepositoryError::from))
        .collect()
}

fn select_by_id<T: Document>(conn: &Connection, id: &str) -> RepositoryResult<Option<T>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
            params![T::COLLECTION, id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(body.map(|b| serde_json::from_str(&b)).transpose()?)
}

fn count_documents(conn: &Connection, collection: &str) -> RepositoryResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE collection = ?1",
        params![collection],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

// ============================================================================
// SqliteRepository
// ============================================================================

/// `Repository<T>` over the shared SQLite connection.
///
/// rusqlite is blocking, so every call runs on tokio's blocking pool.
pub struct SqliteRepository<T> {
    db: SharedConnection,
    _document: PhantomData<fn() -> T>,
}

impl<T: Document> SqliteRepository<T> {
    pub fn new(db: SharedConnection) -> Self {
        SqliteRepository {
            db,
            _document: PhantomData,
        }
    }

    async fn with_conn<R, F>(&self, f: F) -> RepositoryResult<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Connection) -> RepositoryResult<R> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut conn = db.lock()?;
            f(&mut conn)
        })
        .await?
    }
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        SqliteRepository {
            db: Arc::clone(&self.db),
            _document: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Document> Repository<T> for SqliteRepository<T> {
    async fn find_all(&self) -> RepositoryResult<Vec<T>> {
        self.with_conn(|conn| select_all::<T>(conn)).await
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<T>> {
        let id = id.to_string();
        self.with_conn(move |conn| select_by_id::<T>(conn, &id)).await
    }

    async fn save(&self, document: T) -> RepositoryResult<T> {
        self.with_conn(move |conn| upsert_document(conn, document))
            .await
    }

    async fn save_all(&self, documents: Vec<T>) -> RepositoryResult<Vec<T>> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let saved = documents
                .into_iter()
                .map(|document| upsert_document(&tx, document))
                .collect::<RepositoryResult<Vec<T>>>()?;
            tx.commit()?;
            Ok(saved)
        })
        .await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.with_conn(|conn| count_documents(conn, T::COLLECTION))
            .await
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Category, Vendor};

    fn repositories() -> (SqliteRepository<Category>, SqliteRepository<Vendor>) {
        let db = open_in_memory().unwrap();
        (SqliteRepository::new(db.clone()), SqliteRepository::new(db))
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let (categories, _) = repositories();

        let saved = categories.save(Category::new("Fruits")).await.unwrap();
        let id = saved.id.clone().expect("id assigned on save");

        let found = categories.find_by_id(&id).await.unwrap();
        assert_eq!(found, Some(saved));

        println!("✅ Save/find test PASSED: {}", id);
    }

    #[tokio::test]
    async fn test_save_replaces_document_and_keeps_order() {
        let (categories, _) = repositories();

        categories
            .save_all(vec![
                Category::with_id("1", "Fruits"),
                Category::with_id("2", "Dried"),
                Category::with_id("3", "Fresh"),
            ])
            .await
            .unwrap();

        categories.save(Category::with_id("1", "Exotic")).await.unwrap();

        let all = categories.find_all().await.unwrap();
        let descriptions: Vec<_> = all.iter().filter_map(|c| c.description.as_deref()).collect();

        assert_eq!(descriptions, vec!["Exotic", "Dried", "Fresh"]);
        assert_eq!(categories.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let (categories, vendors) = repositories();

        categories.save(Category::with_id("same", "Nuts")).await.unwrap();
        vendors.save(Vendor::with_id("same", "Joe", "Buck")).await.unwrap();

        assert_eq!(categories.count().await.unwrap(), 1);
        assert_eq!(vendors.count().await.unwrap(), 1);
        assert_eq!(
            vendors.find_by_id("same").await.unwrap(),
            Some(Vendor::with_id("same", "Joe", "Buck"))
        );
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let (_, vendors) = repositories();
        assert_eq!(vendors.find_by_id("missing").await.unwrap(), None);
        assert!(vendors.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_body_is_serialization_error() {
        let db = open_in_memory().unwrap();
        db.lock()
            .unwrap()
            .execute(
                "INSERT INTO documents (collection, id, body) VALUES ('categories', 'bad', 'not json')",
                [],
            )
            .unwrap();

        let categories = SqliteRepository::<Category>::new(db);
        let err = categories.find_by_id("bad").await.unwrap_err();

        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_save_all_rolls_back_on_failure() {
        let db = open_in_memory().unwrap();
        db.lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_bad BEFORE INSERT ON documents
                 WHEN NEW.id = 'bad'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let categories = SqliteRepository::<Category>::new(db);
        let result = categories
            .save_all(vec![
                Category::with_id("ok", "Fruits"),
                Category::with_id("bad", "Nuts"),
            ])
            .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
        assert_eq!(categories.count().await.unwrap(), 0);
        assert_eq!(categories.find_by_id("ok").await.unwrap(), None);
    }

    #[test]
    fn test_setup_database_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        setup_database(&conn).unwrap();

        assert_eq!(count_documents(&conn, "categories").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_file_database_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");

        {
            let vendors = SqliteRepository::<Vendor>::new(open_database(&path).unwrap());
            vendors.save(Vendor::with_id("v1", "Jessie", "Waters")).await.unwrap();
        }

        let vendors = SqliteRepository::<Vendor>::new(open_database(&path).unwrap());
        let found = vendors.find_by_id("v1").await.unwrap();

        assert_eq!(found, Some(Vendor::with_id("v1", "Jessie", "Waters")));
    }
}
