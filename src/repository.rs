// Repository - async document persistence contract
//
// Endpoints only ever see `Arc<dyn Repository<T>>`; the server picks SQLite
// (see db.rs) or the in-memory store below at startup.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::entities::Document;
use crate::error::RepositoryError;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Document persistence for one collection.
///
/// Every call is independently atomic. Nothing here locks across calls, so
/// concurrent writers to the same id race and the last write wins.
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// All documents, in repository order.
    async fn find_all(&self) -> RepositoryResult<Vec<T>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<T>>;

    /// Create-or-replace. Assigns an id when the document has none and
    /// returns the stored document.
    async fn save(&self, document: T) -> RepositoryResult<T>;

    /// Save every document, all or nothing. Returned in input order.
    async fn save_all(&self, documents: Vec<T>) -> RepositoryResult<Vec<T>>;

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.find_all().await?.len())
    }
}

// ============================================================================
// IN-MEMORY REPOSITORY
// ============================================================================

/// Process-local repository backed by a vector.
///
/// Insertion order is list order; replacing a document keeps its position.
pub struct InMemoryRepository<T> {
    documents: Arc<RwLock<Vec<T>>>,
}

impl<T: Document> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn upsert(documents: &mut Vec<T>, mut document: T) -> T {
        document.ensure_id();
        match documents.iter_mut().find(|d| d.id() == document.id()) {
            Some(slot) => *slot = document.clone(),
            None => documents.push(document.clone()),
        }
        document
    }
}

impl<T: Document> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        InMemoryRepository {
            documents: Arc::clone(&self.documents),
        }
    }
}

#[async_trait]
impl<T: Document> Repository<T> for InMemoryRepository<T> {
    async fn find_all(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.documents.read()?.clone())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<T>> {
        let documents = self.documents.read()?;
        Ok(documents.iter().find(|d| d.id() == Some(id)).cloned())
    }

    async fn save(&self, document: T) -> RepositoryResult<T> {
        let mut documents = self.documents.write()?;
        Ok(Self::upsert(&mut documents, document))
    }

    async fn save_all(&self, documents: Vec<T>) -> RepositoryResult<Vec<T>> {
        let mut stored = self.documents.write()?;
        Ok(documents
            .into_iter()
            .map(|document| Self::upsert(&mut stored, document))
            .collect())
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.documents.read()?.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================
