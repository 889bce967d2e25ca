// Endpoint - CRUD operations for one document type
//
// Each operation is a thin pass-through to the repository. The only decision
// made here is whether a PATCH needs to be saved at all.

use std::sync::Arc;
use tracing::debug;

use crate::entities::{Category, Document, Vendor};
use crate::error::ApiError;
use crate::repository::Repository;

/// CRUD surface for one collection. Holds nothing but the repository handle.
pub struct Endpoint<T: Document> {
    repository: Arc<dyn Repository<T>>,
}

pub type CategoryEndpoint = Endpoint<Category>;
pub type VendorEndpoint = Endpoint<Vendor>;

impl<T: Document> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Endpoint {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<T: Document> Endpoint<T> {
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Endpoint { repository }
    }

    /// Every document, in repository order.
    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        let documents = self.repository.find_all().await?;
        debug!(collection = T::COLLECTION, count = documents.len(), "list");
        Ok(documents)
    }

    /// Absence is not an error here; callers get `None`.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<T>, ApiError> {
        debug!(collection = T::COLLECTION, id, "get_by_id");
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Persist zero or more documents through a single batch save.
    pub async fn create(&self, documents: Vec<T>) -> Result<(), ApiError> {
        let count = documents.len();
        self.repository.save_all(documents).await?;
        debug!(collection = T::COLLECTION, count, "create");
        Ok(())
    }

    /// Full replace. The path id always wins over any id in the body.
    pub async fn update(&self, id: &str, mut document: T) -> Result<T, ApiError> {
        document.set_id(id.to_string());
        debug!(collection = T::COLLECTION, id, "update");
        Ok(self.repository.save(document).await?)
    }

    /// Conditional partial update.
    ///
    /// Looks up the stored document, merges the patchable fields from
    /// `changes`, and saves only when something actually changed. An unchanged
    /// patch returns the stored document without touching the repository again.
    pub async fn patch(&self, id: &str, changes: T) -> Result<T, ApiError> {
        let mut found = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            })?;

        let save_needed = found.apply_patch(&changes);
        debug!(collection = T::COLLECTION, id, save_needed, "patch");

        if save_needed {
            Ok(self.repository.save(found).await?)
        } else {
            Ok(found)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
