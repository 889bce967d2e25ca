//! Shared helpers for the HTTP tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use catalog_rest::{
    router, AppState, Category, Document, InMemoryRepository, Repository, RepositoryError,
    RepositoryResult, Vendor,
};

/// In-memory repository that counts write calls and can be told to fail.
pub struct RecordingRepository<T> {
    inner: InMemoryRepository<T>,
    pub saves: AtomicUsize,
    pub batch_saves: AtomicUsize,
    pub batch_sizes: std::sync::Mutex<Vec<usize>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl<T: Document> RecordingRepository<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::build(false, false))
    }

    /// Every read returns an error
    pub fn failing() -> Arc<Self> {
        Arc::new(Self::build(true, false))
    }

    /// Reads succeed, `save` and `save_all` return an error
    pub fn failing_writes() -> Arc<Self> {
        Arc::new(Self::build(false, true))
    }

    fn build(fail_reads: bool, fail_writes: bool) -> Self {
        RecordingRepository {
            inner: InMemoryRepository::new(),
            saves: AtomicUsize::new(0),
            batch_saves: AtomicUsize::new(0),
            batch_sizes: std::sync::Mutex::new(Vec::new()),
            fail_reads,
            fail_writes,
        }
    }

    /// Insert without touching the counters
    pub async fn preload(&self, documents: Vec<T>) {
        self.inner.save_all(documents).await.unwrap();
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn batch_save_count(&self) -> usize {
        self.batch_saves.load(Ordering::SeqCst)
    }

    fn check(&self, fail: bool) -> RepositoryResult<()> {
        if fail {
            Err(RepositoryError::Poisoned)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<T: Document> Repository<T> for RecordingRepository<T> {
    async fn find_all(&self) -> RepositoryResult<Vec<T>> {
        self.check(self.fail_reads)?;
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<T>> {
        self.check(self.fail_reads)?;
        self.inner.find_by_id(id).await
    }

    async fn save(&self, document: T) -> RepositoryResult<T> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check(self.fail_writes)?;
        self.inner.save(document).await
    }

    async fn save_all(&self, documents: Vec<T>) -> RepositoryResult<Vec<T>> {
        self.batch_saves.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(documents.len());
        self.check(self.fail_writes)?;
        self.inner.save_all(documents).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub categories: Arc<RecordingRepository<Category>>,
    pub vendors: Arc<RecordingRepository<Vendor>>,
}

pub fn test_app() -> TestApp {
    app_with(RecordingRepository::new(), RecordingRepository::new())
}

pub fn app_with(
    categories: Arc<RecordingRepository<Category>>,
    vendors: Arc<RecordingRepository<Vendor>>,
) -> TestApp {
    let router = router(AppState::new(categories.clone(), vendors.clone()));
    TestApp {
        router,
        categories,
        vendors,
    }
}

/// Send one request through the router; returns status and raw body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub fn json<T: serde::de::DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).expect("response body is JSON")
}
