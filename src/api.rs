// REST API - route table and axum handlers
//
// Routes per collection ({base} also answers with a trailing slash):
//   GET    {base}       list
//   POST   {base}       create (one object or an array)
//   GET    {base}/:id   get_by_id (empty 200 body when absent)
//   PUT    {base}/:id   update
//   PATCH  {base}/:id   patch

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::endpoint::{CategoryEndpoint, Endpoint, VendorEndpoint};
use crate::entities::{Category, Document, Vendor};
use crate::error::ApiError;
use crate::repository::Repository;

pub const CATEGORIES_PATH: &str = "/api/v1/categories";
pub const VENDORS_PATH: &str = "/api/v1/vendors";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryEndpoint,
    pub vendors: VendorEndpoint,
}

impl AppState {
    pub fn new(
        categories: Arc<dyn Repository<Category>>,
        vendors: Arc<dyn Repository<Vendor>>,
    ) -> Self {
        AppState {
            categories: Endpoint::new(categories),
            vendors: Endpoint::new(vendors),
        }
    }
}

/// Envelope for health and error bodies. Entities are returned bare.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// POST body: a single document or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

async fn list<T: Document>(
    State(endpoint): State<Endpoint<T>>,
) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(endpoint.list().await?))
}

async fn get_by_id<T: Document>(
    State(endpoint): State<Endpoint<T>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(match endpoint.get_by_id(&id).await? {
        Some(document) => Json(document).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

async fn create<T: Document>(
    State(endpoint): State<Endpoint<T>>,
    Json(body): Json<OneOrMany<T>>,
) -> Result<StatusCode, ApiError> {
    endpoint.create(body.into_vec()).await?;
    Ok(StatusCode::CREATED)
}

async fn update<T: Document>(
    State(endpoint): State<Endpoint<T>>,
    Path(id): Path<String>,
    Json(document): Json<T>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(endpoint.update(&id, document).await?))
}

async fn patch<T: Document>(
    State(endpoint): State<Endpoint<T>>,
    Path(id): Path<String>,
    Json(changes): Json<T>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(endpoint.patch(&id, changes).await?))
}

// ============================================================================
// Router
// ============================================================================

/// CRUD routes for one collection mounted at `base`
pub fn resource_routes<T: Document>(base: &str, endpoint: Endpoint<T>) -> Router {
    Router::new()
        .route(base, get(list::<T>).post(create::<T>))
        .route(&format!("{base}/"), get(list::<T>).post(create::<T>))
        .route(
            &format!("{base}/:id"),
            get(get_by_id::<T>).put(update::<T>).patch(patch::<T>),
        )
        .with_state(endpoint)
}

/// Full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(resource_routes(CATEGORIES_PATH, state.categories))
        .merge(resource_routes(VENDORS_PATH, state.vendors))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
