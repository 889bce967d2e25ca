// Catalog REST - Core Library
// Exposes all modules for use in the CLI, the API server, and tests

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod endpoint;
pub mod entities;
pub mod error;
pub mod import;
pub mod logging;
pub mod repository;

// Re-export commonly used types
pub use api::{router, AppState, ApiResponse, CATEGORIES_PATH, VENDORS_PATH};
pub use config::{Repositories, ServerConfig, StoreConfig};
pub use db::{open_database, open_in_memory, setup_database, SqliteRepository};
pub use endpoint::{CategoryEndpoint, Endpoint, VendorEndpoint};
pub use entities::{Category, Document, Vendor};
pub use error::{ApiError, RepositoryError, INTERNAL_ERROR_MESSAGE};
pub use repository::{InMemoryRepository, Repository, RepositoryResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
