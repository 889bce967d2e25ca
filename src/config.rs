//! Runtime configuration from flags and `CATALOG_*` environment variables.

use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::db::{self, SqliteRepository};
use crate::entities::{Category, Vendor};
use crate::repository::{InMemoryRepository, Repository};

/// Storage and logging options shared by the server and the CLI.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// SQLite database file
    #[arg(long, env = "CATALOG_DATABASE", default_value = "catalog.db")]
    pub database: PathBuf,

    /// Keep documents in process memory instead of SQLite
    #[arg(long, env = "CATALOG_IN_MEMORY")]
    pub in_memory: bool,

    /// Default tracing filter when RUST_LOG is unset
    #[arg(long = "log", env = "CATALOG_LOG", default_value = "info")]
    pub log_filter: String,
}

/// HTTP server options
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CATALOG_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Load default categories and vendors into empty collections
    #[arg(long, env = "CATALOG_SEED")]
    pub seed: bool,

    #[command(flatten)]
    pub store: StoreConfig,
}

/// One repository per collection
pub struct Repositories {
    pub categories: Arc<dyn Repository<Category>>,
    pub vendors: Arc<dyn Repository<Vendor>>,
}

impl StoreConfig {
    /// Build the repositories this configuration selects.
    pub fn open(&self) -> anyhow::Result<Repositories> {
        if self.in_memory {
            tracing::info!("using in-memory repositories");
            return Ok(Repositories {
                categories: Arc::new(InMemoryRepository::<Category>::new()),
                vendors: Arc::new(InMemoryRepository::<Vendor>::new()),
            });
        }

        let conn = db::open_database(&self.database)?;
        tracing::info!(path = %self.database.display(), "database opened");
        Ok(Repositories {
            categories: Arc::new(SqliteRepository::<Category>::new(conn.clone())),
            vendors: Arc::new(SqliteRepository::<Vendor>::new(conn)),
        })
    }
}
