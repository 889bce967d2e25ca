// Catalog REST - Web Server
// Category and Vendor CRUD API with Axum

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use catalog_rest::{bootstrap, logging, router, AppState, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "catalog-server", version, about = "Category/Vendor REST API")]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config;

    logging::setup_tracing(&config.store.log_filter);
    info!(version = catalog_rest::VERSION, "starting catalog server");

    let repos = config.store.open()?;

    if config.seed {
        let report = bootstrap::seed(repos.categories.as_ref(), repos.vendors.as_ref())
            .await
            .context("Failed to seed default data")?;
        info!(categories = report.categories, vendors = report.vendors, "seed complete");
    }

    let app = router(AppState::new(repos.categories, repos.vendors));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(addr = %config.bind, "listening");
    info!("   API: http://{}/api/v1/categories", config.bind);
    info!("   API: http://{}/api/v1/vendors", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
