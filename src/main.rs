use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use catalog_rest::{bootstrap, import, logging, Repositories, StoreConfig};

#[derive(Debug, Parser)]
#[command(name = "catalog-rest", version, about = "Manage the category/vendor catalog")]
struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load default categories and vendors into empty collections
    Seed,
    /// Import documents from a CSV file
    Import {
        collection: Collection,
        file: PathBuf,
    },
    /// Print stored documents, one JSON object per line
    List { collection: Collection },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Collection {
    Categories,
    Vendors,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_tracing(&cli.store.log_filter);

    let repos = cli.store.open()?;

    match cli.command {
        Command::Seed => run_seed(&repos).await,
        Command::Import { collection, file } => run_import(&repos, collection, &file).await,
        Command::List { collection } => run_list(&repos, collection).await,
    }
}

async fn run_seed(repos: &Repositories) -> Result<()> {
    println!("🌱 Seeding default catalog data...");

    let report = bootstrap::seed(repos.categories.as_ref(), repos.vendors.as_ref()).await?;

    println!("✓ Categories inserted: {}", report.categories);
    println!("✓ Vendors inserted: {}", report.vendors);
    Ok(())
}

async fn run_import(repos: &Repositories, collection: Collection, file: &Path) -> Result<()> {
    println!("📂 Loading CSV {}...", file.display());

    let saved = match collection {
        Collection::Categories => {
            let categories = import::load_categories(file)?;
            repos.categories.save_all(categories).await?.len()
        }
        Collection::Vendors => {
            let vendors = import::load_vendors(file)?;
            repos.vendors.save_all(vendors).await?.len()
        }
    };

    println!("✓ Imported {} documents", saved);
    Ok(())
}

async fn run_list(repos: &Repositories, collection: Collection) -> Result<()> {
    let lines = match collection {
        Collection::Categories => to_json_lines(&repos.categories.find_all().await?)?,
        Collection::Vendors => to_json_lines(&repos.vendors.find_all().await?)?,
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn to_json_lines<T: serde::Serialize>(documents: &[T]) -> Result<Vec<String>> {
    documents
        .iter()
        .map(|d| serde_json::to_string(d).context("Failed to encode document"))
        .collect()
}
