// Bootstrap - default catalog data
//
// Only collections that are still empty get seeded, so running this against an
// existing database is harmless.

use tracing::info;

use crate::entities::{Category, Vendor};
use crate::repository::{Repository, RepositoryResult};

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Fruits", "Dried", "Fresh", "Exotic", "Nuts"];

pub const DEFAULT_VENDORS: [(&str, &str); 5] = [
    ("Joe", "Buck"),
    ("Michael", "Weston"),
    ("Jessie", "Waters"),
    ("Bill", "Nershi"),
    ("Jimmy", "Buffett"),
];

/// Number of documents inserted per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub vendors: usize,
}

pub async fn seed(
    categories: &dyn Repository<Category>,
    vendors: &dyn Repository<Vendor>,
) -> RepositoryResult<SeedReport> {
    let mut report = SeedReport::default();

    if categories.count().await? == 0 {
        let defaults = DEFAULT_CATEGORIES.iter().map(|d| Category::new(*d)).collect();
        report.categories = categories.save_all(defaults).await?.len();
        info!(count = report.categories, "seeded categories");
    }

    if vendors.count().await? == 0 {
        let defaults = DEFAULT_VENDORS
            .iter()
            .map(|(first, last)| Vendor::new(*first, *last))
            .collect();
        report.vendors = vendors.save_all(defaults).await?.len();
        info!(count = report.vendors, "seeded vendors");
    }

    Ok(report)
}
