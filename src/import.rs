// CSV import for categories and vendors
//
// Expected headers:
//   categories: description
//   vendors:    firstName,lastName
// Any `id` column is ignored; the repository assigns fresh ids.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::entities::{Category, Document, Vendor};

pub fn read_documents<T: Document, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut documents = Vec::new();
    for (line, result) in rdr.deserialize::<T>().enumerate() {
        // +2: header row, 1-based lines
        let mut document = result.with_context(|| format!("Failed to parse CSV row {}", line + 2))?;
        document.clear_id();
        documents.push(document);
    }

    Ok(documents)
}

fn load_csv<T: Document>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
    read_documents(file)
}

pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
    load_csv(path)
}

pub fn load_vendors(path: &Path) -> Result<Vec<Vendor>> {
    load_csv(path)
}
