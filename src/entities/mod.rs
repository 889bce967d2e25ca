// Entity Models - Category and Vendor documents
//
// Each entity has:
// - Opaque string identity, unset until the repository assigns one
// - Business fields that PUT replaces wholesale and PATCH merges field by field

pub mod category;
pub mod vendor;

pub use category::Category;
pub use vendor::Vendor;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A JSON document stored in a named collection.
///
/// Repositories and endpoints are written once against this trait and reused
/// for every entity type.
pub trait Document:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection name used by the storage layer and in log fields.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    fn clear_id(&mut self);

    /// Copy the patchable fields that `changes` carries and that differ from
    /// `self`. Returns `true` when at least one field changed.
    ///
    /// A field that is missing or `null` in `changes` is left untouched, so a
    /// patch can never clear a stored value.
    fn apply_patch(&mut self, changes: &Self) -> bool;

    /// Assign a fresh UUID if the document has none yet.
    fn ensure_id(&mut self) -> &str {
        if self.id().map_or(true, str::is_empty) {
            self.set_id(uuid::Uuid::new_v4().to_string());
        }
        self.id().unwrap_or_default()
    }
}

/// Overwrite `current` with `incoming` when `incoming` is present and differs.
pub(crate) fn patch_field(current: &mut Option<String>, incoming: &Option<String>) -> bool {
    match incoming {
        Some(value) if current.as_deref() != Some(value.as_str()) => {
            *current = Some(value.clone());
            true
        }
        _ => false,
    }
}
