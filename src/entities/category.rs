// 🏷️ Category Entity - `{id, description}`
//
// PATCH only looks at `description`.

use serde::{Deserialize, Serialize};

use super::{patch_field, Document};

/// Category document.
///
/// `id` is omitted from JSON until the repository assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Category {
    /// Create new category without identity
    pub fn new(description: impl Into<String>) -> Self {
        Category {
            id: None,
            description: Some(description.into()),
        }
    }

    /// Create category with a known id
    pub fn with_id(id: impl Into<String>, description: impl Into<String>) -> Self {
        Category {
            id: Some(id.into()),
            ..Category::new(description)
        }
    }
}

impl Document for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn apply_patch(&mut self, changes: &Self) -> bool {
        patch_field(&mut self.description, &changes.description)
    }
}

// ============================================================================
// TESTS
// ============================================================================
