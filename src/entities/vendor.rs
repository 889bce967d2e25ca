// 🏪 Vendor Entity - `{id, firstName, lastName}`
//
// PATCH looks at both name fields; each one that is present and differs is copied.

use serde::{Deserialize, Serialize};

use super::{patch_field, Document};

/// Vendor document, camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,
}

impl Vendor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Vendor {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    pub fn with_id(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Vendor {
            id: Some(id.into()),
            ..Vendor::new(first_name, last_name)
        }
    }
}

impl Document for Vendor {
    const COLLECTION: &'static str = "vendors";

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
        // Both fields must be visited, so no short-circuit `||`.
        let first = patch_field(&mut self.first_name, &changes.first_name);
        let last = patch_field(&mut self.last_name, &changes.last_name);
        first | last
    }
}

// ============================================================================
// TESTS
// ============================================================================
