//! Form-data aggregate
//!
//! The read-only projection of session memory handed to the renderer. Field
//! names are snake_case on the wire; every collection and flag defaults so a
//! sparse aggregate still deserializes.

use serde::{Deserialize, Serialize};

fn default_group_id() -> i64 {
    1
}

/// A field that does not yet exist in the field catalog and needs an
/// `adminFields` insert of its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewField {
    pub field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_type: Option<String>,
}

/// One `orgPageValues` row: a field placed on the page, existing or new
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageValue {
    pub field_id: String,
    #[serde(default = "default_group_id")]
    pub group_id: i64,
    #[serde(default = "default_group_id")]
    pub field_group_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_type: Option<String>,
}

/// The validated snapshot passed to [`crate::sqlgen::render`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    pub process_id: i64,
    #[serde(default)]
    pub process_name: Option<String>,
    #[serde(default)]
    pub is_new_process: bool,
    pub event_id: i64,
    pub page_id: i64,
    pub page_title: String,
    pub page_url: String,
    /// Defaults to the page title when absent
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default = "default_group_id")]
    pub group_id: i64,
    #[serde(default)]
    pub is_new_group: bool,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub field_groups: Vec<i64>,
    #[serde(default)]
    pub new_fields: Vec<NewField>,
    #[serde(default)]
    pub page_values: Vec<PageValue>,
}

impl FormData {
    /// Event name, falling back to the page title
    pub fn event_name(&self) -> &str {
        self.event_name.as_deref().unwrap_or(&self.page_title)
    }

    /// Group name, falling back to `Group_<id>`
    pub fn group_name(&self) -> String {
        self.group_name
            .clone()
            .unwrap_or_else(|| format!("Group_{}", self.group_id))
    }
}
