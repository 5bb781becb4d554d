//! Session memory for one conversation
//!
//! The single mutable record of everything collected so far. It is owned by
//! one conversation, mutated exclusively by the step function, and replaced
//! whole on reset — never merged.

use crate::error::AssistantError;
use crate::sqlgen::{FormData, NewField, PageValue};
use crate::workflow::state::{PendingField, WorkflowState};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Group id used for every page in this design
pub const DEFAULT_GROUP_ID: i64 = 1;

/// One collected field, existing or newly defined.
///
/// Display and validation type are always present once the entry is in the
/// list: existing fields inherit them from lookup, new fields acquire them
/// through the two field-detail states before being appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub field_id: String,
    pub existing: bool,
    pub display_type: String,
    pub validation_type: String,
}

/// Everything collected so far for one form-page conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMemory {
    pub org_id: Option<String>,
    pub org_name: Option<String>,
    pub process_id: Option<i64>,
    pub process_name: Option<String>,
    pub is_new_process: bool,
    /// Only meaningful while sitting in the process-creation confirm state
    pub suggested_process_id: Option<i64>,
    pub event_id: Option<i64>,
    pub page_id: Option<i64>,
    pub page_title: Option<String>,
    pub page_url: Option<String>,
    pub group_id: i64,
    pub fields: Vec<FieldEntry>,
    pub current_state: WorkflowState,
    /// Field being interactively specified, if any
    pub pending_field: Option<PendingField>,
}

impl Default for SessionMemory {
    fn default() -> Self {
        Self {
            org_id: None,
            org_name: None,
            process_id: None,
            process_name: None,
            is_new_process: false,
            suggested_process_id: None,
            event_id: None,
            page_id: None,
            page_title: None,
            page_url: None,
            group_id: DEFAULT_GROUP_ID,
            fields: Vec::new(),
            current_state: WorkflowState::Idle,
            pending_field: None,
        }
    }
}

impl SessionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable dump of collected data, for the status pre-filter
    pub fn summary(&self) -> String {
        let mut out = format!("Current state: {}", self.current_state);
        if let Some(org_id) = &self.org_id {
            let name = self.org_name.as_deref().unwrap_or("?");
            let _ = write!(out, "\n  Organization: {name} (ID: {org_id})");
        }
        if let Some(process_id) = self.process_id {
            let name = self.process_name.as_deref().unwrap_or("?");
            let marker = if self.is_new_process { " [NEW]" } else { "" };
            let _ = write!(out, "\n  Process: {name} (ID: {process_id}){marker}");
        }
        if let Some(event_id) = self.event_id {
            let _ = write!(out, "\n  Event ID: {event_id}");
        }
        if let Some(page_id) = self.page_id {
            let _ = write!(out, "\n  Page ID: {page_id}");
        }
        if let Some(title) = &self.page_title {
            let url = self.page_url.as_deref().unwrap_or("?");
            let _ = write!(out, "\n  Page: {title} (URL: {url})");
        }
        if !self.fields.is_empty() {
            let _ = write!(out, "\n  Fields: {} collected", self.fields.len());
            for field in &self.fields {
                let status = if field.existing { "existing" } else { "new" };
                let _ = write!(out, "\n    - {} ({status})", field.field_id);
            }
        }
        out
    }

    /// Project the memory into the read-only form-data aggregate.
    ///
    /// Valid only once the workflow has reached SQL generation: process,
    /// event and page identifiers plus the page title and URL must all be
    /// present. Calling earlier is a caller error and is rejected with the
    /// missing field names.
    pub fn project(&self) -> Result<FormData, AssistantError> {
        let mut missing = Vec::new();
        if self.process_id.is_none() {
            missing.push("process_id");
        }
        if self.event_id.is_none() {
            missing.push("event_id");
        }
        if self.page_id.is_none() {
            missing.push("page_id");
        }
        if self.page_title.is_none() {
            missing.push("page_title");
        }
        if self.page_url.is_none() {
            missing.push("page_url");
        }
        if !missing.is_empty() {
            return Err(AssistantError::IncompleteFormData {
                missing: missing.join(", "),
            });
        }

        let page_title = self.page_title.clone().unwrap_or_default();

        let new_fields = self
            .fields
            .iter()
            .filter(|f| !f.existing)
            .map(|f| NewField {
                field_id: f.field_id.clone(),
                display_type: Some(f.display_type.clone()),
                validation_type: Some(f.validation_type.clone()),
            })
            .collect();

        let page_values = self
            .fields
            .iter()
            .map(|f| PageValue {
                field_id: f.field_id.clone(),
                group_id: self.group_id,
                field_group_id: self.group_id,
                display_label: Some(display_label_for(&f.field_id)),
                display_type: Some(f.display_type.clone()),
                validation_type: Some(f.validation_type.clone()),
            })
            .collect();

        Ok(FormData {
            org_id: self.org_id.clone(),
            org_name: self.org_name.clone(),
            process_id: self.process_id.unwrap_or_default(),
            process_name: self.process_name.clone(),
            is_new_process: self.is_new_process,
            event_id: self.event_id.unwrap_or_default(),
            page_id: self.page_id.unwrap_or_default(),
            page_title: page_title.clone(),
            page_url: self.page_url.clone().unwrap_or_default(),
            event_name: Some(page_title),
            group_id: self.group_id,
            is_new_group: false,
            group_name: None,
            field_groups: Vec::new(),
            new_fields,
            page_values,
        })
    }
}

/// Default display label for a field id: underscores become spaces and each
/// word is capitalized (`email_address` -> `Email Address`).
pub fn display_label_for(field_id: &str) -> String {
    field_id
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
