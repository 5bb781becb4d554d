//! Wire shapes for tool replies
//!
//! Every lookup/side-effect tool answers with a JSON object in one of these
//! shapes; the step function parses them leniently (a missing or malformed
//! reply reads as a miss, never as a transport error). The one exception is
//! `generate_form_page_sql`, whose reply is raw SQL text, not JSON.
//!
//! Key casing is camelCase on the wire — these structs are the single source
//! of truth for both the tool side (serialize) and the workflow side
//! (deserialize).

use serde::{Deserialize, Serialize};

/// Reply from `get_organization_by_name`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgReply {
    pub success: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply from `get_process_by_name`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessReply {
    pub success: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply from `get_max_process_id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaxProcessIdReply {
    pub success: bool,
    pub max_process_id: i64,
    pub suggested_next_process_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One known event, echoed by `get_events_for_process`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSummary {
    pub event_id: i64,
    pub event_name: String,
    pub page_id: i64,
}

/// Reply from `get_events_for_process`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventsReply {
    pub success: bool,
    pub events: Vec<EventSummary>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_event_id: Option<i64>,
    pub suggested_next_event_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply from `check_field_exists`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldReply {
    pub success: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_field_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply from `generate_page_url`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageUrlReply {
    pub success: bool,
    #[serde(rename = "pageTitle", skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(rename = "pageDisplayName", skip_serializing_if = "Option::is_none")]
    pub page_display_name: Option<String>,
    #[serde(rename = "pageURL", skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generic failure shape produced by the gateway's soft-fail policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReply {
    pub success: bool,
    pub error: String,
}

impl FailureReply {
    pub fn text(error: impl Into<String>) -> String {
        let reply = FailureReply {
            success: false,
            error: error.into(),
        };
        serde_json::to_string(&reply).unwrap_or_else(|_| "{\"success\":false}".to_string())
    }
}
