//! Lookup tools over the schema catalog
//!
//! Each tool answers with one of the `wire` JSON shapes. A miss is a normal
//! outcome (`found=false`), never an error — and anything that would be an
//! error (bad arguments, a failing data source) is mapped to a miss with an
//! `error` field so the workflow can always continue.

use super::wire::{
    EventSummary, EventsReply, FailureReply, FieldReply, MaxProcessIdReply, OrgReply, ProcessReply,
};
use super::{Catalog, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// New processes are suggested ids in steps of 100; events advance by 1.
/// The asymmetry is deliberate and mirrors how ids are partitioned in the
/// target schema.
const PROCESS_ID_STRIDE: i64 = 100;

fn to_text<T: serde::Serialize>(reply: &T) -> String {
    serde_json::to_string_pretty(reply).unwrap_or_else(|e| FailureReply::text(e.to_string()))
}

// ----------------------------------------------------------------------------
// get_organization_by_name
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct OrgArgs {
    legal_name: String,
}

/// Resolve an organization id from its exact legal name
pub struct OrganizationLookup {
    catalog: Arc<Catalog>,
}

impl OrganizationLookup {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for OrganizationLookup {
    fn name(&self) -> &'static str {
        "get_organization_by_name"
    }

    fn description(&self) -> &'static str {
        "Get organization details by legal name; returns the orgId needed for form page creation"
    }

    async fn call(&self, args: Value) -> String {
        let Ok(args) = serde_json::from_value::<OrgArgs>(args) else {
            return to_text(&OrgReply {
                success: true,
                found: false,
                error: Some("missing legal_name argument".to_string()),
                ..OrgReply::default()
            });
        };
        match self.catalog.organization_by_name(&args.legal_name) {
            Some(org) => to_text(&OrgReply {
                success: true,
                found: true,
                org_id: Some(org.org_id.clone()),
                legal_name: Some(org.legal_name.clone()),
                ..OrgReply::default()
            }),
            None => to_text(&OrgReply {
                success: true,
                found: false,
                message: Some(format!("Organization '{}' not found", args.legal_name)),
                ..OrgReply::default()
            }),
        }
    }
}

// ----------------------------------------------------------------------------
// get_process_by_name
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProcessArgs {
    process_name: String,
    org_id: String,
}

/// Check whether a process exists for an organization
pub struct ProcessLookup {
    catalog: Arc<Catalog>,
}

impl ProcessLookup {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for ProcessLookup {
    fn name(&self) -> &'static str {
        "get_process_by_name"
    }

    fn description(&self) -> &'static str {
        "Check if a process exists for a specific organization; returns processId if found"
    }

    async fn call(&self, args: Value) -> String {
        let Ok(args) = serde_json::from_value::<ProcessArgs>(args) else {
            return to_text(&ProcessReply {
                success: true,
                found: false,
                error: Some("expected process_name and org_id arguments".to_string()),
                ..ProcessReply::default()
            });
        };
        match self.catalog.process_by_name(&args.process_name, &args.org_id) {
            Some(process) => to_text(&ProcessReply {
                success: true,
                found: true,
                process_id: Some(process.process_id),
                process_name: Some(process.process_name.clone()),
                org_id: Some(process.org_id.clone()),
                ..ProcessReply::default()
            }),
            None => to_text(&ProcessReply {
                success: true,
                found: false,
                message: Some(format!(
                    "Process '{}' not found for organization ID {}",
                    args.process_name, args.org_id
                )),
                ..ProcessReply::default()
            }),
        }
    }
}

// ----------------------------------------------------------------------------
// get_max_process_id
// ----------------------------------------------------------------------------

/// Suggest the next process id for a brand-new process (max + 100)
pub struct MaxProcessId {
    catalog: Arc<Catalog>,
}

impl MaxProcessId {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for MaxProcessId {
    fn name(&self) -> &'static str {
        "get_max_process_id"
    }

    fn description(&self) -> &'static str {
        "Get the maximum processId and the suggested next id (max + 100) for a new process"
    }

    async fn call(&self, _args: Value) -> String {
        let max_id = self.catalog.max_process_id().unwrap_or(0);
        to_text(&MaxProcessIdReply {
            success: true,
            max_process_id: max_id,
            suggested_next_process_id: max_id + PROCESS_ID_STRIDE,
            error: None,
        })
    }
}

// ----------------------------------------------------------------------------
// get_events_for_process
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EventsArgs {
    process_id: i64,
    org_id: String,
}

/// List a process's events and suggest the next event id (max + 1, or the
/// process id itself when no events exist yet)
pub struct NextEventId {
    catalog: Arc<Catalog>,
}

impl NextEventId {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for NextEventId {
    fn name(&self) -> &'static str {
        "get_events_for_process"
    }

    fn description(&self) -> &'static str {
        "Get all events for a process and the suggested next eventId"
    }

    async fn call(&self, args: Value) -> String {
        let Ok(args) = serde_json::from_value::<EventsArgs>(args) else {
            return to_text(&EventsReply {
                success: false,
                error: Some("expected process_id and org_id arguments".to_string()),
                ..EventsReply::default()
            });
        };
        let records = self.catalog.events_for_process(args.process_id, &args.org_id);
        let events: Vec<EventSummary> = records
            .iter()
            .map(|e| EventSummary {
                event_id: e.event_id,
                event_name: e.event_name.clone(),
                page_id: e.page_id,
            })
            .collect();
        let max_event_id = events.iter().map(|e| e.event_id).max();
        let next_event_id = max_event_id.map_or(args.process_id, |max| max + 1);
        to_text(&EventsReply {
            success: true,
            count: events.len(),
            message: Some(format!(
                "Found {} existing events. Next available eventId: {next_event_id}",
                events.len()
            )),
            events,
            max_event_id,
            suggested_next_event_id: next_event_id,
            error: None,
        })
    }
}

// ----------------------------------------------------------------------------
// check_field_exists
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FieldArgs {
    field_id: String,
}

/// Case-insensitive existence check against the field catalog
pub struct FieldLookup {
    catalog: Arc<Catalog>,
}

impl FieldLookup {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for FieldLookup {
    fn name(&self) -> &'static str {
        "check_field_exists"
    }

    fn description(&self) -> &'static str {
        "Check if a field exists in the field catalog (case-insensitive); returns its details"
    }

    async fn call(&self, args: Value) -> String {
        let Ok(args) = serde_json::from_value::<FieldArgs>(args) else {
            // A failure still reads as "not found, you may create it" so the
            // field flow never dead-ends.
            return to_text(&FieldReply {
                success: true,
                found: false,
                error: Some("missing field_id argument".to_string()),
                ..FieldReply::default()
            });
        };
        match self.catalog.field_by_id(&args.field_id) {
            Some(field) => to_text(&FieldReply {
                success: true,
                found: true,
                field_id: Some(field.field_id.clone()),
                data_field_id: Some(field.data_field_id.clone()),
                field_type: Some(field.field_type.clone()),
                display_type: Some(field.display_type.clone()),
                validation_type: Some(field.validation_type.clone()),
                message: Some(format!("Field '{}' exists", field.field_id)),
                ..FieldReply::default()
            }),
            None => to_text(&FieldReply {
                success: true,
                found: false,
                searched_for: Some(args.field_id.clone()),
                message: Some(format!("Field '{}' not found", args.field_id)),
                ..FieldReply::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::with_sample_data())
    }

    #[tokio::test]
    async fn organization_hit_and_miss() {
        let tool = OrganizationLookup::new(catalog());
        let hit: OrgReply =
            serde_json::from_str(&tool.call(json!({"legal_name": "Acme Inc"})).await).unwrap();
        assert!(hit.found);
        assert_eq!(hit.org_id.as_deref(), Some("O1"));

        let miss: OrgReply =
            serde_json::from_str(&tool.call(json!({"legal_name": "Nobody"})).await).unwrap();
        assert!(miss.success);
        assert!(!miss.found);
    }

    #[tokio::test]
    async fn bad_arguments_read_as_miss_not_error() {
        let tool = OrganizationLookup::new(catalog());
        let reply: OrgReply = serde_json::from_str(&tool.call(json!({})).await).unwrap();
        assert!(!reply.found);
        assert!(reply.error.is_some());
    }

    #[tokio::test]
    async fn max_process_id_suggests_plus_one_hundred() {
        let tool = MaxProcessId::new(catalog());
        let reply: MaxProcessIdReply =
            serde_json::from_str(&tool.call(json!({})).await).unwrap();
        assert_eq!(reply.max_process_id, 300);
        assert_eq!(reply.suggested_next_process_id, 400);

        let empty = MaxProcessId::new(Arc::new(Catalog::default()));
        let reply: MaxProcessIdReply =
            serde_json::from_str(&empty.call(json!({})).await).unwrap();
        assert_eq!(reply.suggested_next_process_id, 100);
    }

    #[tokio::test]
    async fn next_event_id_is_max_plus_one_or_process_id() {
        let tool = NextEventId::new(catalog());
        let reply: EventsReply = serde_json::from_str(
            &tool.call(json!({"process_id": 100, "org_id": "O1"})).await,
        )
        .unwrap();
        assert_eq!(reply.suggested_next_event_id, 103);
        assert_eq!(reply.count, 2);

        let reply: EventsReply = serde_json::from_str(
            &tool.call(json!({"process_id": 200, "org_id": "O1"})).await,
        )
        .unwrap();
        // no events yet: the process id doubles as the first event id
        assert_eq!(reply.suggested_next_event_id, 200);
        assert_eq!(reply.max_event_id, None);
    }

    #[tokio::test]
    async fn field_hit_returns_canonical_casing() {
        let tool = FieldLookup::new(catalog());
        let reply: FieldReply = serde_json::from_str(
            &tool.call(json!({"field_id": "USER_NAME"})).await,
        )
        .unwrap();
        assert!(reply.found);
        assert_eq!(reply.field_id.as_deref(), Some("user_name"));
        assert_eq!(reply.display_type.as_deref(), Some("label"));
        assert_eq!(reply.validation_type.as_deref(), Some("A"));
    }
}
