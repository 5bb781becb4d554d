//! In-memory schema catalog
//!
//! Stand-in for the organization master database the lookup tools would
//! normally query. Lookups only — the generated SQL is never executed, so
//! nothing here is ever written after construction.

/// A registered organization
#[derive(Debug, Clone)]
pub struct OrganizationRecord {
    pub org_id: String,
    pub legal_name: String,
}

/// A process belonging to an organization
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub org_id: String,
    pub process_id: i64,
    pub process_name: String,
}

/// An event under a process
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub org_id: String,
    pub process_id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub page_id: i64,
}

/// A field in the field catalog
#[derive(Debug, Clone)]
pub struct FieldRecord {
    pub field_id: String,
    pub data_field_id: String,
    pub field_type: String,
    pub display_type: String,
    pub validation_type: String,
}

/// The lookup data behind the tool set
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub organizations: Vec<OrganizationRecord>,
    pub processes: Vec<ProcessRecord>,
    pub events: Vec<EventRecord>,
    pub fields: Vec<FieldRecord>,
}

impl Catalog {
    /// Exact match on the legal name
    pub fn organization_by_name(&self, legal_name: &str) -> Option<&OrganizationRecord> {
        self.organizations
            .iter()
            .find(|o| o.legal_name == legal_name)
    }

    /// Exact match on process name, scoped to one organization
    pub fn process_by_name(&self, process_name: &str, org_id: &str) -> Option<&ProcessRecord> {
        self.processes
            .iter()
            .find(|p| p.process_name == process_name && p.org_id == org_id)
    }

    /// Highest process id across all organizations, if any exist
    pub fn max_process_id(&self) -> Option<i64> {
        self.processes.iter().map(|p| p.process_id).max()
    }

    /// Events for a process within one organization, ordered by event id
    pub fn events_for_process(&self, process_id: i64, org_id: &str) -> Vec<&EventRecord> {
        let mut events: Vec<&EventRecord> = self
            .events
            .iter()
            .filter(|e| e.process_id == process_id && e.org_id == org_id)
            .collect();
        events.sort_by_key(|e| e.event_id);
        events
    }

    /// Case-insensitive match on field id
    pub fn field_by_id(&self, field_id: &str) -> Option<&FieldRecord> {
        self.fields
            .iter()
            .find(|f| f.field_id.eq_ignore_ascii_case(field_id))
    }

    /// Demo data for the REPL binary
    pub fn with_sample_data() -> Self {
        Self {
            organizations: vec![
                OrganizationRecord {
                    org_id: "O1".to_string(),
                    legal_name: "Acme Inc".to_string(),
                },
                OrganizationRecord {
                    org_id: "O2".to_string(),
                    legal_name: "Globex Corporation".to_string(),
                },
            ],
            processes: vec![
                ProcessRecord {
                    org_id: "O1".to_string(),
                    process_id: 100,
                    process_name: "Onboarding".to_string(),
                },
                ProcessRecord {
                    org_id: "O1".to_string(),
                    process_id: 200,
                    process_name: "Billing".to_string(),
                },
                ProcessRecord {
                    org_id: "O2".to_string(),
                    process_id: 300,
                    process_name: "Claims".to_string(),
                },
            ],
            events: vec![
                EventRecord {
                    org_id: "O1".to_string(),
                    process_id: 100,
                    event_id: 101,
                    event_name: "Welcome".to_string(),
                    page_id: 101,
                },
                EventRecord {
                    org_id: "O1".to_string(),
                    process_id: 100,
                    event_id: 102,
                    event_name: "Documents".to_string(),
                    page_id: 102,
                },
            ],
            fields: vec![
                FieldRecord {
                    field_id: "user_name".to_string(),
                    data_field_id: "user_name".to_string(),
                    field_type: "D".to_string(),
                    display_type: "label".to_string(),
                    validation_type: "A".to_string(),
                },
                FieldRecord {
                    field_id: "email_address".to_string(),
                    data_field_id: "email_address".to_string(),
                    field_type: "D".to_string(),
                    display_type: "label".to_string(),
                    validation_type: "E".to_string(),
                },
                FieldRecord {
                    field_id: "date_of_birth".to_string(),
                    data_field_id: "date_of_birth".to_string(),
                    field_type: "D".to_string(),
                    display_type: "date".to_string(),
                    validation_type: "D".to_string(),
                },
                FieldRecord {
                    field_id: "remarks".to_string(),
                    data_field_id: "remarks".to_string(),
                    field_type: "D".to_string(),
                    display_type: "textarea".to_string(),
                    validation_type: "NM".to_string(),
                },
            ],
        }
    }
}
