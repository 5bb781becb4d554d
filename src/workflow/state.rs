//! Workflow state types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow state for one form-page creation conversation.
///
/// The set is closed: every transition is written against these variants and
/// `Complete` has no outgoing transitions — a reset is required to continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Waiting for the user to start a form-page workflow
    #[default]
    Idle,

    /// Waiting for an organization legal name
    OrgNeeded,

    /// Waiting for a process name
    ProcessNeeded,

    /// Process name missed lookup; waiting for a yes/no on creating it
    ProcessCreationConfirm,

    /// Next event id is resolved automatically on the next step
    EventNeeded,

    /// Waiting for a page title
    PageTitleNeeded,

    /// Collecting field ids until the user says done
    FieldsNeeded,

    /// Field id missed lookup; waiting for a yes/no on creating it
    FieldCreationConfirm,

    /// Waiting for the new field's display type
    FieldDisplayType,

    /// Waiting for the new field's validation type
    FieldValidationType,

    /// All data collected; SQL is generated on the next step
    SqlGeneration,

    /// Terminal: SQL returned, nothing more to do without a reset
    Complete,
}

impl WorkflowState {
    /// Terminal states cannot transition out
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Complete)
    }

    /// Stable snake_case tag, shared with the serde representation
    pub fn tag(self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::OrgNeeded => "org_needed",
            WorkflowState::ProcessNeeded => "process_needed",
            WorkflowState::ProcessCreationConfirm => "process_creation_confirm",
            WorkflowState::EventNeeded => "event_needed",
            WorkflowState::PageTitleNeeded => "page_title_needed",
            WorkflowState::FieldsNeeded => "fields_needed",
            WorkflowState::FieldCreationConfirm => "field_creation_confirm",
            WorkflowState::FieldDisplayType => "field_display_type",
            WorkflowState::FieldValidationType => "field_validation_type",
            WorkflowState::SqlGeneration => "sql_generation",
            WorkflowState::Complete => "complete",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Widget kind for a newly created field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Label,
    Checkbox,
    Radio,
    Textarea,
    Select,
    Date,
}

impl DisplayType {
    pub const ALL: [DisplayType; 6] = [
        DisplayType::Label,
        DisplayType::Checkbox,
        DisplayType::Radio,
        DisplayType::Textarea,
        DisplayType::Select,
        DisplayType::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayType::Label => "label",
            DisplayType::Checkbox => "checkbox",
            DisplayType::Radio => "radio",
            DisplayType::Textarea => "textarea",
            DisplayType::Select => "select",
            DisplayType::Date => "date",
        }
    }

    /// The valid set, for re-prompting after an invalid answer
    pub fn valid_set() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|d| d.as_str()).collect();
        names.join("/")
    }
}

impl FromStr for DisplayType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label" => Ok(DisplayType::Label),
            "checkbox" => Ok(DisplayType::Checkbox),
            "radio" => Ok(DisplayType::Radio),
            "textarea" => Ok(DisplayType::Textarea),
            "select" => Ok(DisplayType::Select),
            "date" => Ok(DisplayType::Date),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient slot for a field being interactively created.
///
/// Entered when a field lookup misses, filled across the display-type and
/// validation-type states, and cleared the moment the field is committed to
/// the list (or creation is cancelled).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingField {
    pub field_id: String,
    pub display_type: Option<DisplayType>,
}

impl PendingField {
    pub fn new(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            display_type: None,
        }
    }
}
