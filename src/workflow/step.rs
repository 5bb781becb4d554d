//! The transition engine
//!
//! One call to [`step`] fully processes one user utterance: it reads the
//! current state, invokes at most two tools, mutates the session memory, and
//! settles on the next state. Tool calls are awaited sequentially; there is
//! deliberately no timeout here — a hung gateway blocks the session, and a
//! reset is the recovery path.

use crate::tools::wire::{
    EventsReply, FieldReply, MaxProcessIdReply, OrgReply, PageUrlReply, ProcessReply,
};
use crate::tools::ToolGateway;
use crate::workflow::input::{self, Verdict};
use crate::workflow::memory::{FieldEntry, SessionMemory};
use crate::workflow::state::{DisplayType, PendingField, WorkflowState};
use serde::Serialize;
use serde_json::json;

/// What happened during one step, for the caller to phrase a response.
///
/// The serde `code` tags are the stable action vocabulary consumed by the
/// response layer; payload fields carry the data a phrasing needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Action {
    WorkflowStarted,
    OrganizationFound {
        org_id: String,
        org_name: String,
    },
    OrganizationNotFound,
    AskForProcessName,
    ProcessFound {
        process_id: i64,
        process_name: String,
    },
    ProcessNotFoundAskCreate {
        process_name: String,
        suggested_process_id: i64,
    },
    NewProcessConfirmed {
        process_id: i64,
        process_name: String,
    },
    ProcessNameRetry,
    UnclearProcessResponse,
    EventIdRetrieved {
        event_id: Option<i64>,
    },
    AskForPageTitle,
    PageTitleSet {
        page_title: String,
        page_url: String,
    },
    AskForFields,
    FieldAddedExisting {
        field_id: String,
        field_count: usize,
    },
    FieldNotFoundAskCreate {
        field_id: String,
    },
    NewFieldConfirmed {
        field_id: String,
    },
    FieldCreationCancelled,
    UnclearFieldResponse,
    DisplayTypeSet {
        display_type: DisplayType,
    },
    InvalidDisplayType {
        valid_types: String,
    },
    FieldAddedNew {
        field_id: String,
        field_count: usize,
    },
    NoFieldsAdded,
    FieldsComplete {
        field_count: usize,
    },
    SqlGenerated {
        sql: String,
    },
    SqlGenerationFailed {
        message: String,
    },
}

impl Action {
    /// The stable snake_case action code
    pub fn code(&self) -> &'static str {
        match self {
            Action::WorkflowStarted => "workflow_started",
            Action::OrganizationFound { .. } => "organization_found",
            Action::OrganizationNotFound => "organization_not_found",
            Action::AskForProcessName => "ask_for_process_name",
            Action::ProcessFound { .. } => "process_found",
            Action::ProcessNotFoundAskCreate { .. } => "process_not_found_ask_create",
            Action::NewProcessConfirmed { .. } => "new_process_confirmed",
            Action::ProcessNameRetry => "process_name_retry",
            Action::UnclearProcessResponse => "unclear_process_response",
            Action::EventIdRetrieved { .. } => "event_id_retrieved",
            Action::AskForPageTitle => "ask_for_page_title",
            Action::PageTitleSet { .. } => "page_title_set",
            Action::AskForFields => "ask_for_fields",
            Action::FieldAddedExisting { .. } => "field_added_existing",
            Action::FieldNotFoundAskCreate { .. } => "field_not_found_ask_create",
            Action::NewFieldConfirmed { .. } => "new_field_confirmed",
            Action::FieldCreationCancelled => "field_creation_cancelled",
            Action::UnclearFieldResponse => "unclear_field_response",
            Action::DisplayTypeSet { .. } => "display_type_set",
            Action::InvalidDisplayType { .. } => "invalid_display_type",
            Action::FieldAddedNew { .. } => "field_added_new",
            Action::NoFieldsAdded => "no_fields_added",
            Action::FieldsComplete { .. } => "fields_complete",
            Action::SqlGenerated { .. } => "sql_generated",
            Action::SqlGenerationFailed { .. } => "sql_generation_failed",
        }
    }
}

/// Result of one step: the settled state and what was done, if anything.
/// `action == None` means the utterance matched no branch and nothing moved.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub state: WorkflowState,
    pub action: Option<Action>,
}

/// Process one utterance against the current state and memory
pub async fn step<G>(memory: &mut SessionMemory, gateway: &G, user_input: &str) -> StepOutcome
where
    G: ToolGateway + ?Sized,
{
    let action = match memory.current_state {
        WorkflowState::Idle => step_idle(memory, user_input),
        WorkflowState::OrgNeeded => step_org_needed(memory, gateway, user_input).await,
        WorkflowState::ProcessNeeded => step_process_needed(memory, gateway, user_input).await,
        WorkflowState::ProcessCreationConfirm => step_process_confirm(memory, user_input),
        WorkflowState::EventNeeded => step_event_needed(memory, gateway).await,
        WorkflowState::PageTitleNeeded => step_page_title(memory, gateway, user_input).await,
        WorkflowState::FieldsNeeded => step_fields_needed(memory, gateway, user_input).await,
        WorkflowState::FieldCreationConfirm => step_field_confirm(memory, user_input),
        WorkflowState::FieldDisplayType => step_display_type(memory, user_input),
        WorkflowState::FieldValidationType => step_validation_type(memory, user_input),
        WorkflowState::SqlGeneration => step_sql_generation(memory, gateway).await,
        WorkflowState::Complete => None,
    };

    if let Some(action) = &action {
        tracing::info!(
            state = %memory.current_state,
            action = action.code(),
            "step"
        );
    }

    StepOutcome {
        state: memory.current_state,
        action,
    }
}

fn step_idle(memory: &mut SessionMemory, user_input: &str) -> Option<Action> {
    if input::is_workflow_trigger(user_input) {
        memory.current_state = WorkflowState::OrgNeeded;
        Some(Action::WorkflowStarted)
    } else {
        None
    }
}

async fn step_org_needed<G: ToolGateway + ?Sized>(
    memory: &mut SessionMemory,
    gateway: &G,
    user_input: &str,
) -> Option<Action> {
    if input::is_bare_ack(user_input) {
        return None;
    }
    let text = gateway
        .call(
            "get_organization_by_name",
            json!({ "legal_name": user_input.trim() }),
        )
        .await;
    let reply: OrgReply = serde_json::from_str(&text).unwrap_or_default();
    if reply.found {
        memory.org_id = reply.org_id.clone();
        memory.org_name = reply.legal_name.clone();
        memory.current_state = WorkflowState::ProcessNeeded;
        Some(Action::OrganizationFound {
            org_id: reply.org_id.unwrap_or_default(),
            org_name: reply.legal_name.unwrap_or_default(),
        })
    } else {
        Some(Action::OrganizationNotFound)
    }
}

async fn step_process_needed<G: ToolGateway + ?Sized>(
    memory: &mut SessionMemory,
    gateway: &G,
    user_input: &str,
) -> Option<Action> {
    if input::is_bare_continue(user_input) {
        return Some(Action::AskForProcessName);
    }
    let process_name = user_input.trim().to_string();
    let text = gateway
        .call(
            "get_process_by_name",
            json!({ "process_name": process_name, "org_id": memory.org_id }),
        )
        .await;
    let reply: ProcessReply = serde_json::from_str(&text).unwrap_or_default();
    if reply.found {
        let process_id = reply.process_id.unwrap_or_default();
        memory.process_id = Some(process_id);
        memory.process_name = reply.process_name.clone();
        memory.is_new_process = false;
        memory.current_state = WorkflowState::EventNeeded;
        return Some(Action::ProcessFound {
            process_id,
            process_name: reply.process_name.unwrap_or(process_name),
        });
    }

    // Miss: fetch the next free process id and ask before creating anything
    let text = gateway.call("get_max_process_id", json!({})).await;
    let reply: MaxProcessIdReply = serde_json::from_str(&text).unwrap_or_default();
    let suggested_id = if reply.success && reply.suggested_next_process_id > 0 {
        reply.suggested_next_process_id
    } else {
        1
    };
    memory.process_name = Some(process_name.clone());
    memory.suggested_process_id = Some(suggested_id);
    memory.current_state = WorkflowState::ProcessCreationConfirm;
    Some(Action::ProcessNotFoundAskCreate {
        process_name,
        suggested_process_id: suggested_id,
    })
}

fn step_process_confirm(memory: &mut SessionMemory, user_input: &str) -> Option<Action> {
    match input::process_confirmation(user_input) {
        Verdict::Affirmative => {
            let process_id = memory.suggested_process_id.unwrap_or(1);
            memory.is_new_process = true;
            memory.process_id = Some(process_id);
            // A brand-new process gets no event lookup: the process id doubles
            // as both event id and page id.
            memory.event_id = Some(process_id);
            memory.page_id = Some(process_id);
            memory.current_state = WorkflowState::PageTitleNeeded;
            Some(Action::NewProcessConfirmed {
                process_id,
                process_name: memory.process_name.clone().unwrap_or_default(),
            })
        }
        Verdict::Negative => {
            memory.process_name = None;
            memory.suggested_process_id = None;
            memory.current_state = WorkflowState::ProcessNeeded;
            Some(Action::ProcessNameRetry)
        }
        Verdict::Unclear => Some(Action::UnclearProcessResponse),
    }
}

async fn step_event_needed<G: ToolGateway + ?Sized>(
    memory: &mut SessionMemory,
    gateway: &G,
) -> Option<Action> {
    // For a new process the alias is already in place; skip the lookup.
    if !memory.is_new_process {
        let text = gateway
            .call(
                "get_events_for_process",
                json!({ "process_id": memory.process_id, "org_id": memory.org_id }),
            )
            .await;
        let reply: EventsReply = serde_json::from_str(&text).unwrap_or_default();
        if reply.success {
            memory.event_id = Some(reply.suggested_next_event_id);
            memory.page_id = memory.event_id;
        }
    }
    memory.current_state = WorkflowState::PageTitleNeeded;
    Some(Action::EventIdRetrieved {
        event_id: memory.event_id,
    })
}

async fn step_page_title<G: ToolGateway + ?Sized>(
    memory: &mut SessionMemory,
    gateway: &G,
    user_input: &str,
) -> Option<Action> {
    if input::is_bare_continue(user_input) {
        return Some(Action::AskForPageTitle);
    }
    let text = gateway
        .call(
            "generate_page_url",
            json!({ "page_title": user_input.trim() }),
        )
        .await;
    let reply: PageUrlReply = serde_json::from_str(&text).unwrap_or_default();
    if reply.success {
        memory.page_title = reply.page_title.clone();
        memory.page_url = reply.page_url.clone();
        memory.current_state = WorkflowState::FieldsNeeded;
        Some(Action::PageTitleSet {
            page_title: reply.page_title.unwrap_or_default(),
            page_url: reply.page_url.unwrap_or_default(),
        })
    } else {
        None
    }
}

async fn step_fields_needed<G: ToolGateway + ?Sized>(
    memory: &mut SessionMemory,
    gateway: &G,
    user_input: &str,
) -> Option<Action> {
    if input::is_done(user_input) {
        if memory.fields.is_empty() {
            return Some(Action::NoFieldsAdded);
        }
        memory.current_state = WorkflowState::SqlGeneration;
        return Some(Action::FieldsComplete {
            field_count: memory.fields.len(),
        });
    }
    if input::is_bare_continue(user_input) {
        return Some(Action::AskForFields);
    }

    let requested = user_input.trim().to_string();
    let text = gateway
        .call("check_field_exists", json!({ "field_id": requested }))
        .await;
    let reply: FieldReply = serde_json::from_str(&text).unwrap_or_default();
    if reply.found {
        // Keep the canonical casing from the catalog, not what was typed
        let field_id = reply.field_id.unwrap_or(requested);
        memory.fields.push(FieldEntry {
            field_id: field_id.clone(),
            existing: true,
            display_type: reply.display_type.unwrap_or_else(|| "label".to_string()),
            validation_type: reply.validation_type.unwrap_or_else(|| "E".to_string()),
        });
        Some(Action::FieldAddedExisting {
            field_id,
            field_count: memory.fields.len(),
        })
    } else {
        memory.pending_field = Some(PendingField::new(requested.clone()));
        memory.current_state = WorkflowState::FieldCreationConfirm;
        Some(Action::FieldNotFoundAskCreate {
            field_id: requested,
        })
    }
}

fn step_field_confirm(memory: &mut SessionMemory, user_input: &str) -> Option<Action> {
    match input::field_confirmation(user_input) {
        Verdict::Affirmative => {
            let field_id = memory
                .pending_field
                .as_ref()
                .map(|p| p.field_id.clone())
                .unwrap_or_default();
            memory.current_state = WorkflowState::FieldDisplayType;
            Some(Action::NewFieldConfirmed { field_id })
        }
        Verdict::Negative => {
            memory.pending_field = None;
            memory.current_state = WorkflowState::FieldsNeeded;
            Some(Action::FieldCreationCancelled)
        }
        Verdict::Unclear => Some(Action::UnclearFieldResponse),
    }
}

fn step_display_type(memory: &mut SessionMemory, user_input: &str) -> Option<Action> {
    match user_input.trim().to_lowercase().parse::<DisplayType>() {
        Ok(display_type) => {
            if let Some(pending) = memory.pending_field.as_mut() {
                pending.display_type = Some(display_type);
            }
            memory.current_state = WorkflowState::FieldValidationType;
            Some(Action::DisplayTypeSet { display_type })
        }
        Err(()) => Some(Action::InvalidDisplayType {
            valid_types: DisplayType::valid_set(),
        }),
    }
}

fn step_validation_type(memory: &mut SessionMemory, user_input: &str) -> Option<Action> {
    let validation_type = user_input.trim().to_uppercase();
    if validation_type.is_empty() {
        return None;
    }
    // Commit the pending field and leave the detail sub-flow atomically
    let pending = memory.pending_field.take()?;
    let display_type = pending.display_type.unwrap_or(DisplayType::Label);
    memory.fields.push(FieldEntry {
        field_id: pending.field_id.clone(),
        existing: false,
        display_type: display_type.as_str().to_string(),
        validation_type,
    });
    memory.current_state = WorkflowState::FieldsNeeded;
    Some(Action::FieldAddedNew {
        field_id: pending.field_id,
        field_count: memory.fields.len(),
    })
}

async fn step_sql_generation<G: ToolGateway + ?Sized>(
    memory: &mut SessionMemory,
    gateway: &G,
) -> Option<Action> {
    let form = match memory.project() {
        Ok(form) => form,
        Err(e) => {
            return Some(Action::SqlGenerationFailed {
                message: format!("Error: {e}"),
            })
        }
    };
    let form_data_json = match serde_json::to_string(&form) {
        Ok(json) => json,
        Err(e) => {
            let e = crate::error::AssistantError::from(e);
            return Some(Action::SqlGenerationFailed {
                message: format!("Error: {e}"),
            });
        }
    };
    let text = gateway
        .call(
            "generate_form_page_sql",
            json!({ "form_data_json": form_data_json }),
        )
        .await;
    // Raw SQL on success; an Error line otherwise. Stay put on failure so a
    // retry (or reset) remains possible.
    if text.starts_with("Error") {
        Some(Action::SqlGenerationFailed { message: text })
    } else {
        memory.current_state = WorkflowState::Complete;
        Some(Action::SqlGenerated { sql: text })
    }
}
