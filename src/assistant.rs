//! Conversation session over the workflow
//!
//! Owns one [`SessionMemory`] and a transcript, routes each user message
//! through two pre-filters (status and process-id queries are answered from
//! memory without touching the state machine) and then into the step
//! function. States that need no user input — the event lookup and SQL
//! generation — are chained within the same turn so the user never has to
//! say "continue" to an empty prompt.

use crate::tools::ToolGateway;
use crate::workflow::{input, step, Action, SessionMemory, WorkflowState};
use uuid::Uuid;

/// Speaker attribution for transcript entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
}

/// One processed turn: the reply text plus what the machine did
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub state: WorkflowState,
    pub actions: Vec<Action>,
}

pub struct Assistant<G> {
    session_id: Uuid,
    memory: SessionMemory,
    gateway: G,
    transcript: Vec<TranscriptEntry>,
}

impl<G: ToolGateway> Assistant<G> {
    pub fn new(gateway: G) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, "session started");
        Self {
            session_id,
            memory: SessionMemory::new(),
            gateway,
            transcript: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> WorkflowState {
        self.memory.current_state
    }

    pub fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Collected-data dump, same text the status pre-filter answers with
    pub fn summary(&self) -> String {
        self.memory.summary()
    }

    /// Drop all collected data and the transcript, back to idle
    pub fn reset(&mut self) {
        tracing::info!(session_id = %self.session_id, "session reset");
        self.memory = SessionMemory::new();
        self.transcript = Vec::new();
    }

    /// Process one user message and produce a reply
    pub async fn process(&mut self, user_input: &str) -> Reply {
        self.transcript.push(TranscriptEntry {
            role: Role::User,
            text: user_input.to_string(),
        });

        let reply = self.respond(user_input).await;

        self.transcript.push(TranscriptEntry {
            role: Role::Assistant,
            text: reply.text.clone(),
        });
        reply
    }

    async fn respond(&mut self, user_input: &str) -> Reply {
        // Answered from memory, no state change
        if input::is_status_query(user_input) {
            return Reply {
                text: self.memory.summary(),
                state: self.memory.current_state,
                actions: Vec::new(),
            };
        }
        if input::is_process_id_query(user_input) {
            if let Some(process_id) = self.memory.process_id {
                let name = self.memory.process_name.as_deref().unwrap_or("?");
                return Reply {
                    text: format!("The process ID for '{name}' is: {process_id}"),
                    state: self.memory.current_state,
                    actions: Vec::new(),
                };
            }
        }

        let mut outcome = step(&mut self.memory, &self.gateway, user_input).await;
        let mut actions: Vec<Action> = outcome.action.into_iter().collect();

        // Chain through input-independent states; a failed generation stays
        // in SqlGeneration, so bail as soon as a chained step doesn't move.
        for _ in 0..2 {
            if !matches!(
                outcome.state,
                WorkflowState::EventNeeded | WorkflowState::SqlGeneration
            ) {
                break;
            }
            let before = outcome.state;
            outcome = step(&mut self.memory, &self.gateway, "").await;
            actions.extend(outcome.action.clone());
            if outcome.state == before {
                break;
            }
        }

        let text = if actions.is_empty() {
            reprompt(self.memory.current_state).to_string()
        } else {
            actions
                .iter()
                .map(|a| phrase(a))
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        Reply {
            text,
            state: self.memory.current_state,
            actions,
        }
    }
}

/// Canned reply for each action code
fn phrase(action: &Action) -> String {
    match action {
        Action::WorkflowStarted => {
            "Let's set up a new form page. Which organization is this for?".to_string()
        }
        Action::OrganizationFound { org_id, org_name } => format!(
            "Found organization {org_name} (ID: {org_id}). Which process does this page belong to?"
        ),
        Action::OrganizationNotFound => {
            "I couldn't find that organization. Please check the name and try again.".to_string()
        }
        Action::AskForProcessName => "What is the name of the process?".to_string(),
        Action::ProcessFound {
            process_id,
            process_name,
        } => format!("Found process '{process_name}' (ID: {process_id})."),
        Action::ProcessNotFoundAskCreate {
            process_name,
            suggested_process_id,
        } => format!(
            "There is no process named '{process_name}'. \
             Should I create it with ID {suggested_process_id}? (yes/no)"
        ),
        Action::NewProcessConfirmed {
            process_id,
            process_name,
        } => format!(
            "Process '{process_name}' will be created with ID {process_id}. \
             What should the page be titled?"
        ),
        Action::ProcessNameRetry => {
            "Okay, let's try again. What is the process name?".to_string()
        }
        Action::UnclearProcessResponse => {
            "Please answer yes or no: should I create this process?".to_string()
        }
        Action::EventIdRetrieved { event_id } => match event_id {
            Some(id) => format!("Using event ID {id}. What should the page be titled?"),
            None => "What should the page be titled?".to_string(),
        },
        Action::AskForPageTitle => "What should the page be titled?".to_string(),
        Action::PageTitleSet {
            page_title,
            page_url,
        } => format!(
            "Page '{page_title}' will be served at URL '{page_url}'. \
             Now name the fields one at a time, and say 'done' when finished."
        ),
        Action::AskForFields => "Please name the next field, or say 'done'.".to_string(),
        Action::FieldAddedExisting {
            field_id,
            field_count,
        } => format!(
            "Added existing field '{field_id}' ({field_count} so far). Next field, or 'done'."
        ),
        Action::FieldNotFoundAskCreate { field_id } => {
            format!("Field '{field_id}' doesn't exist yet. Should I create it? (yes/no)")
        }
        Action::NewFieldConfirmed { field_id } => {
            format!("Okay, a new field '{field_id}'. What display type should it have?")
        }
        Action::FieldCreationCancelled => "Skipped. Next field, or 'done'.".to_string(),
        Action::UnclearFieldResponse => {
            "Please answer yes or no: should I create this field?".to_string()
        }
        Action::DisplayTypeSet { display_type } => {
            format!("Display type set to '{display_type}'. What validation type?")
        }
        Action::InvalidDisplayType { valid_types } => {
            format!("That display type isn't valid. Choose one of: {valid_types}.")
        }
        Action::FieldAddedNew {
            field_id,
            field_count,
        } => format!(
            "Added new field '{field_id}' ({field_count} so far). Next field, or 'done'."
        ),
        Action::NoFieldsAdded => {
            "No fields have been added yet; name at least one before finishing.".to_string()
        }
        Action::FieldsComplete { field_count } => {
            format!("Collected {field_count} field(s). Generating SQL...")
        }
        Action::SqlGenerated { sql } => sql.clone(),
        Action::SqlGenerationFailed { message } => {
            format!("SQL generation failed: {message}")
        }
    }
}

/// Fallback prompt when a message matched nothing in the current state
fn reprompt(state: WorkflowState) -> &'static str {
    match state {
        WorkflowState::Idle => "Say 'create a form page' whenever you're ready.",
        WorkflowState::OrgNeeded => "Which organization is this page for?",
        WorkflowState::ProcessNeeded => "Which process does this page belong to?",
        WorkflowState::ProcessCreationConfirm => {
            "Should I create this process? Please answer yes or no."
        }
        WorkflowState::EventNeeded | WorkflowState::PageTitleNeeded => {
            "What should the page be titled?"
        }
        WorkflowState::FieldsNeeded => "Please name the next field, or say 'done'.",
        WorkflowState::FieldCreationConfirm => {
            "Should I create this field? Please answer yes or no."
        }
        WorkflowState::FieldDisplayType => "What display type should the field have?",
        WorkflowState::FieldValidationType => "What validation type should the field have?",
        WorkflowState::SqlGeneration => "Generating SQL...",
        WorkflowState::Complete => "This form page is done. Say 'reset' to start another.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::{Catalog, FieldRecord, OrganizationRecord, ProcessRecord};
    use crate::tools::Registry;
    use std::sync::Arc;

    /// Acme exists, "Onboarding" doesn't, and the only process id is 100, so
    /// the suggested next process id is 200.
    fn scenario_catalog() -> Catalog {
        Catalog {
            organizations: vec![OrganizationRecord {
                org_id: "O1".to_string(),
                legal_name: "Acme Inc".to_string(),
            }],
            processes: vec![ProcessRecord {
                org_id: "O1".to_string(),
                process_id: 100,
                process_name: "Billing".to_string(),
            }],
            events: Vec::new(),
            fields: vec![FieldRecord {
                field_id: "user_name".to_string(),
                data_field_id: "user_name".to_string(),
                field_type: "D".to_string(),
                display_type: "label".to_string(),
                validation_type: "A".to_string(),
            }],
        }
    }

    fn scenario_assistant() -> Assistant<Registry> {
        Assistant::new(Registry::new(Arc::new(scenario_catalog())))
    }

    #[tokio::test]
    async fn full_conversation_produces_sql() {
        let mut assistant = scenario_assistant();

        let reply = assistant.process("I want to create a form page").await;
        assert_eq!(reply.state, WorkflowState::OrgNeeded);

        let reply = assistant.process("Acme Inc").await;
        assert_eq!(reply.state, WorkflowState::ProcessNeeded);
        assert!(reply.text.contains("Acme Inc (ID: O1)"));

        // unknown process: suggestion comes from max(100) + 100
        let reply = assistant.process("Onboarding").await;
        assert_eq!(reply.state, WorkflowState::ProcessCreationConfirm);
        assert!(reply.text.contains("ID 200"));

        let reply = assistant.process("yes").await;
        assert_eq!(reply.state, WorkflowState::PageTitleNeeded);
        assert_eq!(assistant.memory().process_id, Some(200));
        assert_eq!(assistant.memory().event_id, Some(200));

        let reply = assistant.process("Task Details").await;
        assert_eq!(reply.state, WorkflowState::FieldsNeeded);
        assert!(reply.text.contains("taskDetails"));

        // one existing field, one new field through the detail sub-flow
        let reply = assistant.process("user_name").await;
        assert_eq!(reply.state, WorkflowState::FieldsNeeded);

        let reply = assistant.process("email").await;
        assert_eq!(reply.state, WorkflowState::FieldCreationConfirm);
        assistant.process("yes").await;
        assistant.process("label").await;
        let reply = assistant.process("E").await;
        assert_eq!(reply.state, WorkflowState::FieldsNeeded);
        assert_eq!(assistant.memory().fields.len(), 2);

        // "done" chains straight through generation in one turn
        let reply = assistant.process("done").await;
        assert_eq!(reply.state, WorkflowState::Complete);
        assert!(reply
            .actions
            .iter()
            .any(|a| a.code() == "fields_complete"));
        assert!(reply.actions.iter().any(|a| a.code() == "sql_generated"));
        assert!(reply.text.contains("INSERT INTO orgProcesses"));
        assert!(reply.text.contains("INSERT INTO adminPages"));
        assert!(reply.text.contains("INSERT INTO adminFields"));
        assert!(reply.text.contains("'email'"));
        assert!(reply.text.contains("'taskDetails'"));
    }

    #[tokio::test]
    async fn existing_process_chains_event_lookup() {
        let mut assistant = scenario_assistant();
        assistant.process("create a form page").await;
        assistant.process("Acme Inc").await;

        // Billing exists with no events, so the next event id falls back to
        // the process id itself.
        let reply = assistant.process("Billing").await;
        assert_eq!(reply.state, WorkflowState::PageTitleNeeded);
        assert!(reply.actions.iter().any(|a| a.code() == "process_found"));
        assert!(reply
            .actions
            .iter()
            .any(|a| a.code() == "event_id_retrieved"));
        assert_eq!(assistant.memory().event_id, Some(100));
    }

    #[tokio::test]
    async fn status_query_answers_from_memory() {
        let mut assistant = scenario_assistant();
        assistant.process("create a form page").await;
        assistant.process("Acme Inc").await;

        let reply = assistant.process("status").await;
        assert_eq!(reply.state, WorkflowState::ProcessNeeded);
        assert!(reply.actions.is_empty());
        assert!(reply.text.contains("Acme Inc (ID: O1)"));
    }

    #[tokio::test]
    async fn process_id_query_answers_when_known() {
        let mut assistant = scenario_assistant();
        assistant.process("create a form page").await;
        assistant.process("Acme Inc").await;
        assistant.process("Billing").await;

        let reply = assistant.process("what is the process id?").await;
        assert_eq!(reply.text, "The process ID for 'Billing' is: 100");
        // the query did not disturb the workflow
        assert_eq!(reply.state, WorkflowState::PageTitleNeeded);
    }

    #[tokio::test]
    async fn reset_clears_memory_and_transcript() {
        let mut assistant = scenario_assistant();
        assistant.process("create a form page").await;
        assistant.process("Acme Inc").await;
        assert!(!assistant.transcript().is_empty());

        assistant.reset();
        assert_eq!(assistant.state(), WorkflowState::Idle);
        assert!(assistant.transcript().is_empty());
        assert_eq!(assistant.memory().org_id, None);
    }

    #[tokio::test]
    async fn unrecognized_input_reprompts_without_moving() {
        let mut assistant = scenario_assistant();
        assistant.process("create a form page").await;
        assistant.process("Acme Inc").await;
        assistant.process("Onboarding").await;

        let reply = assistant.process("42").await;
        assert_eq!(reply.state, WorkflowState::ProcessCreationConfirm);
        assert!(reply
            .actions
            .iter()
            .any(|a| a.code() == "unclear_process_response"));
    }
}
