//! Property-based tests for the workflow state machine
//!
//! These verify structural invariants across arbitrary input sequences: the
//! machine only moves along declared edges, never advances on unrecognized
//! input, and the terminal state absorbs everything.

use super::memory::SessionMemory;
use super::state::WorkflowState;
use super::step::step;
use super::testing::ScriptedGateway;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Drive the async step function from a sync proptest body
fn run_step(memory: &mut SessionMemory, gateway: &ScriptedGateway, input: &str) -> WorkflowState {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    rt.block_on(step(memory, gateway, input)).state
}

/// The declared edges of the machine. Staying put is always allowed.
fn allowed_targets(from: WorkflowState) -> &'static [WorkflowState] {
    use WorkflowState::*;
    match from {
        Idle => &[Idle, OrgNeeded],
        OrgNeeded => &[OrgNeeded, ProcessNeeded],
        ProcessNeeded => &[ProcessNeeded, EventNeeded, ProcessCreationConfirm],
        ProcessCreationConfirm => &[ProcessCreationConfirm, PageTitleNeeded, ProcessNeeded],
        EventNeeded => &[PageTitleNeeded],
        PageTitleNeeded => &[PageTitleNeeded, FieldsNeeded],
        FieldsNeeded => &[FieldsNeeded, FieldCreationConfirm, SqlGeneration],
        FieldCreationConfirm => &[FieldCreationConfirm, FieldDisplayType, FieldsNeeded],
        FieldDisplayType => &[FieldDisplayType, FieldValidationType],
        FieldValidationType => &[FieldValidationType, FieldsNeeded],
        SqlGeneration => &[SqlGeneration, Complete],
        Complete => &[Complete],
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = WorkflowState> {
    use WorkflowState::*;
    prop_oneof![
        Just(Idle),
        Just(OrgNeeded),
        Just(ProcessNeeded),
        Just(ProcessCreationConfirm),
        Just(EventNeeded),
        Just(PageTitleNeeded),
        Just(FieldsNeeded),
        Just(FieldCreationConfirm),
        Just(FieldDisplayType),
        Just(FieldValidationType),
        Just(SqlGeneration),
        Just(Complete),
    ]
}

/// Any printable utterance, keywords included
fn arb_input() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,30}"
}

/// Digits only: matches no trigger, keyword, or confirmation vocabulary
fn arb_neutral_input() -> impl Strategy<Value = String> {
    "[0-9]{1,12}"
}

/// A scripted reply a lookup tool could plausibly return
fn arb_tool_reply() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(r#"{"success": true, "found": false}"#.to_string()),
        Just(r#"{"success": true, "found": true, "orgId": "O1", "legalName": "Acme Inc"}"#.to_string()),
        Just(r#"{"success": true, "found": true, "processId": 100, "processName": "Onboarding"}"#.to_string()),
        Just(r#"{"success": true, "suggestedNextProcessId": 200}"#.to_string()),
        Just(r#"{"success": true, "suggestedNextEventId": 103}"#.to_string()),
        Just(r#"{"success": false, "error": "db down"}"#.to_string()),
        Just("not even json".to_string()),
        Just(String::new()),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Invariant 1: every transition follows a declared edge, whatever the
    // inputs and whatever the tools reply
    #[test]
    fn prop_steps_follow_declared_edges(
        inputs in proptest::collection::vec(arb_input(), 0..15),
        replies in proptest::collection::vec(arb_tool_reply(), 0..30),
    ) {
        let gateway = ScriptedGateway::new();
        for reply in replies {
            gateway.queue(reply);
        }
        let mut memory = SessionMemory::new();

        for input in inputs {
            let from = memory.current_state;
            let to = run_step(&mut memory, &gateway, &input);
            prop_assert!(
                allowed_targets(from).contains(&to),
                "undeclared edge {from:?} -> {to:?} on input {input:?}"
            );
        }
    }

    // Invariant 2: unrecognized input never advances a keyword-driven state
    #[test]
    fn prop_neutral_input_never_advances_confirmations(input in arb_neutral_input()) {
        for state in [
            WorkflowState::Idle,
            WorkflowState::ProcessCreationConfirm,
            WorkflowState::FieldCreationConfirm,
            WorkflowState::FieldDisplayType,
        ] {
            let gateway = ScriptedGateway::new();
            let mut memory = SessionMemory::new();
            memory.current_state = state;
            let to = run_step(&mut memory, &gateway, &input);
            prop_assert_eq!(to, state, "advanced out of {:?} on {:?}", state, input);
        }
    }

    // Invariant 3: Complete absorbs everything and calls no tools
    #[test]
    fn prop_complete_is_terminal(input in arb_input()) {
        let gateway = ScriptedGateway::new();
        let mut memory = SessionMemory::new();
        memory.current_state = WorkflowState::Complete;
        let to = run_step(&mut memory, &gateway, &input);
        prop_assert_eq!(to, WorkflowState::Complete);
        prop_assert!(gateway.calls().is_empty());
    }

    // Invariant 4: confirming a new process aliases all three ids to the
    // suggested one
    #[test]
    fn prop_new_process_alias(suggested in 1i64..100_000) {
        let gateway = ScriptedGateway::new();
        let mut memory = SessionMemory::new();
        memory.process_name = Some("Claims".to_string());
        memory.suggested_process_id = Some(suggested);
        memory.current_state = WorkflowState::ProcessCreationConfirm;

        run_step(&mut memory, &gateway, "yes");
        prop_assert!(memory.is_new_process);
        prop_assert_eq!(memory.process_id, Some(suggested));
        prop_assert_eq!(memory.event_id, Some(suggested));
        prop_assert_eq!(memory.page_id, Some(suggested));
    }

    // Invariant 5: collected fields are never dropped by later steps
    #[test]
    fn prop_field_count_never_decreases(
        inputs in proptest::collection::vec(arb_input(), 0..15),
        replies in proptest::collection::vec(arb_tool_reply(), 0..30),
        start in arb_state(),
    ) {
        let gateway = ScriptedGateway::new();
        for reply in replies {
            gateway.queue(reply);
        }
        let mut memory = SessionMemory::new();
        memory.current_state = start;

        let mut prev = memory.fields.len();
        for input in inputs {
            run_step(&mut memory, &gateway, &input);
            prop_assert!(memory.fields.len() >= prev);
            prev = memory.fields.len();
        }
    }

    // Invariant 6: small talk at Idle leaves memory untouched
    #[test]
    fn prop_idle_ignores_neutral_input(input in arb_neutral_input()) {
        let gateway = ScriptedGateway::new();
        let mut memory = SessionMemory::new();
        run_step(&mut memory, &gateway, &input);
        prop_assert_eq!(memory, SessionMemory::new());
        prop_assert!(gateway.calls().is_empty());
    }
}
