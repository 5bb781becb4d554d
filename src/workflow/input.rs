//! Utterance classification
//!
//! Small keyword classifiers shared by the step function. All comparisons
//! work on the trimmed, lowercased utterance.

/// Phrases that start the workflow from idle (substring match)
const TRIGGER_WORDS: [&str; 5] = ["create", "form", "page", "build", "yes"];

/// Bare acknowledgements that are not an organization name
const ACK_WORDS: [&str; 5] = ["yes", "ok", "sure", "proceed", "start"];

/// Bare continue words that are not a name/title/field answer
const CONTINUE_WORDS: [&str; 4] = ["ok", "next", "continue", "proceed"];

/// Phrases that end field collection
const DONE_WORDS: [&str; 4] = ["done", "finish", "complete", "no more fields"];

/// Verdict for a yes/no confirmation question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Affirmative,
    Negative,
    Unclear,
}

/// True if the utterance should kick off the workflow from idle
pub fn is_workflow_trigger(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    TRIGGER_WORDS.iter().any(|w| lower.contains(w))
}

/// True if the utterance is a bare acknowledgement rather than a name
pub fn is_bare_ack(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    ACK_WORDS.contains(&lower.as_str())
}

/// True if the utterance is a bare continue word rather than an answer
pub fn is_bare_continue(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    CONTINUE_WORDS.contains(&lower.as_str())
}

/// True if the utterance ends field collection
pub fn is_done(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    DONE_WORDS.contains(&lower.as_str())
}

/// Classify a reply to the process-creation confirmation
pub fn process_confirmation(input: &str) -> Verdict {
    classify(
        input,
        &["yes", "y", "create", "ok", "sure", "proceed"],
        &["no", "n", "wrong", "cancel", "retry"],
    )
}

/// Classify a reply to the field-creation confirmation
pub fn field_confirmation(input: &str) -> Verdict {
    classify(
        input,
        &["yes", "y", "create", "ok", "sure"],
        &["no", "n", "cancel", "skip"],
    )
}

fn classify(input: &str, affirmative: &[&str], negative: &[&str]) -> Verdict {
    let lower = input.trim().to_lowercase();
    if affirmative.iter().any(|w| lower.contains(w)) {
        Verdict::Affirmative
    } else if negative.iter().any(|w| lower.contains(w)) {
        Verdict::Negative
    } else {
        Verdict::Unclear
    }
}

/// True if the utterance asks for the memory summary (pre-filter, applied
/// before stepping regardless of state)
pub fn is_status_query(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    matches!(lower.as_str(), "show memory" | "show state" | "status")
}

/// True if the utterance asks for the stored process id (pre-filter)
pub fn is_process_id_query(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    lower.contains("process") && lower.contains("id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_match_on_substring() {
        assert!(is_workflow_trigger("I want to create a form"));
        assert!(is_workflow_trigger("BUILD it"));
        assert!(!is_workflow_trigger("hello there"));
    }

    #[test]
    fn acks_are_exact_words_only() {
        assert!(is_bare_ack("yes"));
        assert!(is_bare_ack(" Proceed "));
        // An organization really named "Yes Industries" is a name, not an ack
        assert!(!is_bare_ack("yes industries"));
    }

    #[test]
    fn done_words_are_exact() {
        assert!(is_done("done"));
        assert!(is_done("no more fields"));
        assert!(!is_done("done_date")); // a plausible field id
    }

    #[test]
    fn confirmation_prefers_affirmative() {
        assert_eq!(process_confirmation("yes please"), Verdict::Affirmative);
        assert_eq!(process_confirmation("no, wrong name"), Verdict::Negative);
        assert_eq!(process_confirmation("hmm"), Verdict::Unclear);
        assert_eq!(field_confirmation("skip it"), Verdict::Negative);
        // "proceed" confirms a process but not a field
        assert_eq!(field_confirmation("proceed"), Verdict::Unclear);
    }

    #[test]
    fn pre_filters() {
        assert!(is_status_query("show memory"));
        assert!(is_status_query("STATUS"));
        assert!(!is_status_query("what is the status of my order"));
        assert!(is_process_id_query("what is the process id?"));
        assert!(!is_process_id_query("what is the process?"));
    }
}
