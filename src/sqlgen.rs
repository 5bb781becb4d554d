//! SQL statement generation
//!
//! Pure text production: a fully collected form-data aggregate goes in, an
//! ordered batch of INSERT statements across the seven form-page tables
//! comes out. Nothing here touches a database — the output is returned
//! verbatim to the caller.

pub mod aggregate;
pub mod render;

pub use aggregate::{FormData, NewField, PageValue};
pub use render::{render, sql_escape};

/// Generate the SQL batch from a JSON-encoded aggregate.
///
/// This is the boundary used by the `generate_form_page_sql` tool: malformed
/// JSON is a recoverable condition reported as text, never a panic. Callers
/// distinguish success from failure only by message content.
pub fn generate(form_data_json: &str) -> String {
    match serde_json::from_str::<FormData>(form_data_json) {
        Ok(form) => render(&form, chrono::Local::now().date_naive()),
        Err(e) => format!("Error: Invalid JSON format - {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_is_reported_as_text() {
        let out = generate("{not json");
        assert!(out.starts_with("Error: Invalid JSON format"));
    }

    #[test]
    fn minimal_aggregate_generates() {
        let json = r#"{
            "org_id": "O1",
            "org_name": "Acme Inc",
            "process_id": 100,
            "process_name": "Onboarding",
            "is_new_process": false,
            "event_id": 101,
            "page_id": 101,
            "page_title": "Task Details",
            "page_url": "taskDetails"
        }"#;
        let out = generate(json);
        assert!(out.contains("INSERT INTO adminPages"));
        assert!(!out.contains("INSERT INTO orgProcesses "));
    }
}
