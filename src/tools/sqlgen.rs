//! SQL generation tool
//!
//! The one tool whose reply is raw text rather than JSON: callers hand the
//! output to the user verbatim. Failures are reported as an `Error: ...`
//! line — distinguishable from SQL only by content, as the contract states.

use super::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SqlArgs {
    form_data_json: String,
}

/// Render the full INSERT batch for a collected form page
pub struct GenerateFormPageSql;

#[async_trait]
impl Tool for GenerateFormPageSql {
    fn name(&self) -> &'static str {
        "generate_form_page_sql"
    }

    fn description(&self) -> &'static str {
        "Generate the complete SQL INSERT statements for a form page; answers raw SQL text"
    }

    async fn call(&self, args: Value) -> String {
        match serde_json::from_value::<SqlArgs>(args) {
            Ok(args) => crate::sqlgen::generate(&args.form_data_json),
            Err(e) => format!("Error: missing form_data_json argument - {e}"),
        }
    }
}
