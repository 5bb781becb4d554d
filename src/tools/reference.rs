//! Reference tools for field creation
//!
//! Static option lists the front end can show when asking for a new field's
//! display and validation type.

use super::Tool;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Valid display types, with a short description each
pub struct DisplayTypes;

#[async_trait]
impl Tool for DisplayTypes {
    fn name(&self) -> &'static str {
        "get_field_display_types"
    }

    fn description(&self) -> &'static str {
        "List the valid display types for field creation"
    }

    async fn call(&self, _args: Value) -> String {
        json!({
            "success": true,
            "display_types": {
                "label": "Text label/input field",
                "checkbox": "Checkbox for boolean values",
                "radio": "Radio button for single selection",
                "textarea": "Multi-line text area",
                "select": "Dropdown selection",
                "date": "Date picker"
            },
            "default": "label"
        })
        .to_string()
    }
}

/// Valid validation type codes, with a short description each
pub struct ValidationTypes;

#[async_trait]
impl Tool for ValidationTypes {
    fn name(&self) -> &'static str {
        "get_field_validation_types"
    }

    fn description(&self) -> &'static str {
        "List the valid validation type codes for field creation"
    }

    async fn call(&self, _args: Value) -> String {
        json!({
            "success": true,
            "validation_types": {
                "E": "Email - validates email format",
                "N": "Numeric - accepts only numbers",
                "M": "Mandatory - field is required",
                "NM": "Not mandatory - field is optional",
                "A": "Alphabetic - letters only",
                "AN": "Alphanumeric - letters and numbers only",
                "D": "Date - validates date format"
            },
            "default": "E"
        })
        .to_string()
    }
}
