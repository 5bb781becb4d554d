//! Lookup and side-effect tools
//!
//! The workflow core never talks to a data source directly: it calls named
//! tools through the [`ToolGateway`] and parses their text replies. Every
//! reply is JSON in one of the `wire` shapes, except `generate_form_page_sql`
//! which answers with raw SQL text.
//!
//! Soft-fail policy: a tool that cannot do its job answers with a miss- or
//! failure-shaped reply instead of an error — the state machine must never
//! observe a transport exception and get stuck.

pub mod catalog;
pub mod lookup;
pub mod page_url;
pub mod reference;
pub mod sqlgen;
pub mod wire;

pub use catalog::Catalog;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A named tool callable by the workflow
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, matched against the workflow's call sites
    fn name(&self) -> &'static str;

    /// One-line description for discovery/diagnostics
    fn description(&self) -> &'static str;

    /// Execute with a JSON argument object, answering with reply text
    async fn call(&self, args: Value) -> String;
}

/// Uniform call/response boundary the workflow core depends on
#[async_trait]
pub trait ToolGateway: Send + Sync {
    /// Invoke a tool by name. Always answers with text; failures come back
    /// as `{"success": false, "error": ...}` rather than an `Err`.
    async fn call(&self, name: &str, args: Value) -> String;
}

/// Production gateway: a fixed set of tools over one catalog
pub struct Registry {
    tools: Vec<Arc<dyn Tool>>,
}

impl Registry {
    /// Standard tool set for form-page creation
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(lookup::OrganizationLookup::new(Arc::clone(&catalog))),
            Arc::new(lookup::ProcessLookup::new(Arc::clone(&catalog))),
            Arc::new(lookup::MaxProcessId::new(Arc::clone(&catalog))),
            Arc::new(lookup::NextEventId::new(Arc::clone(&catalog))),
            Arc::new(lookup::FieldLookup::new(catalog)),
            Arc::new(page_url::DerivePageUrl),
            Arc::new(reference::DisplayTypes),
            Arc::new(reference::ValidationTypes),
            Arc::new(sqlgen::GenerateFormPageSql),
        ];
        Self { tools }
    }

    /// Names of every registered tool
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

#[async_trait]
impl ToolGateway for Registry {
    async fn call(&self, name: &str, args: Value) -> String {
        for tool in &self.tools {
            if tool.name() == name {
                tracing::debug!(tool = name, "calling tool");
                return tool.call(args).await;
            }
        }
        tracing::warn!(tool = name, "unknown tool requested");
        wire::FailureReply::text(format!("unknown tool: {name}"))
    }
}

#[async_trait]
impl<T: ToolGateway + ?Sized> ToolGateway for Arc<T> {
    async fn call(&self, name: &str, args: Value) -> String {
        (**self).call(name, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_tool_soft_fails() {
        let registry = Registry::new(Arc::new(Catalog::default()));
        let reply = registry.call("drop_all_tables", json!({})).await;
        let parsed: wire::FailureReply = serde_json::from_str(&reply).unwrap();
        assert!(!parsed.success);
        assert!(parsed.error.contains("drop_all_tables"));
    }

    #[tokio::test]
    async fn registry_exposes_the_full_tool_set() {
        let registry = Registry::new(Arc::new(Catalog::default()));
        let names = registry.tool_names();
        for expected in [
            "get_organization_by_name",
            "get_process_by_name",
            "get_max_process_id",
            "get_events_for_process",
            "check_field_exists",
            "generate_page_url",
            "get_field_display_types",
            "get_field_validation_types",
            "generate_form_page_sql",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }
}
