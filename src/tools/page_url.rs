//! Page URL derivation

use super::wire::PageUrlReply;
use super::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct PageUrlArgs {
    page_title: String,
}

/// Turn a page title into a camelCase pageURL
/// ("Task Details" -> "taskDetails")
pub struct DerivePageUrl;

fn camel_case_url(title: &str) -> Option<String> {
    let mut words = title.split_whitespace();
    let first = words.next()?.to_lowercase();
    let rest: String = words.map(capitalize).collect();
    Some(first + &rest)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
        None => String::new(),
    }
}

#[async_trait]
impl Tool for DerivePageUrl {
    fn name(&self) -> &'static str {
        "generate_page_url"
    }

    fn description(&self) -> &'static str {
        "Generate a valid pageURL from a pageTitle (spaces removed, camelCase)"
    }

    async fn call(&self, args: Value) -> String {
        let parsed = serde_json::from_value::<PageUrlArgs>(args).ok();
        let reply = match parsed.as_ref().and_then(|a| camel_case_url(&a.page_title)) {
            Some(url) => {
                let title = parsed.map(|a| a.page_title).unwrap_or_default();
                PageUrlReply {
                    success: true,
                    page_title: Some(title.clone()),
                    page_display_name: Some(title),
                    page_url: Some(url),
                    error: None,
                }
            }
            None => PageUrlReply {
                success: false,
                error: Some("Empty page title".to_string()),
                ..PageUrlReply::default()
            },
        };
        serde_json::to_string_pretty(&reply).unwrap_or_default()
    }
}
