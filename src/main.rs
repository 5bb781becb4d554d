//! Form-page assistant - conversational form-page registration
//!
//! A line-oriented REPL over the workflow state machine: it collects the
//! organization, process, page, and field data through a guided conversation
//! and prints the generated SQL INSERT statements at the end.

mod assistant;
mod error;
mod sqlgen;
mod tools;
mod workflow;

use assistant::Assistant;
use std::io::Write;
use std::sync::Arc;
use tools::{Catalog, Registry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formpage_assistant=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let catalog = Arc::new(Catalog::with_sample_data());
    let registry = Registry::new(Arc::clone(&catalog));
    tracing::info!(tools = ?registry.tool_names(), "tool registry initialized");

    let mut assistant = Assistant::new(registry);

    println!("Form-page assistant. Say 'create a form page' to begin.");
    println!("Commands: 'status', 'reset', 'quit'.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.to_lowercase().as_str() {
            "quit" | "exit" | "q" => break,
            "reset" => {
                assistant.reset();
                println!("Session reset.");
                continue;
            }
            _ => {}
        }

        let reply = assistant.process(line).await;
        println!("{}", reply.text);
        println!("[{}]", reply.state);
    }

    tracing::info!(session_id = %assistant.session_id(), "session ended");
    Ok(())
}
