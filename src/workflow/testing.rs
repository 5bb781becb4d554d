//! Scripted tool gateway for state-machine tests
//!
//! Replies are queued ahead of time and handed out in order; every call is
//! recorded so tests can assert on tool names and arguments. An empty queue
//! answers with a generic failure, which the lenient reply parsing reads as
//! a miss.

use crate::tools::wire::FailureReply;
use crate::tools::ToolGateway;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, reply: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(reply.into());
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolGateway for ScriptedGateway {
    async fn call(&self, name: &str, args: Value) -> String {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), args));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| FailureReply::text("no scripted reply"))
    }
}
