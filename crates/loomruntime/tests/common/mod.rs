#![allow(dead_code)]

use async_trait::async_trait;
use loomcore::{LanguageModel, MetricsSink, RunId, RunStatus, ToolDispatcher};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Model stub that returns a fixed reply and records every prompt it
/// receives.
pub struct FixedModel {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl FixedModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LanguageModel for FixedModel {
    async fn generate(&self, prompt: &str, _system_prompt: Option<&str>) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Dispatcher stub that knows a single `echo` tool and rejects
/// everything else the way the real dispatcher does.
pub struct StubTools;

#[async_trait]
impl ToolDispatcher for StubTools {
    async fn execute(&self, tool_name: &str, params: Value) -> Value {
        match tool_name {
            "echo" => json!({ "output": params.get("code").cloned().unwrap_or(Value::Null) }),
            _ => json!({ "error": format!("Tool {} not found", tool_name) }),
        }
    }
}

/// Metrics sink that records every terminal status it sees.
#[derive(Default)]
pub struct RecordingMetrics {
    pub records: Mutex<Vec<(RunId, RunStatus)>>,
}

impl MetricsSink for RecordingMetrics {
    fn record_run(&self, run_id: RunId, status: RunStatus, _input: &str, _output: &str) {
        self.records.lock().unwrap().push((run_id, status));
    }
}
