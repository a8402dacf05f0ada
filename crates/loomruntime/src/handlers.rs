use loomcore::{
    ExecutionFault, ExecutionState, LanguageModel, NodeKind, StateUpdate, ToolDispatcher,
};
use serde_json::json;
use std::sync::Arc;

use crate::compiler::CompiledNode;

const PREVIEW_CHARS: usize = 50;

/// Per-node-type behavior, dispatched on the kind resolved at compile
/// time.
pub struct NodeHandlers {
    llm: Arc<dyn LanguageModel>,
    tools: Arc<dyn ToolDispatcher>,
}

impl NodeHandlers {
    pub fn new(llm: Arc<dyn LanguageModel>, tools: Arc<dyn ToolDispatcher>) -> Self {
        Self { llm, tools }
    }

    /// Execute one node against the current state and return its partial
    /// update. Adapter-reported errors come back as ordinary output
    /// strings, never as `Err`.
    pub async fn run(
        &self,
        node: &CompiledNode,
        state: &ExecutionState,
    ) -> Result<StateUpdate, ExecutionFault> {
        match &node.kind {
            NodeKind::Input | NodeKind::Output => Ok(StateUpdate::none()),
            NodeKind::Model { prompt } => Ok(self.run_model(&node.id, prompt, state).await),
            NodeKind::Tool { tool_name } => Ok(self.run_tool(&node.id, tool_name, state).await),
            NodeKind::Unknown { raw } => Ok(StateUpdate::none()
                .with_step(format!("[{}] unknown node type: {}", node.id, raw))),
        }
    }

    async fn run_model(
        &self,
        node_id: &str,
        template: &str,
        state: &ExecutionState,
    ) -> StateUpdate {
        let prompt = template.replace("{input}", &state.input);
        tracing::debug!(node_id, "calling language model");
        let response = self.llm.generate(&prompt, None).await;
        let step = format!("[{}] model: {}", node_id, preview(&response));
        StateUpdate::none().with_output(response).with_step(step)
    }

    async fn run_tool(&self, node_id: &str, tool_name: &str, state: &ExecutionState) -> StateUpdate {
        // The previous node's output feeds the tool; before any output
        // exists the raw run input does.
        let arg = if state.output.is_empty() {
            &state.input
        } else {
            &state.output
        };
        let params = json!({ "code": arg, "url": arg });
        let result = self.tools.execute(tool_name, params).await;
        let rendered = result.to_string();
        let step = format!("[{}] tool ({}): {}", node_id, tool_name, rendered);
        StateUpdate::none().with_output(rendered).with_step(step)
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
