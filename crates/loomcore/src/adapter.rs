use async_trait::async_trait;

/// Language-model inference boundary.
///
/// `generate` must never fail for ordinary failure modes (timeout,
/// transport error, non-success status): it returns a descriptive
/// `Error: ...` string instead, which the engine treats as ordinary node
/// output.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> String;
}

/// Tool execution boundary.
///
/// An unrecognized tool name yields `{"error": "Tool <name> not found"}`
/// rather than failing the dispatch.
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    async fn execute(&self, tool_name: &str, params: serde_json::Value) -> serde_json::Value;
}
