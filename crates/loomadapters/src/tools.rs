use async_trait::async_trait;
use loomcore::ToolDispatcher;
use serde_json::{json, Value};

const BODY_PREVIEW_CHARS: usize = 1000;
const ECHO_CHARS: usize = 50;

/// Built-in tool set: an HTTP caller and a stubbed code executor.
///
/// Tool failures are reported through an `error` field in the result,
/// never as a failure of the dispatch itself.
pub struct ToolRunner {
    client: reqwest::Client,
}

impl ToolRunner {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn api_caller(&self, params: &Value) -> Value {
        let Some(url) = params.get("url").and_then(|v| v.as_str()) else {
            return json!({ "error": "Missing URL" });
        };
        let method = params
            .get("method")
            .and_then(|v| v.as_str())
            .unwrap_or("GET");

        let request = if method.eq_ignore_ascii_case("GET") {
            self.client.get(url)
        } else {
            let mut request = self.client.post(url);
            if let Some(body) = params.get("body") {
                request = request.json(body);
            }
            request
        };

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let text = response.text().await.unwrap_or_default();
                // Truncate so a large body cannot blow up the run log.
                let data: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
                json!({ "status": status, "data": data })
            }
            Err(e) => json!({ "error": e.to_string() }),
        }
    }

    // No sandbox yet; execution stays a stub that echoes its input.
    fn code_executor(params: &Value) -> Value {
        let code = match params.get("code") {
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
            None => String::new(),
        };
        let echo: String = code.chars().take(ECHO_CHARS).collect();
        json!({ "output": format!("Code execution stub. Echo: {}", echo) })
    }
}

impl Default for ToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolDispatcher for ToolRunner {
    async fn execute(&self, tool_name: &str, params: Value) -> Value {
        tracing::debug!(tool = tool_name, "dispatching tool");
        match tool_name {
            "api_caller" => self.api_caller(&params).await,
            "code_executor" => Self::code_executor(&params),
            _ => json!({ "error": format!("Tool {} not found", tool_name) }),
        }
    }
}
