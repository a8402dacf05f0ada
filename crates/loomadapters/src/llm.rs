use async_trait::async_trait;
use loomcore::LanguageModel;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the local inference backend.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    /// Hard per-request timeout; the client reports an error string
    /// instead of blocking past it.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for an Ollama-style generate API.
///
/// Ordinary failures (timeout, HTTP status, transport) never surface as
/// errors; they come back as descriptive strings that flow through the
/// graph like any other node output.
pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(OllamaConfig::default())
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> String {
        let full_prompt = match system_prompt {
            Some(system) => format!("System: {}\nUser: {}", system, prompt),
            None => prompt.to_string(),
        };

        let url = format!("{}/api/generate", self.config.base_url);
        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": full_prompt,
            "stream": false,
        });

        tracing::debug!(model = %self.config.model, "sending generate request");

        let response = match self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.config.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return "Error: model request timed out. Try a shorter prompt or a faster model."
                    .to_string()
            }
            Err(e) => return format!("Error calling model: {}", e),
        };

        if let Err(e) = response.error_for_status_ref() {
            let status = e.status().map(|s| s.as_u16()).unwrap_or_default();
            return format!("Error: model backend returned {}. Is the model pulled?", status);
        }

        match response.json::<serde_json::Value>().await {
            Ok(data) => data
                .get("response")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            Err(e) => format!("Error calling model: {}", e),
        }
    }
}
