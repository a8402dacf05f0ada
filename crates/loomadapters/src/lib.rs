//! External-service adapters
//!
//! Concrete implementations of the engine's language-model and tool
//! dispatch boundaries: an Ollama-compatible HTTP client and the
//! built-in tool set.

mod llm;
mod tools;

pub use llm::{OllamaClient, OllamaConfig};
pub use tools::ToolRunner;
