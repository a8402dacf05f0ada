use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw graph description as authored in the visual builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphSpec {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: NodeSpec) {
        self.nodes.push(node);
    }

    pub fn connect(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.edges.push(EdgeSpec {
            source: source.into(),
            target: target.into(),
        });
    }
}

/// A single node as declared in the builder JSON.
///
/// Node list order is significant: it breaks ties when selecting the
/// entry point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            data: HashMap::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Directed connection between two declared nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
}

/// Node behavior, resolved once at compile time from the declared type
/// string and node data.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Input,
    Model { prompt: String },
    Tool { tool_name: String },
    Output,
    Unknown { raw: String },
}

impl NodeKind {
    pub const DEFAULT_PROMPT: &'static str = "Process this: {input}";
    pub const DEFAULT_TOOL: &'static str = "code_executor";

    pub fn resolve(raw: &str, data: &HashMap<String, serde_json::Value>) -> Self {
        match raw {
            "input" => NodeKind::Input,
            "model" => NodeKind::Model {
                prompt: data
                    .get("prompt")
                    .and_then(|v| v.as_str())
                    .unwrap_or(Self::DEFAULT_PROMPT)
                    .to_string(),
            },
            "tool" => NodeKind::Tool {
                tool_name: data
                    .get("toolName")
                    .and_then(|v| v.as_str())
                    .unwrap_or(Self::DEFAULT_TOOL)
                    .to_string(),
            },
            "output" => NodeKind::Output,
            other => NodeKind::Unknown {
                raw: other.to_string(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Model { .. } => "model",
            NodeKind::Tool { .. } => "tool",
            NodeKind::Output => "output",
            NodeKind::Unknown { .. } => "unknown",
        }
    }
}
