use serde::{Deserialize, Serialize};

use crate::RunStatus;

/// Mutable record threaded through node execution for one run.
///
/// Merge policy: `input` is set once at invocation and never mutated,
/// `output` is last-write-wins, `steps` is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionState {
    pub input: String,
    pub output: String,
    pub steps: Vec<String>,
}

impl ExecutionState {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: String::new(),
            steps: Vec::new(),
        }
    }

    /// Apply a partial update under the per-field merge policy.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(output) = update.output {
            self.output = output;
        }
        self.steps.extend(update.steps);
    }
}

/// Partial state update returned by a node handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub output: Option<String>,
    pub steps: Vec<String>,
}

impl StateUpdate {
    /// Update that leaves the state untouched (passthrough nodes).
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }
}

/// Invocation payload for one run. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInput {
    #[serde(default)]
    pub input: String,
}

impl RunInput {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Externally observable result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub output: String,
    pub steps: Vec<String>,
}
