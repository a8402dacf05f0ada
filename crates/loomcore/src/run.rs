use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RunId = Uuid;

/// Lifecycle status of a run.
///
/// Created `Pending` by the caller; the lifecycle manager moves it to
/// `Running` and then to exactly one of `Completed`/`Failed`. Terminal
/// states are never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

/// Persisted record of one graph execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: RunId,
    pub graph_id: Uuid,
    pub status: RunStatus,
    pub input: String,
    pub output: String,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Run {
    pub fn new(graph_id: Uuid, input: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph_id,
            status: RunStatus::Pending,
            input: input.into(),
            output: String::new(),
            steps: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}
