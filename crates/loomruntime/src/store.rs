use async_trait::async_trait;
use chrono::{DateTime, Utc};
use loomcore::{Run, RunId, RunStatus, RunStore, StoreError};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Run store backed by a process-local map.
///
/// The production persistence layer lives behind the same trait outside
/// this workspace; this implementation backs tests and embedded use. It
/// enforces the lifecycle transitions: `mark_running` requires a
/// `Pending` run, and a terminal status is written at most once.
#[derive(Default)]
pub struct InMemoryRunStore {
    runs: RwLock<HashMap<RunId, Run>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created Pending run.
    pub async fn insert(&self, run: Run) {
        self.runs.write().await.insert(run.id, run);
    }

    pub async fn get(&self, run_id: RunId) -> Option<Run> {
        self.runs.read().await.get(&run_id).cloned()
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn mark_running(&self, run_id: RunId) -> Result<(), StoreError> {
        let mut runs = self.runs.write().await;
        let run = runs
            .get_mut(&run_id)
            .ok_or(StoreError::RunNotFound(run_id))?;
        if run.status != RunStatus::Pending {
            return Err(StoreError::IllegalTransition(run_id));
        }
        run.status = RunStatus::Running;
        Ok(())
    }

    async fn mark_completed(
        &self,
        run_id: RunId,
        output: &str,
        steps: &[String],
        completed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut runs = self.runs.write().await;
        let run = runs
            .get_mut(&run_id)
            .ok_or(StoreError::RunNotFound(run_id))?;
        if run.status.is_terminal() {
            return Err(StoreError::IllegalTransition(run_id));
        }
        run.status = RunStatus::Completed;
        run.output = output.to_string();
        run.steps = steps.to_vec();
        run.completed_at = Some(completed_at);
        Ok(())
    }

    async fn mark_failed(
        &self,
        run_id: RunId,
        steps: &[String],
        completed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut runs = self.runs.write().await;
        let run = runs
            .get_mut(&run_id)
            .ok_or(StoreError::RunNotFound(run_id))?;
        if run.status.is_terminal() {
            return Err(StoreError::IllegalTransition(run_id));
        }
        run.status = RunStatus::Failed;
        run.steps = steps.to_vec();
        run.completed_at = Some(completed_at);
        Ok(())
    }
}
