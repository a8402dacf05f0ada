use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{RunId, RunStatus, StoreError};

/// Persistence sink for run status transitions.
///
/// The lifecycle manager calls each method at most once per run and does
/// not retry failed writes.
#[async_trait]
pub trait RunStore: Send + Sync {
    async fn mark_running(&self, run_id: RunId) -> Result<(), StoreError>;

    async fn mark_completed(
        &self,
        run_id: RunId,
        output: &str,
        steps: &[String],
        completed_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn mark_failed(
        &self,
        run_id: RunId,
        steps: &[String],
        completed_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// Optional experiment-tracking sink.
///
/// Absence never affects the run state machine.
pub trait MetricsSink: Send + Sync {
    fn record_run(&self, run_id: RunId, status: RunStatus, input: &str, output: &str);
}
