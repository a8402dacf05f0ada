use chrono::Utc;
use loomcore::{
    EngineError, EventBus, ExecutionState, GraphSpec, MetricsSink, RunEvent, RunId, RunInput,
    RunOutcome, RunStatus, RunStore,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::compiler;
use crate::executor::GraphExecutor;
use crate::handlers::NodeHandlers;

const METRICS_INPUT_CHARS: usize = 500;

/// Owns one graph execution end-to-end:
/// `Pending -> Running -> {Completed | Failed}`.
///
/// Exactly one terminal write reaches the store per run, and no fault
/// from node execution escapes to the caller; it becomes a `Failed`
/// outcome with diagnostic log content. Only persistence faults and
/// compile-time validation errors propagate as `Err`.
pub struct RunManager {
    handlers: NodeHandlers,
    store: Arc<dyn RunStore>,
    events: Arc<EventBus>,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl RunManager {
    pub fn new(handlers: NodeHandlers, store: Arc<dyn RunStore>, events: Arc<EventBus>) -> Self {
        Self {
            handlers,
            store,
            events,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn execute(
        &self,
        run_id: RunId,
        spec: &GraphSpec,
        payload: RunInput,
        cancellation: CancellationToken,
    ) -> Result<RunOutcome, EngineError> {
        let started = Instant::now();

        // A graph that fails validation never reaches Running: the run
        // is marked Failed straight from Pending and the error surfaces
        // to the caller.
        let graph = match compiler::compile(spec) {
            Ok(graph) => graph,
            Err(e) => {
                tracing::error!(run_id = %run_id, error = %e, "graph rejected at compile time");
                let steps = vec![format!("Error: {}", e)];
                self.record_failure(run_id, &payload.input, &steps, e.to_string())
                    .await?;
                return Err(e.into());
            }
        };

        self.store.mark_running(run_id).await?;
        self.events.emit(RunEvent::RunStarted {
            run_id,
            timestamp: Utc::now(),
        });
        tracing::info!(run_id = %run_id, nodes = graph.len(), "run started");

        let mut state = ExecutionState::new(payload.input.clone());
        let executor = GraphExecutor::new(&self.handlers);
        match executor
            .execute(&graph, &mut state, run_id, &self.events, &cancellation)
            .await
        {
            Ok(()) => {
                let completed_at = Utc::now();
                self.store
                    .mark_completed(run_id, &state.output, &state.steps, completed_at)
                    .await?;
                self.events.emit(RunEvent::RunCompleted {
                    run_id,
                    duration_ms: started.elapsed().as_millis() as u64,
                    timestamp: completed_at,
                });
                self.record_metrics(run_id, RunStatus::Completed, &payload.input, &state.output);
                tracing::info!(run_id = %run_id, "run completed");
                Ok(RunOutcome {
                    status: RunStatus::Completed,
                    output: state.output,
                    steps: state.steps,
                })
            }
            Err(fault) => {
                tracing::error!(run_id = %run_id, error = %fault, "run failed");
                let mut steps = state.steps;
                steps.push(format!("Error: {}", fault));
                self.record_failure(run_id, &payload.input, &steps, fault.to_string())
                    .await?;
                Ok(RunOutcome {
                    status: RunStatus::Failed,
                    output: String::new(),
                    steps,
                })
            }
        }
    }

    /// Single terminal write for the failure paths.
    async fn record_failure(
        &self,
        run_id: RunId,
        input: &str,
        steps: &[String],
        error: String,
    ) -> Result<(), EngineError> {
        let completed_at = Utc::now();
        self.store.mark_failed(run_id, steps, completed_at).await?;
        self.events.emit(RunEvent::RunFailed {
            run_id,
            error,
            timestamp: completed_at,
        });
        self.record_metrics(run_id, RunStatus::Failed, input, "");
        Ok(())
    }

    fn record_metrics(&self, run_id: RunId, status: RunStatus, input: &str, output: &str) {
        if let Some(metrics) = &self.metrics {
            let input: String = input.chars().take(METRICS_INPUT_CHARS).collect();
            metrics.record_run(run_id, status, &input, output);
        }
    }
}
