use loomcore::{
    EngineError, EventBus, GraphSpec, LanguageModel, MetricsSink, RunEvent, RunId, RunInput,
    RunOutcome, RunStore, ToolDispatcher,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::handlers::NodeHandlers;
use crate::lifecycle::RunManager;

/// Main entry point wiring adapters, persistence, and notifications
/// together.
///
/// Safe to share across concurrently executing runs: each run gets its
/// own compiled graph and execution state, and the runtime holds no
/// per-run mutable state. A run is one awaitable unit of work; callers
/// spawn them on their own pool when they need cross-run concurrency.
pub struct LoomRuntime {
    manager: RunManager,
    events: Arc<EventBus>,
}

impl LoomRuntime {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        tools: Arc<dyn ToolDispatcher>,
        store: Arc<dyn RunStore>,
    ) -> Self {
        Self::with_config(llm, tools, store, RuntimeConfig::default())
    }

    pub fn with_config(
        llm: Arc<dyn LanguageModel>,
        tools: Arc<dyn ToolDispatcher>,
        store: Arc<dyn RunStore>,
        config: RuntimeConfig,
    ) -> Self {
        let events = Arc::new(EventBus::new(config.event_buffer_size));
        let handlers = NodeHandlers::new(llm, tools);
        let manager = RunManager::new(handlers, store, Arc::clone(&events));
        Self { manager, events }
    }

    /// Attach an experiment-tracking sink.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.manager = self.manager.with_metrics(metrics);
        self
    }

    /// Execute a run to its terminal status.
    pub async fn execute_run(
        &self,
        run_id: RunId,
        spec: &GraphSpec,
        payload: RunInput,
    ) -> Result<RunOutcome, EngineError> {
        self.manager
            .execute(run_id, spec, payload, CancellationToken::new())
            .await
    }

    /// Execute a run with a caller-held cancellation token. Cancellation
    /// is honored at node boundaries only.
    pub async fn execute_run_with_cancel(
        &self,
        run_id: RunId,
        spec: &GraphSpec,
        payload: RunInput,
        cancellation: CancellationToken,
    ) -> Result<RunOutcome, EngineError> {
        self.manager
            .execute(run_id, spec, payload, cancellation)
            .await
    }

    /// Subscribe to live run progress events.
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.events
    }
}

/// Configuration for the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 1000,
        }
    }
}
